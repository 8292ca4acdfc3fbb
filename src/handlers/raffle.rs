use crate::models::*;
use crate::services::RaffleService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/sortear",
    tag = "raffle",
    request_body = DrawRequest,
    responses(
        (status = 200, description = "Winner recorded", body = DrawResponse),
        (status = 400, description = "Unknown or already-drawn prize, or empty participant pool")
    )
)]
/// Draw a winner for one prize:
/// 1. The prize must still be available.
/// 2. An optional client hint is matched best-effort against active
///    participants (exact, then substring); otherwise the winner is picked
///    uniformly at random from the active pool.
/// 3. The win record, the participant retirement and the prize flag flip
///    commit as one transaction.
pub async fn draw(
    service: web::Data<RaffleService>,
    request: web::Json<DrawRequest>,
) -> Result<HttpResponse> {
    match service.draw(&request.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/ganadores",
    tag = "raffle",
    responses(
        (status = 200, description = "Win history, most recent first", body = [WinnerResponse])
    )
)]
/// Winner history (snapshots taken at draw time)
pub async fn list_winners(service: web::Data<RaffleService>) -> Result<HttpResponse> {
    match service.list_winners().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/reiniciar",
    tag = "raffle",
    responses(
        (status = 200, description = "Raffle reset", body = MessageResponse)
    )
)]
/// Reset the raffle: everyone active again, every prize available, history
/// cleared. Idempotent.
pub async fn reset(service: web::Data<RaffleService>) -> Result<HttpResponse> {
    match service.reset().await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse::new("Raffle reset")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Route wiring
pub fn raffle_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/sortear", web::post().to(draw))
        .route("/ganadores", web::get().to(list_winners))
        .route("/reiniciar", web::post().to(reset));
}
