use crate::models::*;
use crate::services::ParticipantService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/participantes",
    tag = "participants",
    responses(
        (status = 200, description = "Active participants", body = [ParticipantResponse])
    )
)]
/// List participants still eligible to win
pub async fn list_participants(service: web::Data<ParticipantService>) -> Result<HttpResponse> {
    match service.list_active().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/participantes",
    tag = "participants",
    request_body = CreateParticipantRequest,
    responses(
        (status = 200, description = "Participant created", body = ParticipantResponse),
        (status = 400, description = "Missing or blank name"),
        (status = 409, description = "Name already exists")
    )
)]
/// Add a single participant (name trimmed, must be unique)
pub async fn add_participant(
    service: web::Data<ParticipantService>,
    request: web::Json<CreateParticipantRequest>,
) -> Result<HttpResponse> {
    match service.add(request.into_inner()).await {
        Ok(participant) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": participant })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/participantes/bulk",
    tag = "participants",
    request_body = BulkAddParticipantsRequest,
    responses(
        (status = 200, description = "Batch applied", body = BulkAddParticipantsResponse)
    )
)]
/// Bulk add participants; duplicates and blank entries are skipped, the rest
/// of the batch still applies
pub async fn bulk_add_participants(
    service: web::Data<ParticipantService>,
    request: web::Json<BulkAddParticipantsRequest>,
) -> Result<HttpResponse> {
    match service.add_bulk(request.into_inner()).await {
        Ok(inserted) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": BulkAddParticipantsResponse { inserted }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/participantes",
    tag = "participants",
    responses(
        (status = 200, description = "All participants and their win records removed", body = MessageResponse)
    )
)]
/// Delete every participant (win records removed first)
pub async fn clear_participants(service: web::Data<ParticipantService>) -> Result<HttpResponse> {
    match service.clear().await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse::new("All participants deleted")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/participantes/{id}",
    tag = "participants",
    params(
        ("id" = i64, Path, description = "Participant id")
    ),
    responses(
        (status = 200, description = "Participant and their win records removed", body = MessageResponse)
    )
)]
/// Delete one participant; unknown ids succeed silently
pub async fn delete_participant(
    service: web::Data<ParticipantService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse::new("Participant deleted")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Route wiring
pub fn participant_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/participantes")
            .route("", web::get().to(list_participants))
            .route("", web::post().to(add_participant))
            .route("/bulk", web::post().to(bulk_add_participants))
            .route("", web::delete().to(clear_participants))
            .route("/{id}", web::delete().to(delete_participant)),
    );
}
