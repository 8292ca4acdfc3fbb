use crate::external::ImageStore;
use crate::models::*;
use crate::services::PrizeService;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/premios",
    tag = "prizes",
    responses(
        (status = 200, description = "All prizes, available first", body = [PrizeResponse])
    )
)]
/// List every prize, available ones first
pub async fn list_prizes(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match service.list_all().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/premios/disponibles",
    tag = "prizes",
    responses(
        (status = 200, description = "Prizes still up for drawing", body = [PrizeResponse])
    )
)]
/// List prizes that have not been drawn yet
pub async fn list_available_prizes(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match service.list_available().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/premios",
    tag = "prizes",
    request_body = CreatePrizeRequest,
    responses(
        (status = 200, description = "Prize created", body = PrizeResponse),
        (status = 400, description = "Missing or blank prize name")
    )
)]
/// Add a prize. To attach a picture, upload it first and pass the returned
/// reference in `image`.
pub async fn add_prize(
    service: web::Data<PrizeService>,
    request: web::Json<CreatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.add(request.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/premios/imagen",
    tag = "prizes",
    request_body(content = Vec<u8>, description = "Raw image bytes", content_type = "image/*"),
    responses(
        (status = 200, description = "Image stored", body = UploadImageResponse),
        (status = 400, description = "Empty, oversize or non-image payload")
    )
)]
/// Upload a prize image. The body is the raw blob; the Content-Type header
/// decides acceptance. Returns the stable reference path to store on a prize.
pub async fn upload_prize_image(
    store: web::Data<ImageStore>,
    request: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim());

    match store.store(&body, content_type).await {
        Ok(image) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": UploadImageResponse { image }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/premios",
    tag = "prizes",
    responses(
        (status = 200, description = "All prizes and their win records removed", body = MessageResponse)
    )
)]
/// Delete every prize (win records removed first)
pub async fn clear_prizes(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match service.clear().await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse::new("All prizes deleted")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/premios/{id}",
    tag = "prizes",
    params(
        ("id" = i64, Path, description = "Prize id")
    ),
    responses(
        (status = 200, description = "Prize and its win records removed", body = MessageResponse)
    )
)]
/// Delete one prize; unknown ids succeed silently
pub async fn delete_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse::new("Prize deleted")
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Route wiring
pub fn prize_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/premios")
            .route("", web::get().to(list_prizes))
            .route("/disponibles", web::get().to(list_available_prizes))
            .route("", web::post().to(add_prize))
            .route("/imagen", web::post().to(upload_prize_image))
            .route("", web::delete().to(clear_prizes))
            .route("/{id}", web::delete().to(delete_prize)),
    );
}
