use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::participant::list_participants,
        handlers::participant::add_participant,
        handlers::participant::bulk_add_participants,
        handlers::participant::clear_participants,
        handlers::participant::delete_participant,
        handlers::prize::list_prizes,
        handlers::prize::list_available_prizes,
        handlers::prize::add_prize,
        handlers::prize::upload_prize_image,
        handlers::prize::clear_prizes,
        handlers::prize::delete_prize,
        handlers::raffle::draw,
        handlers::raffle::list_winners,
        handlers::raffle::reset,
    ),
    components(
        schemas(
            ApiError,
            MessageResponse,
            CreateParticipantRequest,
            BulkAddParticipantsRequest,
            BulkAddParticipantsResponse,
            ParticipantResponse,
            CreatePrizeRequest,
            PrizeResponse,
            UploadImageResponse,
            DrawRequest,
            DrawResponse,
            WinnerResponse,
        )
    ),
    tags(
        (name = "participants", description = "Participant pool management"),
        (name = "prizes", description = "Prize management and image upload"),
        (name = "raffle", description = "Drawing, winner history and reset"),
    ),
    info(
        title = "Rifa Backend API",
        version = "1.0.0",
        description = "Raffle backend REST API documentation",
    ),
    servers(
        (url = "/api", description = "API root")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
