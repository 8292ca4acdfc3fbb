use actix_cors::Cors;

/// Wide-open policy: the raffle UI is a local static page and may be served
/// from any origin
pub fn create_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
