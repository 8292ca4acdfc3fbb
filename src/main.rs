use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use rifa_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::ImageStore,
    handlers,
    middlewares::create_cors,
    services::{ParticipantService, PrizeService, RaffleService},
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let image_store = ImageStore::new(&config.uploads);
    image_store
        .ensure_dir()
        .expect("Failed to create uploads directory");

    let participant_service = ParticipantService::new(pool.clone());
    let prize_service = PrizeService::new(pool.clone());
    let raffle_service = RaffleService::new(pool.clone());

    let uploads_dir = config.uploads.dir.clone();
    let max_payload = config.uploads.max_bytes;

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::PayloadConfig::new(max_payload))
            .app_data(web::Data::new(participant_service.clone()))
            .app_data(web::Data::new(prize_service.clone()))
            .app_data(web::Data::new(raffle_service.clone()))
            .app_data(web::Data::new(image_store.clone()))
            .configure(swagger_config)
            .service(actix_files::Files::new("/uploads", uploads_dir.clone()))
            .service(
                web::scope("/api")
                    .configure(handlers::participant_config)
                    .configure(handlers::prize_config)
                    .configure(handlers::raffle_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
