use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::Arc;

use crate::{
    constants::Env,
    modules::file_upload::{model::UploadConfig, FileMemoryRepository, FileUploadService},
};

mod api;
mod configs;
mod constants;
mod modules;

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "File Upload server is operational."
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    configs::init_logger();

    let env = Env::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::other(e)
    })?;

    let file_repo = Arc::new(FileMemoryRepository::new());
    let file_service =
        FileUploadService::new(file_repo, UploadConfig::with_chunk_size(env.upload_chunk_size));

    log::info!("Starting server at http://{}:{}", env.ip, env.port);
    let app_env = env.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(configs::cors(&app_env))
            .app_data(web::Data::new(file_service.clone()))
            .service(health_check)
            .configure(modules::file_upload::route::configure)
    })
    .bind((env.ip.as_str(), env.port))?
    .workers(env.workers)
    .run()
    .await
}
