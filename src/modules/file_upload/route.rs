use actix_web::web;

use crate::modules::file_upload::handle::{delete_file, list_files, upload_file};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::resource("/files")
                    .route(web::get().to(list_files))
                    .route(web::post().to(upload_file)),
            )
            .service(web::resource("/files/{file_id}").route(web::delete().to(delete_file))),
    );
}
