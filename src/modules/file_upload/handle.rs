use actix_multipart::Multipart;
use actix_web::web;
use futures_util::TryStreamExt;

use crate::api::success::Success;
use crate::api::{error, success};
use crate::modules::file_upload::schema::{DeleteFileResponse, FileListResponse, FileMetadata};
use crate::modules::file_upload::service::FileUploadService;

/// Form field the client is expected to send the file under
const FILE_FIELD: &str = "file";

/// List metadata of every stored file
pub async fn list_files(
    service: web::Data<FileUploadService>,
) -> Result<success::Success<FileListResponse>, error::Error> {
    let files = service.list_files().await?;
    Ok(Success::ok(FileListResponse { files }))
}

/// Upload file handler
pub async fn upload_file(
    mut payload: Multipart,
    service: web::Data<FileUploadService>,
) -> Result<success::Success<FileMetadata>, error::Error> {
    while let Some(field) = payload.try_next().await.map_err(|e| {
        log::warn!("Rejected multipart payload: {}", e);
        error::Error::bad_request("Invalid multipart payload")
    })? {
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let filename = match filename {
            Some(name) => name,
            None if field.name() == Some(FILE_FIELD) => {
                return Err(error::Error::bad_request("Missing filename"));
            }
            // Plain form fields are skipped
            None => continue,
        };

        let reader = field.map_err(|e| std::io::Error::other(e.to_string())).into_async_read();
        let metadata = service.upload_file(filename, reader).await?;

        return Ok(Success::created(metadata));
    }

    Err(error::Error::bad_request("No file found in request"))
}

/// Delete file handler
pub async fn delete_file(
    file_id: web::Path<String>,
    service: web::Data<FileUploadService>,
) -> Result<success::Success<DeleteFileResponse>, error::Error> {
    let record = service.delete_file(&file_id.into_inner()).await?;
    let message = format!("File {} deleted successfully.", record.filename());

    Ok(Success::ok(DeleteFileResponse { content: FileMetadata::from(&record), message }))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::Value;
    use std::sync::Arc;
    use uuid::Uuid;

    use crate::modules::file_upload::{
        model::UploadConfig, repository_memory::FileMemoryRepository, route,
        schema::FileMetadata, service::FileUploadService,
    };

    const BOUNDARY: &str = "----upload-test-boundary";

    type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

    /// Part headers and content, without the delimiter that closes it.
    fn open_part(field: &str, filename: Option<&str>, content: &[u8]) -> Vec<u8> {
        let disposition = match filename {
            Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
            None => format!("form-data; name=\"{field}\""),
        };
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body
    }

    fn multipart_parts(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for (field, filename, content) in parts {
            body.extend_from_slice(&open_part(field, *filename, content));
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_body(field: &str, filename: Option<&str>, content: &[u8]) -> Vec<u8> {
        multipart_parts(&[(field, filename, content)])
    }

    fn upload_request(body: Vec<u8>) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/v1/files")
            .insert_header(("Content-Type", format!("multipart/form-data; boundary={BOUNDARY}")))
            .set_payload(body)
    }

    fn service() -> web::Data<FileUploadService> {
        web::Data::new(FileUploadService::new(
            Arc::new(FileMemoryRepository::new()),
            UploadConfig::with_chunk_size(4),
        ))
    }

    #[actix_web::test]
    async fn test_upload_list_delete_flow() {
        let data = service();
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(route::configure))
                .await;

        let started = chrono::Utc::now();
        let req = upload_request(multipart_body("file", Some("report.csv"), b"a,b,c\n1,2,3"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let meta: FileMetadata = test::read_body_json(res).await;
        assert_eq!(meta.filesize, 11);
        assert_eq!(meta.filename, "report.csv");
        assert!(meta.upload_time >= started);

        let req = test::TestRequest::get().uri("/api/v1/files").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        let files = listed["files"].as_array().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0]["file_id"], meta.file_id.to_string());
        assert!(files[0].get("content").is_none());

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/files/{}", meta.file_id))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["content"]["filename"], "report.csv");
        assert_eq!(body["content"]["filesize"], 11);
        assert_eq!(body["message"], "File report.csv deleted successfully.");

        let req = test::TestRequest::get().uri("/api/v1/files").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert!(listed["files"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_upload_bad_extension_returns_400() {
        let data = service();
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(route::configure))
                .await;

        let req = upload_request(multipart_body("file", Some("image.png"), b"\x89PNG")).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "bad_file_type");
        let message = body["message"].as_str().unwrap();
        assert!(message.contains(".pdf, .csv, .txt"));
        assert!(message.contains(".png"));
        assert_eq!(data.stored_count().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_same_file_uploaded_twice_is_stored_twice() {
        let data = service();
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(route::configure))
                .await;

        let mut ids = Vec::new();
        for _ in 0..2 {
            let req =
                upload_request(multipart_body("file", Some("dup.txt"), b"same")).to_request();
            let meta: FileMetadata = test::call_and_read_body_json(&app, req).await;
            ids.push(meta.file_id);
        }
        assert_ne!(ids[0], ids[1]);
        assert_eq!(data.stored_count().await.unwrap(), 2);
    }

    #[actix_web::test]
    async fn test_upload_without_file_part_returns_400() {
        let app = test::init_service(App::new().app_data(service()).configure(route::configure))
            .await;

        let req = upload_request(multipart_body("note", None, b"just text")).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "bad_request");
    }

    #[actix_web::test]
    async fn test_plain_fields_before_file_are_skipped() {
        let data = service();
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(route::configure))
                .await;

        let body = multipart_parts(&[
            ("description", None, &b"quarterly numbers"[..]),
            ("file", Some("q3.csv"), &b"1,2"[..]),
        ]);
        let res = test::call_service(&app, upload_request(body).to_request()).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let meta: FileMetadata = test::read_body_json(res).await;
        assert_eq!(meta.filename, "q3.csv");
        assert_eq!(meta.filesize, 3);
        assert_eq!(data.stored_count().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_file_part_without_filename_returns_400() {
        let data = service();
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(route::configure))
                .await;

        for filename in [None, Some("")] {
            let req = upload_request(multipart_body("file", filename, b"orphan")).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "filename {filename:?}");
            let body: Value = test::read_body_json(res).await;
            assert_eq!(body["error"], "bad_request");
            assert_eq!(body["message"], "Missing filename");
        }
        assert_eq!(data.stored_count().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_body_cut_off_mid_file_returns_500() {
        let data = service();
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(route::configure))
                .await;

        let body = open_part("file", Some("cut.csv"), b"a,b,c\n1,2");
        let res = test::call_service(&app, upload_request(body).to_request()).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "internal_server_error");
        assert_eq!(body["message"], "Unexpected server error.");
        assert_eq!(data.stored_count().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_delete_unknown_id_returns_404() {
        let app = test::init_service(App::new().app_data(service()).configure(route::configure))
            .await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/files/{}", Uuid::now_v7()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "file_not_found");
    }

    #[actix_web::test]
    async fn test_delete_malformed_id_returns_404() {
        let app = test::init_service(App::new().app_data(service()).configure(route::configure))
            .await;

        let req = test::TestRequest::delete().uri("/api/v1/files/not-a-uuid").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert!(body["message"].as_str().unwrap().contains("not-a-uuid"));
    }
}
