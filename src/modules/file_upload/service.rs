use futures_util::io::AsyncRead;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::file_upload::{
    ingest::parse_file,
    model::{FileRecord, UploadConfig},
    repository::FileRepository,
    schema::FileMetadata,
};

#[derive(Clone)]
pub struct FileUploadService {
    file_repo: Arc<dyn FileRepository + Send + Sync>,
    config: UploadConfig,
}

impl FileUploadService {
    pub fn new(file_repo: Arc<dyn FileRepository + Send + Sync>, config: UploadConfig) -> Self {
        info!("FileUploadService initialized with chunk size {}", config.chunk_size);
        Self { file_repo, config }
    }

    /// Ingest an upload and store it under a fresh id
    pub async fn upload_file<R>(
        &self,
        filename: String,
        reader: R,
    ) -> Result<FileMetadata, error::SystemError>
    where
        R: AsyncRead + Unpin,
    {
        let record = parse_file(filename, reader, Some(self.config.chunk_size)).await?;
        let metadata = FileMetadata::from(&record);

        self.file_repo.insert(record).await?;
        match self.stored_count().await {
            Ok(held) => info!(
                "Stored {} ({} bytes) as {}, {} file(s) held",
                metadata.filename, metadata.filesize, metadata.file_id, held
            ),
            Err(e) => log::warn!(
                "Stored {} as {}, file count unavailable: {}",
                metadata.filename, metadata.file_id, e
            ),
        }

        Ok(metadata)
    }

    pub async fn list_files(&self) -> Result<Vec<FileMetadata>, error::SystemError> {
        self.file_repo.list_metadata().await
    }

    /// Delete file by its string id, returning the removed record
    pub async fn delete_file(&self, raw_id: &str) -> Result<FileRecord, error::SystemError> {
        let file_id = parse_file_id(raw_id)?;
        let record = self.file_repo.remove(&file_id).await?;
        info!(
            "Deleted {} ({}), released {} bytes",
            record.filename(),
            file_id,
            record.content().len()
        );
        Ok(record)
    }

    pub async fn stored_count(&self) -> Result<usize, error::SystemError> {
        self.file_repo.count().await
    }
}

pub fn parse_file_id(raw_id: &str) -> Result<Uuid, error::SystemError> {
    Uuid::parse_str(raw_id.trim())
        .map_err(|_| error::SystemError::MalformedIdentifier(raw_id.to_string()))
}
