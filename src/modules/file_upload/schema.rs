use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::file_upload::model::FileRecord;

/// File metadata without content, used for listings and responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub file_id: Uuid,
    pub filename: String,
    pub upload_time: DateTime<Utc>,
    pub filesize: usize,
}

impl From<&FileRecord> for FileMetadata {
    fn from(record: &FileRecord) -> Self {
        Self {
            file_id: record.file_id(),
            filename: record.filename().to_string(),
            upload_time: record.upload_time(),
            filesize: record.filesize(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<FileMetadata>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteFileResponse {
    pub content: FileMetadata,
    pub message: String,
}
