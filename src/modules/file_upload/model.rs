use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::constants::DEFAULT_CHUNK_SIZE;

/// A stored upload: metadata plus the buffered content.
///
/// Fields are private so the size can only ever be derived from the content,
/// and content cannot be mutated once the record exists.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    file_id: Uuid,
    filename: String,
    upload_time: DateTime<Utc>,
    filesize: usize,
    content: Vec<u8>,
}

impl FileRecord {
    pub fn new(
        file_id: Uuid,
        filename: impl Into<String>,
        upload_time: DateTime<Utc>,
        content: Vec<u8>,
    ) -> Self {
        Self { file_id, filename: filename.into(), upload_time, filesize: content.len(), content }
    }

    pub fn file_id(&self) -> Uuid {
        self.file_id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn upload_time(&self) -> DateTime<Utc> {
        self.upload_time
    }

    pub fn filesize(&self) -> usize {
        self.filesize
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// File upload configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub chunk_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self { chunk_size: DEFAULT_CHUNK_SIZE }
    }
}

impl UploadConfig {
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self { chunk_size }
    }
}
