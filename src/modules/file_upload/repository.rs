use uuid::Uuid;

use crate::{
    api::error,
    modules::file_upload::{model::FileRecord, schema::FileMetadata},
};

#[async_trait::async_trait]
pub trait FileRepository {
    /// Stores `record` under its own id. An existing record with the same id is replaced.
    async fn insert(&self, record: FileRecord) -> Result<(), error::SystemError>;

    async fn list_metadata(&self) -> Result<Vec<FileMetadata>, error::SystemError>;

    /// Removes and returns the record, or fails with `FileNotFound` leaving the store untouched.
    async fn remove(&self, file_id: &Uuid) -> Result<FileRecord, error::SystemError>;

    async fn count(&self) -> Result<usize, error::SystemError>;
}
