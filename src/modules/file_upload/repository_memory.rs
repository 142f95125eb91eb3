use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::{
    api::error,
    modules::file_upload::{model::FileRecord, repository::FileRepository, schema::FileMetadata},
};

/// Process-local file store.
///
/// Keys are v7 UUIDs, so iterating the map yields records in upload order.
#[derive(Default)]
pub struct FileMemoryRepository {
    files: RwLock<BTreeMap<Uuid, FileRecord>>,
}

impl FileMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<Uuid, FileRecord>>, error::SystemError> {
        self.files.read().map_err(|_| error::SystemError::LockPoisoned)
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, BTreeMap<Uuid, FileRecord>>, error::SystemError> {
        self.files.write().map_err(|_| error::SystemError::LockPoisoned)
    }
}

#[async_trait::async_trait]
impl FileRepository for FileMemoryRepository {
    async fn insert(&self, record: FileRecord) -> Result<(), error::SystemError> {
        let mut files = self.write()?;
        if let Some(previous) = files.insert(record.file_id(), record) {
            log::warn!("File id {} reused, previous record replaced", previous.file_id());
        }
        Ok(())
    }

    async fn list_metadata(&self) -> Result<Vec<FileMetadata>, error::SystemError> {
        let files = self.read()?;
        Ok(files.values().map(FileMetadata::from).collect())
    }

    async fn remove(&self, file_id: &Uuid) -> Result<FileRecord, error::SystemError> {
        let mut files = self.write()?;
        files.remove(file_id).ok_or(error::SystemError::FileNotFound(*file_id))
    }

    async fn count(&self) -> Result<usize, error::SystemError> {
        Ok(self.read()?.len())
    }
}
