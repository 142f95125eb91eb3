//! Upload ingestion: extension gate, chunked buffering and identity assignment.
//!
//! Nothing here touches the file store; the caller decides what to do with the
//! returned [`FileRecord`].

use futures_util::io::{AsyncRead, AsyncReadExt};
use uuid::Uuid;

use crate::api::error::SystemError;
use crate::constants::{DEFAULT_CHUNK_SIZE, PERMITTED_EXTENSIONS};
use crate::modules::file_upload::model::FileRecord;

/// Lower-cased extension of `filename`, dot included, or an empty string.
///
/// Only the part after the last `/` is inspected and leading dots never start
/// an extension, so `.pdf` on its own has none. `\` is an ordinary character.
pub fn file_extension(filename: &str) -> String {
    let name = filename.rsplit('/').next().unwrap_or(filename);
    let stem_start = name.len() - name.trim_start_matches('.').len();

    match name[stem_start..].rfind('.') {
        Some(idx) => name[stem_start + idx..].to_lowercase(),
        None => String::new(),
    }
}

/// Returns the extension when it is in the permitted set.
pub fn validate_extension(filename: &str) -> Result<String, SystemError> {
    let extension = file_extension(filename);
    if PERMITTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(SystemError::FileTypeNotPermitted {
            extension,
            permitted: PERMITTED_EXTENSIONS.to_vec(),
        })
    }
}

/// Validates, buffers and stamps one upload.
///
/// The extension is checked before the first read, and the timestamp is taken
/// before buffering starts. `chunk_size` of `None` or `0` falls back to 1 MiB.
pub async fn parse_file<R>(
    filename: impl Into<String>,
    mut reader: R,
    chunk_size: Option<usize>,
) -> Result<FileRecord, SystemError>
where
    R: AsyncRead + Unpin,
{
    let filename = filename.into();
    validate_extension(&filename)?;

    let upload_time = chrono::Utc::now();
    let chunk_size = chunk_size.filter(|size| *size > 0).unwrap_or(DEFAULT_CHUNK_SIZE);

    // Chunks are kept in memory; a durable backend would flush each one here.
    let mut content = Vec::new();
    let mut chunk = vec![0u8; chunk_size];
    let mut chunks = 0usize;
    loop {
        let read = reader.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        content.extend_from_slice(&chunk[..read]);
        chunks += 1;
    }

    let file_id = Uuid::now_v7();
    log::debug!("Buffered {} bytes of {} in {} chunk(s)", content.len(), filename, chunks);

    Ok(FileRecord::new(file_id, filename, upload_time, content))
}
