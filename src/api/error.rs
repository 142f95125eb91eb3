use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::borrow::Cow;
use uuid::Uuid;

/// Errors as reported to HTTP callers.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad File Type: {0}")]
    BadFileType(Cow<'static, str>),
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Internal Server Error")]
    InternalServer,
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: Cow<'static, str>,
}

impl Error {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Machine-readable category sent in the `error` field.
    pub fn category(&self) -> &'static str {
        match self {
            Error::BadFileType(_) => "bad_file_type",
            Error::BadRequest(_) => "bad_request",
            Error::NotFound(_) => "file_not_found",
            Error::InternalServer => "internal_server_error",
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadFileType(_) | Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Error::BadFileType(msg) | Error::BadRequest(msg) | Error::NotFound(msg) => msg.clone(),
            Error::InternalServer => "Unexpected server error.".into(),
        };

        HttpResponse::build(self.status_code()).json(ErrorBody { error: self.category(), message })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    #[error("File extension must be one of {} (got: {}).", permitted.join(", "), display_extension(extension))]
    FileTypeNotPermitted { extension: String, permitted: Vec<&'static str> },
    #[error("File {0} does not exist.")]
    FileNotFound(Uuid),
    #[error("File {0} does not exist.")]
    MalformedIdentifier(String),
    #[error("I/O error while reading upload: {0}")]
    Io(#[from] std::io::Error),
    #[error("File store lock poisoned")]
    LockPoisoned,
}

fn display_extension(extension: &str) -> &str {
    if extension.is_empty() {
        "no extension"
    } else {
        extension
    }
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::FileTypeNotPermitted { .. } => Error::BadFileType(value.to_string().into()),
            SystemError::FileNotFound(_) | SystemError::MalformedIdentifier(_) => {
                Error::NotFound(value.to_string().into())
            }
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer
            }
        }
    }
}
