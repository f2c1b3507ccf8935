use thiserror::Error;

use crate::shared::validation::ValidationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network failure or unexpected status while talking to the service.
    #[error("Document service error: {0}")]
    Transport(String),

    /// Upload rejection carrying the server-supplied message.
    #[error("{0}")]
    Upload(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Unexpected response from document service: {0}")]
    UnexpectedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
