use std::path::Path;

use thiserror::Error;

use crate::shared::constants::{MAX_UPLOAD_SIZE, PDF_EXTENSION};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please select a PDF file only")]
    WrongType,

    #[error("File is too large. Maximum size is 10MB. Your file is {megabytes:.2}MB")]
    TooLarge { megabytes: f64 },
}

/// A file the user has chosen but not yet validated.
///
/// Only metadata is carried; file content is never inspected here.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub filename: String,
    /// Declared content type, guessed from the extension for local paths
    pub content_type: Option<String>,
    pub size: u64,
}

impl FileCandidate {
    /// Stat a local path and attach the content type a browser would declare
    /// for it.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            ));
        }

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content_type = mime_guess::from_path(path).first_raw().map(str::to_string);

        Ok(Self {
            filename,
            content_type,
            size: metadata.len(),
        })
    }
}

/// A candidate that passed validation and may be staged for upload.
#[derive(Debug, Clone)]
pub struct ValidatedFile {
    pub filename: String,
    pub size: u64,
}

/// Check a candidate against the upload policy. Rules apply in order and the
/// first failure wins: content type or extension must say PDF, then the size
/// cap.
pub fn validate_candidate(
    candidate: &FileCandidate,
) -> std::result::Result<ValidatedFile, ValidationError> {
    let declared_pdf = candidate
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.contains("pdf"));
    let named_pdf = candidate
        .filename
        .to_lowercase()
        .ends_with(PDF_EXTENSION);

    if !declared_pdf && !named_pdf {
        return Err(ValidationError::WrongType);
    }

    if candidate.size > MAX_UPLOAD_SIZE {
        let megabytes = candidate.size as f64 / (1024.0 * 1024.0);
        return Err(ValidationError::TooLarge {
            megabytes: (megabytes * 100.0).round() / 100.0,
        });
    }

    Ok(ValidatedFile {
        filename: candidate.filename.clone(),
        size: candidate.size,
    })
}
