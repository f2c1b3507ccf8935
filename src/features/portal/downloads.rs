use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::core::error::{AppError, Result};

/// Write fetched bytes under `dir` as `filename`.
///
/// Goes through a temporary file that is persisted into place only once the
/// full body is on disk; on any failure the temporary file is cleaned up and
/// no partial document is left behind. Only the final path component of the
/// server-supplied filename is used.
pub fn save_download(dir: &Path, filename: &str, data: &[u8]) -> Result<PathBuf> {
    let safe_name = Path::new(filename)
        .file_name()
        .ok_or_else(|| AppError::Download(format!("Unusable filename: {}", filename)))?;

    std::fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(data)?;

    let target = dir.join(safe_name);
    temp.persist(&target).map_err(|e| AppError::Io(e.error))?;

    tracing::debug!("Persisted download to {}", target.display());

    Ok(target)
}
