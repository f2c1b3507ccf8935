use std::path::{Path, PathBuf};

use crate::shared::format::format_size;
use crate::shared::validation::ValidatedFile;

/// A validated file staged for upload, with the preview fields derived once
/// at selection time.
#[derive(Debug, Clone)]
pub struct PendingSelection {
    pub path: PathBuf,
    pub filename: String,
    pub size_label: String,
}

impl PendingSelection {
    pub fn new(path: &Path, validated: &ValidatedFile) -> Self {
        Self {
            path: path.to_path_buf(),
            filename: validated.filename.clone(),
            size_label: format_size(validated.size),
        }
    }
}

/// At most one pending selection exists at a time; choosing a new file
/// replaces the previous choice.
#[derive(Debug, Default)]
pub struct SelectionState {
    pending: Option<PendingSelection>,
}

impl SelectionState {
    pub fn select(&mut self, selection: PendingSelection) {
        self.pending = Some(selection);
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&PendingSelection> {
        self.pending.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}
