use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::core::config::DownloadConfig;
use crate::core::error::AppError;
use crate::features::portal::commands::Command;
use crate::features::portal::downloads;
use crate::features::portal::notifications::{NotificationCenter, Severity};
use crate::features::portal::selection::{PendingSelection, SelectionState};
use crate::features::portal::store::DocumentStore;
use crate::features::portal::view::PageContext;
use crate::modules::api::DocumentApi;
use crate::shared::constants::{NOTIFICATION_DISPLAY_MS, NOTIFICATION_FADE_MS};
use crate::shared::validation::{validate_candidate, FileCandidate, ValidationError};

/// Answers the delete confirmation question. The terminal frontend asks on
/// stdin; tests script the answer.
pub trait ConfirmPrompt: Send {
    fn confirm(&self, message: &str) -> bool;
}

/// State of the document list area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Empty,
    Populated,
    /// The refresh failed; whatever was last rendered stays on screen.
    LoadError,
}

/// Owns all client-side state and applies [`Command`]s to it.
///
/// Every failure is converted into exactly one error notification here; no
/// error escapes this boundary and none is retried automatically.
pub struct Portal<A: DocumentApi> {
    api: Arc<A>,
    confirm: Box<dyn ConfirmPrompt>,
    downloads: DownloadConfig,
    timers: mpsc::UnboundedSender<Command>,
    pub store: DocumentStore,
    pub selection: SelectionState,
    pub notifications: NotificationCenter,
    pub list_view: ListView,
    upload_in_flight: bool,
}

impl<A: DocumentApi> Portal<A> {
    pub fn new(
        api: Arc<A>,
        confirm: Box<dyn ConfirmPrompt>,
        downloads: DownloadConfig,
        timers: mpsc::UnboundedSender<Command>,
    ) -> Self {
        Self {
            api,
            confirm,
            downloads,
            timers,
            store: DocumentStore::new(),
            selection: SelectionState::default(),
            notifications: NotificationCenter::new(),
            list_view: ListView::Loading,
            upload_in_flight: false,
        }
    }

    /// Borrow the state the view layer renders from.
    pub fn page(&self) -> PageContext<'_> {
        PageContext {
            list_view: self.list_view,
            store: &self.store,
            selection: &self.selection,
            notifications: &self.notifications,
        }
    }

    pub async fn handle(&mut self, command: Command) {
        match command {
            Command::Refresh => self.refresh().await,
            Command::SelectFile(path) => self.select_file(&path),
            Command::RemoveSelection => self.selection.clear(),
            Command::Submit => self.submit().await,
            Command::Download(id) => self.download(id).await,
            Command::Delete(id) => self.delete(id).await,
            Command::FadeNotification(id) => self.notifications.begin_fade(id),
            Command::DismissNotification(id) => self.notifications.dismiss(id),
        }
    }

    async fn refresh(&mut self) {
        self.list_view = ListView::Loading;

        match self.api.list_documents().await {
            Ok(documents) => {
                info!("Loaded {} documents", documents.len());
                self.store.replace_all(documents);
                self.list_view = if self.store.is_empty() {
                    ListView::Empty
                } else {
                    ListView::Populated
                };
            }
            Err(e) => {
                warn!("Failed to load documents: {}", e);
                // The previous snapshot stays; only the view state flips
                self.list_view = ListView::LoadError;
                self.notify_error(
                    "Failed to load documents. Please check if the document service is running.",
                );
            }
        }
    }

    fn select_file(&mut self, path: &Path) {
        let candidate = match FileCandidate::from_path(path) {
            Ok(candidate) => candidate,
            Err(e) => {
                debug!("Could not stat candidate {}: {}", path.display(), e);
                self.selection.clear();
                self.notify_error(format!("Cannot read file: {}", path.display()));
                return;
            }
        };

        match validate_candidate(&candidate) {
            Ok(validated) => {
                self.selection.select(PendingSelection::new(path, &validated));
            }
            Err(e) => {
                self.selection.clear();
                self.notify_error(e.to_string());
            }
        }
    }

    async fn submit(&mut self) {
        if self.upload_in_flight {
            debug!("Upload already in flight, ignoring submit");
            return;
        }

        let Some(pending) = self.selection.pending().cloned() else {
            self.notify_error("Please select a file to upload");
            return;
        };

        self.upload_in_flight = true;
        let outcome = self.upload(&pending).await;
        self.upload_in_flight = false;

        match outcome {
            Ok(filename) => {
                self.notify_success(format!("File \"{}\" uploaded successfully!", filename));
                self.selection.clear();
                self.refresh().await;
            }
            Err(AppError::Validation(ValidationError::WrongType)) => {
                self.notify_error("Only PDF files are allowed");
            }
            Err(AppError::Validation(e)) => self.notify_error(e.to_string()),
            Err(AppError::Upload(message)) => self.notify_error(message),
            Err(AppError::Io(e)) => {
                warn!("Could not read staged file: {}", e);
                self.notify_error(format!("Cannot read file: {}", pending.path.display()));
            }
            Err(e) => {
                warn!("Upload failed: {}", e);
                self.notify_error(
                    "Network error. Please check if the document service is running.",
                );
            }
        }
    }

    async fn upload(&self, pending: &PendingSelection) -> crate::core::error::Result<String> {
        // The staged file may have changed on disk since it was chosen;
        // check it again before spending a request on it.
        let candidate = FileCandidate::from_path(&pending.path)?;
        validate_candidate(&candidate)?;

        let data = tokio::fs::read(&pending.path).await?;
        let receipt = self.api.upload_document(data, &pending.filename).await?;
        Ok(receipt.filename)
    }

    async fn download(&mut self, id: i64) {
        let Some(filename) = self.store.get(id).map(|d| d.filename.clone()) else {
            self.notify_error(format!("Unknown document id: {}", id));
            return;
        };

        let saved = match self.api.download_document(id).await {
            Ok(data) => downloads::save_download(&self.downloads.dir, &filename, &data),
            Err(e) => Err(e),
        };

        match saved {
            Ok(path) => {
                info!("Saved \"{}\" to {}", filename, path.display());
            }
            Err(e) => {
                warn!("Download of {} failed: {}", id, e);
                self.notify_error("Failed to download file");
            }
        }
    }

    async fn delete(&mut self, id: i64) {
        let Some(filename) = self.store.get(id).map(|d| d.filename.clone()) else {
            self.notify_error(format!("Unknown document id: {}", id));
            return;
        };

        let question = format!("Are you sure you want to delete \"{}\"?", filename);
        if !self.confirm.confirm(&question) {
            debug!("Delete of {} cancelled", id);
            return;
        }

        match self.api.delete_document(id).await {
            Ok(()) => {
                self.notify_success(format!("\"{}\" deleted successfully", filename));
                self.refresh().await;
            }
            Err(e) => {
                warn!("Delete of {} failed: {}", id, e);
                self.notify_error("Failed to delete file");
            }
        }
    }

    fn notify_success(&mut self, message: impl Into<String>) {
        self.notify(message.into(), Severity::Success);
    }

    fn notify_error(&mut self, message: impl Into<String>) {
        self.notify(message.into(), Severity::Error);
    }

    fn notify(&mut self, message: String, severity: Severity) {
        let id = self.notifications.notify(message, severity);
        self.schedule_expiry(id);
    }

    /// Fire-and-forget expiry timers. Each event carries the notification id
    /// so the center can ignore it once the message has been superseded.
    fn schedule_expiry(&self, id: u64) {
        let timers = self.timers.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(NOTIFICATION_DISPLAY_MS)).await;
            let _ = timers.send(Command::FadeNotification(id));
            tokio::time::sleep(Duration::from_millis(NOTIFICATION_FADE_MS)).await;
            let _ = timers.send(Command::DismissNotification(id));
        });
    }
}
