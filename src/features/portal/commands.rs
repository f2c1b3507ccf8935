use std::path::PathBuf;

/// User intents and timer events consumed by the portal controller.
#[derive(Debug, Clone)]
pub enum Command {
    /// Reload the document list from the service
    Refresh,
    /// Validate a local file and stage it for upload
    SelectFile(PathBuf),
    /// Drop the staged file
    RemoveSelection,
    /// Upload the staged file
    Submit,
    /// Fetch a document and save it under the download directory
    Download(i64),
    /// Delete a document after confirmation
    Delete(i64),
    /// Timer: begin fading the notification with this id
    FadeNotification(u64),
    /// Timer: remove the notification with this id
    DismissNotification(u64),
}
