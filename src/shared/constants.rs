/// Maximum accepted upload size in bytes (10MB)
pub const MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;

/// The one accepted file extension, compared case-insensitively
pub const PDF_EXTENSION: &str = ".pdf";

// =============================================================================
// NOTIFICATION TIMING
// =============================================================================

/// How long a notification stays fully visible before it starts fading
pub const NOTIFICATION_DISPLAY_MS: u64 = 5000;

/// Fade duration after which the notification is removed
pub const NOTIFICATION_FADE_MS: u64 = 300;
