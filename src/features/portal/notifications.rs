use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Display phase of the current message. Fading keeps the text on screen in
/// a dimmed style until removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Visible,
    Fading,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    pub phase: Phase,
}

/// Single-slot holder for the transient status message.
///
/// A new message replaces the current one immediately. Fade and dismissal
/// arrive later as timer events carrying the id issued at display time;
/// events whose id no longer matches the displayed message are ignored, so a
/// stale timer never tears down its successor.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display a message, superseding whatever is currently shown. Returns
    /// the id the expiry timers must present.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.current = Some(Notification {
            id,
            message: message.into(),
            severity,
            created_at: Utc::now(),
            phase: Phase::Visible,
        });
        id
    }

    /// Start fading the message with this id. No-op when superseded.
    pub fn begin_fade(&mut self, id: u64) {
        if let Some(current) = self.current.as_mut() {
            if current.id == id {
                current.phase = Phase::Fading;
            }
        }
    }

    /// Remove the message with this id. No-op when superseded.
    pub fn dismiss(&mut self, id: u64) {
        if self.current.as_ref().is_some_and(|current| current.id == id) {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
