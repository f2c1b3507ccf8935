use std::fmt::Write;

use crate::features::portal::controller::ListView;
use crate::features::portal::notifications::{Notification, NotificationCenter, Phase, Severity};
use crate::features::portal::selection::SelectionState;
use crate::features::portal::store::DocumentStore;
use crate::modules::api::DocumentMetadata;
use crate::shared::format::{escape_html, format_date, format_size};

/// Borrowed snapshot of everything the renderers need.
pub struct PageContext<'a> {
    pub list_view: ListView,
    pub store: &'a DocumentStore,
    pub selection: &'a SelectionState,
    pub notifications: &'a NotificationCenter,
}

/// Render the current state for the terminal.
pub fn render_text(page: &PageContext<'_>) -> String {
    let mut out = String::new();

    if let Some(notification) = page.notifications.current() {
        let tag = match notification.severity {
            Severity::Success => "ok",
            Severity::Error => "error",
        };
        let _ = writeln!(
            out,
            "[{} {}] {}",
            tag,
            notification.created_at.format("%H:%M:%S"),
            notification.message
        );
    }

    if let Some(pending) = page.selection.pending() {
        let _ = writeln!(out, "Selected: {} ({})", pending.filename, pending.size_label);
    }

    match page.list_view {
        ListView::Loading => out.push_str("Loading documents...\n"),
        ListView::Empty => out.push_str("No documents uploaded yet.\n"),
        // On a failed refresh the previous snapshot stays visible
        ListView::Populated | ListView::LoadError => {
            if page.store.is_empty() {
                out.push_str("No documents uploaded yet.\n");
            } else {
                for document in page.store.iter() {
                    let _ = writeln!(
                        out,
                        "  [{}] {}  {}  {}",
                        document.id,
                        document.filename,
                        format_size(document.filesize),
                        format_date(&document.created_at),
                    );
                }
            }
        }
    }

    out
}

/// Render the full page snapshot as HTML, one row per document.
pub fn render_page(page: &PageContext<'_>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("  <meta charset=\"utf-8\">\n  <title>HealthDocs Portal</title>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<div id=\"messageContainer\">");
    if let Some(notification) = page.notifications.current() {
        html.push_str(&render_notification(notification));
    }
    html.push_str("</div>\n");

    if let Some(pending) = page.selection.pending() {
        let _ = writeln!(
            html,
            "<div id=\"filePreview\"><span>{}</span> <span>{}</span></div>",
            escape_html(&pending.filename),
            pending.size_label
        );
    }

    match page.list_view {
        ListView::Loading => {
            html.push_str("<div id=\"loadingState\">Loading documents...</div>\n");
        }
        ListView::Empty => {
            html.push_str("<div id=\"emptyState\">No documents uploaded yet.</div>\n");
        }
        ListView::Populated | ListView::LoadError => {
            html.push_str("<div id=\"documentsList\">\n");
            for document in page.store.iter() {
                html.push_str(&render_document_row(document));
            }
            html.push_str("</div>\n");
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_document_row(document: &DocumentMetadata) -> String {
    format!(
        concat!(
            "<div class=\"document-item\" data-id=\"{id}\">\n",
            "  <div class=\"document-name\">{name}</div>\n",
            "  <div class=\"document-meta\"><span>{size}</span> <span>{date}</span></div>\n",
            "</div>\n"
        ),
        id = document.id,
        name = escape_html(&document.filename),
        size = format_size(document.filesize),
        date = format_date(&document.created_at),
    )
}

fn render_notification(notification: &Notification) -> String {
    let class = match notification.severity {
        Severity::Success => "message message-success",
        Severity::Error => "message message-error",
    };
    let fading = match notification.phase {
        Phase::Visible => "",
        Phase::Fading => " fading",
    };
    format!(
        "<div class=\"{}{}\">{}</div>",
        class,
        fading,
        escape_html(&notification.message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn document(id: i64, filename: &str, filesize: u64) -> DocumentMetadata {
        DocumentMetadata {
            id,
            filename: filename.to_string(),
            filesize,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        }
    }

    fn page<'a>(
        list_view: ListView,
        store: &'a DocumentStore,
        selection: &'a SelectionState,
        notifications: &'a NotificationCenter,
    ) -> PageContext<'a> {
        PageContext {
            list_view,
            store,
            selection,
            notifications,
        }
    }

    #[test]
    fn test_empty_state_renders_no_rows() {
        let store = DocumentStore::new();
        let selection = SelectionState::default();
        let notifications = NotificationCenter::new();

        let html = render_page(&page(ListView::Empty, &store, &selection, &notifications));

        assert!(html.contains("id=\"emptyState\""));
        assert!(!html.contains("document-item"));
    }

    #[test]
    fn test_row_shows_formatted_size_and_date() {
        let mut store = DocumentStore::new();
        store.replace_all(vec![document(1, "lab.pdf", 2048)]);
        let selection = SelectionState::default();
        let notifications = NotificationCenter::new();

        let html = render_page(&page(
            ListView::Populated,
            &store,
            &selection,
            &notifications,
        ));

        assert!(html.contains("<span>2 KB</span>"));
        assert!(html.contains(&format_date(
            &Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
        )));
    }

    #[test]
    fn test_filename_is_escaped_in_markup() {
        let mut store = DocumentStore::new();
        store.replace_all(vec![document(1, "<img src=x>.pdf", 10)]);
        let selection = SelectionState::default();
        let notifications = NotificationCenter::new();

        let html = render_page(&page(
            ListView::Populated,
            &store,
            &selection,
            &notifications,
        ));

        assert!(html.contains("&lt;img src=x&gt;.pdf"));
        assert!(!html.contains("<img src=x>"));
    }

    #[test]
    fn test_notification_classes_follow_severity_and_phase() {
        let store = DocumentStore::new();
        let selection = SelectionState::default();
        let mut notifications = NotificationCenter::new();
        let id = notifications.notify("Upload failed", Severity::Error);

        let html = render_page(&page(ListView::Empty, &store, &selection, &notifications));
        assert!(html.contains("message message-error"));
        assert!(!html.contains("fading"));

        notifications.begin_fade(id);
        let html = render_page(&page(ListView::Empty, &store, &selection, &notifications));
        assert!(html.contains("message message-error fading"));
    }

    #[test]
    fn test_load_error_keeps_last_snapshot_visible() {
        let mut store = DocumentStore::new();
        store.replace_all(vec![document(1, "lab.pdf", 2048)]);
        let selection = SelectionState::default();
        let notifications = NotificationCenter::new();

        let text = render_text(&page(
            ListView::LoadError,
            &store,
            &selection,
            &notifications,
        ));

        assert!(text.contains("lab.pdf"));
    }

    #[test]
    fn test_text_view_shows_pending_selection() {
        let store = DocumentStore::new();
        let mut selection = SelectionState::default();
        selection.select(crate::features::portal::selection::PendingSelection::new(
            std::path::Path::new("scan.pdf"),
            &crate::shared::validation::ValidatedFile {
                filename: "scan.pdf".to_string(),
                size: 1536,
            },
        ));
        let notifications = NotificationCenter::new();

        let text = render_text(&page(ListView::Loading, &store, &selection, &notifications));

        assert!(text.contains("Selected: scan.pdf (1.5 KB)"));
        assert!(text.contains("Loading documents..."));
    }
}
