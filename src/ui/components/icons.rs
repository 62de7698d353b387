//! SVG icons.
//!
//! Icons are rendered inline as SVG elements for styling flexibility.

fn svg(class: &str, body: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="{class}" aria-hidden="true">{body}</svg>"#
    )
}

/// Upload (arrow into tray) icon.
pub fn upload(class: &str) -> String {
    svg(
        class,
        r#"<path d="M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4"/><polyline points="17 8 12 3 7 8"/><line x1="12" y1="3" x2="12" y2="15"/>"#,
    )
}

/// Speech bubble icon for user messages.
pub fn message_square(class: &str) -> String {
    svg(
        class,
        r#"<path d="M21 15a2 2 0 0 1-2 2H7l-4 4V5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2z"/>"#,
    )
}

/// Document icon for assistant messages.
pub fn file_text(class: &str) -> String {
    svg(
        class,
        r#"<path d="M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z"/><polyline points="14 2 14 8 20 8"/><line x1="16" y1="13" x2="8" y2="13"/><line x1="16" y1="17" x2="8" y2="17"/>"#,
    )
}

/// Circled exclamation icon for error messages.
pub fn alert_circle(class: &str) -> String {
    svg(
        class,
        r#"<circle cx="12" cy="12" r="10"/><line x1="12" y1="8" x2="12" y2="12"/><line x1="12" y1="16" x2="12.01" y2="16"/>"#,
    )
}

/// Loader/spinner icon.
pub fn loader(class: &str) -> String {
    svg(
        &format!("{class} animate-spin"),
        r#"<path d="M21 12a9 9 0 1 1-6.219-8.56"/>"#,
    )
}
