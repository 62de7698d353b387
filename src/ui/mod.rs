//! Server-rendered HTML for the chat page.
//!
//! Everything here is a plain function from state to an HTML string. HTMX
//! posts the forms and swaps the returned `#chat-panel` fragment in place;
//! without JavaScript the same forms fall back to full-page posts.
//!
//! # Structure
//!
//! - [`page`]: full document shell
//! - [`components`]: card, alert, button, spinner and icon primitives
//! - [`chat`]: upload widget, status alert, message list and query form

pub mod chat;
pub mod components;

use crate::controller::ChatState;
use components::{AlertVariant, alert};

/// Page title.
pub const APP_TITLE: &str = "Document Q&A Chat";

/// Escape text for inclusion in HTML content or attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full page for a session.
pub fn page(session_id: &str, state: &ChatState) -> String {
    page_with_notice(session_id, state, None)
}

/// Render the full page with an optional notice above the chat panel.
pub fn page_with_notice(session_id: &str, state: &ChatState, notice: Option<&str>) -> String {
    let panel = chat::chat_panel(session_id, state);
    match notice {
        Some(notice) => {
            let notice = alert(AlertVariant::Default, &escape(notice));
            html_shell(APP_TITLE, &format!("{notice}\n{panel}"))
        }
        None => html_shell(APP_TITLE, &panel),
    }
}

/// Render a page that only shows a notice (unknown or expired session).
pub fn notice_page(message: &str) -> String {
    let content = components::card(
        APP_TITLE,
        &format!(
            r#"<p class="text-gray-700">{}</p>
<p class="mt-4"><a href="/" class="text-blue-600 hover:underline">Start a new chat</a></p>"#,
            escape(message)
        ),
    );
    html_shell(APP_TITLE, &content)
}

/// Generate the HTML shell around page content.
fn html_shell(title: &str, content: &str) -> String {
    let title = escape(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Ask questions about your documents">
    <title>{title}</title>

    <!-- HTMX (local, no CDN) -->
    <script src="/static/vendor/htmx.min.js"></script>
    <script src="/static/app.js"></script>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body class="min-h-screen bg-gray-50 py-8">
    <main id="app" class="max-w-4xl mx-auto p-4 space-y-4">
        {content}
    </main>
</body>
</html>"#
    )
}
