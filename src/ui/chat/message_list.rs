//! Conversation history.

use crate::controller::{ChatMessage, ChatState};
use crate::ui::components::{icons, spinner};
use crate::ui::escape;

/// Scrollable list of messages, with a "Thinking..." bubble while a request
/// is outstanding.
pub fn message_list(state: &ChatState) -> String {
    let mut items: Vec<String> = state.messages.iter().map(message_item).collect();

    let thinking = r#"<div class="flex justify-start"><div class="bg-gray-100 p-3 rounded-lg">"#;
    if state.loading() {
        items.push(format!("{thinking}{}</div></div>", spinner("Thinking...")));
    } else {
        items.push(format!(
            r#"<div id="thinking" class="htmx-indicator">{thinking}{}</div></div></div>"#,
            spinner("Thinking...")
        ));
    }

    format!(
        r#"<div id="message-list" class="border rounded-lg p-4 h-96 overflow-y-auto space-y-4 bg-white" aria-live="polite" aria-label="Chat messages">
{}
</div>"#,
        items.join("\n")
    )
}

/// One message bubble.
pub(super) fn message_item(message: &ChatMessage) -> String {
    let (kind, align, bubble, icon) = match message {
        ChatMessage::User { .. } => (
            "user",
            "justify-end",
            "bg-blue-500 text-white",
            icons::message_square("h-4 w-4 mt-1"),
        ),
        ChatMessage::Assistant { .. } => (
            "assistant",
            "justify-start",
            "bg-gray-100 text-gray-800",
            icons::file_text("h-4 w-4 mt-1"),
        ),
        ChatMessage::Error { .. } => (
            "error",
            "justify-start",
            "bg-red-100 text-red-800",
            icons::alert_circle("h-4 w-4 mt-1"),
        ),
    };

    let sources = message
        .sources()
        .map(|s| {
            format!(
                r#"<div class="message-sources text-sm mt-2 text-gray-600 whitespace-pre-wrap">{}</div>"#,
                escape(s)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="message flex gap-2 {align}" data-type="{kind}">
    <div class="max-w-[80%] p-3 rounded-lg {bubble}">
        <div class="flex items-start gap-2">
            {icon}
            <div>
                <div class="message-content whitespace-pre-wrap">{content}</div>{sources}
            </div>
        </div>
    </div>
</div>"#,
        content = escape(message.content()),
    )
}
