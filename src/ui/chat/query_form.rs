//! Question input form.

use crate::controller::{ChatMessage, ChatState};
use crate::ui::components::{ButtonVariant, button, spinner};
use crate::ui::escape;

use super::message_list::message_item;
use super::{PENDING_LABEL_TEMPLATE, PENDING_MESSAGE_TEMPLATE, disabled_attr, htmx_form_attrs};

/// Query form. Always rendered with an empty input; disabled until a file
/// has been uploaded and while a request is outstanding.
///
/// Carries the templates for the optimistic user bubble and button label.
pub fn query_form(session_id: &str, state: &ChatState) -> String {
    let action = format!("/sessions/{}/query", escape(session_id));
    let disabled = !state.query_enabled();
    let label = if state.loading() {
        spinner("Sending...")
    } else {
        "Send".to_string()
    };

    format!(
        r##"<form class="flex gap-2" action="{action}" method="post" hx-indicator="#thinking" {hx}>
    <input name="query" autocomplete="off" class="flex-1 border rounded-lg px-3 py-2 focus:outline-none focus:ring-2 focus:ring-blue-500 focus:border-transparent" placeholder="Ask a question about your documents..."{input_disabled}>
    {button}
    <template id="{PENDING_MESSAGE_TEMPLATE}">{pending_message}</template>
    <template id="{PENDING_LABEL_TEMPLATE}">{pending_label}</template>
</form>"##,
        hx = htmx_form_attrs(&action),
        pending_message = message_item(&ChatMessage::user("")),
        pending_label = spinner("Sending..."),
        input_disabled = disabled_attr(disabled),
        button = button(ButtonVariant::Primary, disabled, &label),
    )
}
