//! Chat-specific fragments.
//!
//! [`chat_panel`] is the unit HTMX swaps: every form inside it targets
//! `#chat-panel` and receives a freshly rendered panel in response.

mod message_list;
mod query_form;
mod shell;
mod upload_panel;

pub use message_list::message_list;
pub use query_form::query_form;
pub use shell::chat_panel;
pub use upload_panel::{upload_panel, upload_status};

/// Template `static/app.js` clones into the message list while a query is
/// in flight.
const PENDING_MESSAGE_TEMPLATE: &str = "pending-user-message";

/// Template `static/app.js` swaps into the send button while a query is in
/// flight.
const PENDING_LABEL_TEMPLATE: &str = "pending-send-label";

/// ` disabled` when `disabled` is set, otherwise nothing.
fn disabled_attr(disabled: bool) -> &'static str {
    if disabled { " disabled" } else { "" }
}

/// HTMX attributes shared by the panel forms.
///
/// Requests replace the whole panel, disable every control while in flight,
/// and drop new submissions until the current one settles.
fn htmx_form_attrs(action: &str) -> String {
    format!(
        r##"hx-post="{action}" hx-target="#chat-panel" hx-swap="outerHTML" hx-sync="#chat-panel:drop" hx-disabled-elt="#chat-panel input, #chat-panel button""##
    )
}
