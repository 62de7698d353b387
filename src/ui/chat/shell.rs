//! Chat panel layout.

use crate::controller::ChatState;
use crate::ui::{APP_TITLE, components, escape};

use super::{message_list, query_form, upload_panel, upload_status};

/// The whole interactive panel: upload widget, status alert, messages and
/// query form inside one card.
///
/// Carries `data-loading` so scripts and tests can tell whether a request
/// was outstanding when it was rendered.
pub fn chat_panel(session_id: &str, state: &ChatState) -> String {
    let body = format!(
        r#"<div class="space-y-4">
{upload}
{status}
{messages}
{form}
</div>"#,
        upload = upload_panel(session_id, state),
        status = state.upload_status.as_ref().map(upload_status).unwrap_or_default(),
        messages = message_list(state),
        form = query_form(session_id, state),
    );

    format!(
        r#"<div id="chat-panel" data-session-id="{id}" data-loading="{loading}">
{card}
</div>"#,
        id = escape(session_id),
        loading = state.loading(),
        card = components::card(APP_TITLE, &body),
    )
}
