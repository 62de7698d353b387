//! Upload widget and status alert.

use std::fmt::Write;

use crate::backend::UploadResult;
use crate::controller::ChatState;
use crate::ui::components::{AlertVariant, ButtonVariant, alert, button, icons, spinner};
use crate::ui::escape;

use super::{disabled_attr, htmx_form_attrs};

/// File types the picker offers.
pub const ACCEPTED_FILE_TYPES: &str = ".pdf,.txt";

/// Upload form. HTMX posts it as soon as files are picked; until HTMX has
/// loaded the "Upload" button submits it.
pub fn upload_panel(session_id: &str, state: &ChatState) -> String {
    let action = format!("/sessions/{}/upload", escape(session_id));
    let disabled = disabled_attr(!state.upload_enabled());
    let status = if state.loading() {
        spinner("Processing...")
    } else {
        format!(
            r#"<span class="htmx-indicator">{}</span>"#,
            spinner("Processing...")
        )
    };
    let uploaded = if state.files.is_empty() {
        String::new()
    } else {
        let names: Vec<String> = state.files.iter().map(|f| escape(&f.name)).collect();
        format!(
            r#"<span class="text-sm text-gray-500" title="{title}">{count} file(s) uploaded</span>"#,
            title = names.join(", "),
            count = state.files.len(),
        )
    };

    format!(
        r#"<form class="flex items-center gap-4" action="{action}" method="post" enctype="multipart/form-data" hx-encoding="multipart/form-data" hx-trigger="change" {hx}>
    <label class="flex items-center gap-2 cursor-pointer border rounded-lg p-2 hover:bg-gray-50 transition-colors">
        {icon}
        <span class="text-gray-700">Upload Files</span>
        <input type="file" name="files" multiple accept="{ACCEPTED_FILE_TYPES}" class="sr-only"{disabled}>
    </label>
    <span class="upload-fallback">{fallback}</span>
    {status}
    {uploaded}
</form>"#,
        hx = htmx_form_attrs(&action),
        icon = icons::upload("h-5 w-5 text-gray-600"),
        fallback = button(ButtonVariant::Outline, !state.upload_enabled(), "Upload"),
    )
}

/// Alert summarising the latest upload attempt.
///
/// Destructive when the attempt failed; one line per file result.
pub fn upload_status(result: &UploadResult) -> String {
    let variant = if result.is_failure() {
        AlertVariant::Destructive
    } else {
        AlertVariant::Default
    };

    let mut content = format!(r#"<div class="font-medium">{}</div>"#, escape(&result.message));
    if let Some(error) = &result.error {
        let _ = write!(content, r#"<div class="mt-1">{}</div>"#, escape(error));
    }
    for file in &result.results {
        let tone = if file.is_error() { " text-red-700" } else { "" };
        let _ = write!(
            content,
            r#"<div class="mt-1 text-sm{tone}">{}: {}"#,
            escape(&file.filename),
            escape(&file.status)
        );
        if let Some(message) = &file.message {
            let _ = write!(content, " - {}", escape(message));
        }
        if let Some(chunks) = file.processed_chunks {
            let _ = write!(content, " ({chunks} chunks)");
        }
        content.push_str("</div>");
    }

    alert(variant, &content)
}
