//! Card component with header and content.

use crate::ui::escape;

/// Card with a title header and arbitrary body HTML.
///
/// `body` is inserted as-is and must already be escaped.
pub fn card(title: &str, body: &str) -> String {
    format!(
        r#"<div class="rounded-xl border bg-white shadow-lg">
    <div class="flex flex-col space-y-1.5 p-6 bg-gray-50 border-b">
        <h1 class="text-xl font-semibold text-gray-800">{title}</h1>
    </div>
    <div class="p-6">
        {body}
    </div>
</div>"#,
        title = escape(title),
    )
}
