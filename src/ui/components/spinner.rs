//! Spinner with a label.

use super::icons;
use crate::ui::escape;

/// Inline spinner followed by a short label ("Processing...", "Thinking...").
pub fn spinner(label: &str) -> String {
    format!(
        r#"<span class="spinner flex items-center gap-2 text-gray-600">{icon}<span>{label}</span></span>"#,
        icon = icons::loader("h-4 w-4"),
        label = escape(label),
    )
}
