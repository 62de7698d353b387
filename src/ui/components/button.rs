//! Button component with variants.

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Primary action button.
    #[default]
    Primary,
    /// Outline button.
    Outline,
}

impl ButtonVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "bg-blue-500 text-white hover:bg-blue-600",
            Self::Outline => "bg-transparent border text-gray-700 hover:bg-gray-50",
        }
    }
}

/// Submit button around already-escaped content.
pub fn button(variant: ButtonVariant, disabled: bool, content: &str) -> String {
    let base_classes = "inline-flex items-center gap-2 px-4 py-2 rounded-lg transition-colors \
                        disabled:opacity-50 disabled:cursor-not-allowed";
    let disabled = if disabled { " disabled" } else { "" };
    format!(
        r#"<button type="submit" class="{base_classes} {classes}"{disabled}>{content}</button>"#,
        classes = variant.classes(),
    )
}
