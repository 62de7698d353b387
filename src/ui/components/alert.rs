//! Alert component.

/// Alert visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertVariant {
    /// Neutral information.
    #[default]
    Default,
    /// Something went wrong.
    Destructive,
}

impl AlertVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Default => "bg-white text-gray-800 border-gray-200",
            Self::Destructive => "bg-red-50 text-red-800 border-red-300",
        }
    }

    fn role(self) -> &'static str {
        match self {
            Self::Default => "status",
            Self::Destructive => "alert",
        }
    }
}

/// Alert box around already-escaped content.
pub fn alert(variant: AlertVariant, content: &str) -> String {
    format!(
        r#"<div role="{role}" class="alert mt-4 rounded-lg border p-4 text-sm {classes}">{content}</div>"#,
        role = variant.role(),
        classes = variant.classes(),
    )
}
