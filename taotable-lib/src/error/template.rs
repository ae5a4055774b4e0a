//! Template error types

/// Errors raised by template parsing and placeholder substitution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// The template document has no fragment with the given class name.
    #[error("template document has no fragment with class {class:?}")]
    MissingFragment {
        /// The `tpl-*` class name that was looked up.
        class: String,
    },

    /// A placeholder marker had no mapped value under the strict policy.
    #[error("no value mapped for placeholder <!--{name}-->")]
    UnmappedPlaceholder {
        /// The marker name inside `<!--` and `-->`.
        name: String,
    },
}

impl TemplateError {
    /// Creates a new missing-fragment error.
    pub fn missing_fragment(class: impl Into<String>) -> Self {
        Self::MissingFragment {
            class: class.into(),
        }
    }

    /// Creates a new unmapped-placeholder error.
    pub fn unmapped(name: impl Into<String>) -> Self {
        Self::UnmappedPlaceholder { name: name.into() }
    }
}
