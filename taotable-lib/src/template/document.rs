//! Template documents
//!
//! The component's markup fragments live in an HTML template document:
//! one `<template>` element per fragment, identified by a `tpl-*` class
//! name. The legacy component read these out of the host document's
//! head; here the parsed [`TemplateSet`] is passed into the component
//! explicitly instead of being found through ambient document state.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::LoadError;
use crate::error::TemplateError;

/// The built-in template document, embedded at compile time.
pub const TEMPLATE_DOCUMENT: &str = include_str!("../../assets/tao-test-component.html");

/// The stylesheet the styles fragment points at, for hosts that want to
/// place it next to rendered output.
pub const STYLESHEET: &str = include_str!("../../assets/tao-test-component.css");

static FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<template[^>]*\bclass="([^"]*)"[^>]*>(.*?)</template>"#)
        .expect("fragment pattern is valid")
});

static BUILTIN: LazyLock<TemplateSet> = LazyLock::new(|| {
    TemplateSet::from_document(TEMPLATE_DOCUMENT).expect("embedded template document is complete")
});

/// The six markup fragments plus the header-cell selector string that a
/// component renders with. Immutable for the component's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    /// Component shell; markers `STYLES`, `TABLE`.
    pub component: String,
    /// Stylesheet link fragment, inserted as `STYLES`.
    pub styles: String,
    /// Table shell; markers `HEAD`, `DATA`.
    pub table: String,
    /// One header cell; markers `TEXT`, `CLASSES`.
    pub head_cell: String,
    /// One data row; marker `ROWDATA`.
    pub data_row: String,
    /// One data cell; marker `CELLDATA`.
    pub data_cell: String,
    /// CSS selector locating a header cell; marker `FIELDSELECTOR`.
    pub handled_selector: String,
}

impl TemplateSet {
    /// Returns the built-in template set.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Extracts a template set from an HTML template document.
    ///
    /// Each fragment is the inner content of a `<template>` element
    /// carrying the matching `tpl-*` class. A document missing any of
    /// the seven fragments is rejected.
    pub fn from_document(html: &str) -> Result<Self, TemplateError> {
        let mut fragments: HashMap<&str, &str> = HashMap::new();
        for caps in FRAGMENT.captures_iter(html) {
            let classes = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());
            for class in classes.split_whitespace() {
                fragments.entry(class).or_insert(body);
            }
        }

        let fragment = |class: &str| -> Result<String, TemplateError> {
            fragments
                .get(class)
                .map(|body| body.to_string())
                .ok_or_else(|| TemplateError::missing_fragment(class))
        };

        Ok(Self {
            component: fragment("tpl-component")?,
            styles: fragment("tpl-styles")?,
            table: fragment("tpl-table")?,
            head_cell: fragment("tpl-header-cell")?,
            data_row: fragment("tpl-data-row")?,
            data_cell: fragment("tpl-data-cell")?,
            handled_selector: fragment("tpl-selector")?,
        })
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Fetches a template document over HTTP.
///
/// The legacy module fetched its template HTML once at load time;
/// hosts that keep templates next to their data can do the same and
/// feed the body to [`TemplateSet::from_document`].
pub async fn fetch_document(url: &str) -> Result<String, LoadError> {
    let response = reqwest::get(url).await?;
    let status = response.status().as_u16();
    if status != 200 {
        return Err(LoadError::http(status, url));
    }
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_document_parses() {
        let set = TemplateSet::builtin();
        assert!(set.component.contains("<!--TABLE-->"));
        assert!(set.table.contains("<!--HEAD-->"));
        assert!(set.table.contains("<!--DATA-->"));
        assert!(set.head_cell.contains("<!--TEXT-->"));
        assert!(set.data_row.contains("<!--ROWDATA-->"));
        assert!(set.data_cell.contains("<!--CELLDATA-->"));
        assert!(set.handled_selector.contains("<!--FIELDSELECTOR-->"));
    }

    #[test]
    fn test_missing_fragment_is_named() {
        let err = TemplateSet::from_document("<html></html>").unwrap_err();
        assert_eq!(err, TemplateError::missing_fragment("tpl-component"));
    }

    #[test]
    fn test_extra_classes_and_attributes_are_tolerated() {
        let html = r#"
            <template id="c" class="fragment tpl-component">C<!--TABLE--></template>
            <template class="tpl-styles">S</template>
            <template class="tpl-table"><!--HEAD--><!--DATA--></template>
            <template class="tpl-header-cell"><th><!--TEXT--></th></template>
            <template class="tpl-data-row"><tr><!--ROWDATA--></tr></template>
            <template class="tpl-data-cell"><td><!--CELLDATA--></td></template>
            <template class="tpl-selector">th.<!--FIELDSELECTOR--></template>
        "#;
        let set = TemplateSet::from_document(html).unwrap();
        assert_eq!(set.component, "C<!--TABLE-->");
        assert_eq!(set.styles, "S");
    }
}
