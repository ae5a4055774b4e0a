//! Fragment templates and placeholder substitution
//!
//! Templates mark insertion points with XML-comment syntax
//! (`<!--NAME-->`) rather than plain text markers, so a marker can sit
//! where ordinary text nodes would make the fragment invalid HTML, e.g.
//! row insertion directly inside `<table><!--DATA--></table>`.

mod document;

pub use document::*;

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::error::TemplateError;

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--(.*?)-->").expect("marker pattern is valid"));

/// What to substitute for a marker that has no mapped value.
///
/// The legacy component interpolated JavaScript `undefined` straight
/// into the markup; whether that was intentional is unknowable, so the
/// behavior is explicit here instead of implicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaceholderPolicy {
    /// Unmapped markers render the literal text `undefined`,
    /// byte-for-byte what the legacy component produced.
    Legacy,
    /// Unmapped markers render as the empty string.
    #[default]
    Empty,
    /// Unmapped markers are an error.
    Strict,
}

/// Replaces every `<!--NAME-->` marker in `template` with its mapped
/// value, leaving all non-marker content untouched.
///
/// Markers without a mapping are handled per `policy`.
///
/// # Example
///
/// ```
/// use taotable_lib::template::{placehold, PlaceholderPolicy};
///
/// let out = placehold(
///     "<td><!--CELLDATA--></td>",
///     &[("CELLDATA", "42")],
///     PlaceholderPolicy::Strict,
/// )
/// .unwrap();
/// assert_eq!(out, "<td>42</td>");
/// ```
pub fn placehold(
    template: &str,
    values: &[(&str, &str)],
    policy: PlaceholderPolicy,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut tail = 0;

    for caps in MARKER.captures_iter(template) {
        let marker = caps.get(0).expect("whole match always present");
        let name = &caps[1];
        out.push_str(&template[tail..marker.start()]);

        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => match policy {
                PlaceholderPolicy::Legacy => out.push_str("undefined"),
                PlaceholderPolicy::Empty => {}
                PlaceholderPolicy::Strict => return Err(TemplateError::unmapped(name)),
            },
        }
        tail = marker.end();
    }

    out.push_str(&template[tail..]);
    Ok(out)
}
