//! HTML escaping
//!
//! Escaping is an injected capability of the renderer; this module only
//! supplies the default. Anything implementing the `EscapeFn` signature can
//! replace it, including the identity function for non-HTML output.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static UNSAFE: Lazy<Regex> = Lazy::new(|| Regex::new("[&<>\"']").unwrap());

/// Escapes the HTML-significant characters `& < > " '`
pub fn html(text: &str) -> Cow<'_, str> {
    UNSAFE.replace_all(text, |captures: &Captures| match &captures[0] {
        "&" => "&amp;",
        "<" => "&lt;",
        ">" => "&gt;",
        "\"" => "&quot;",
        _ => "&#39;",
    })
}

/// Passes text through untouched
pub fn none(text: &str) -> Cow<'_, str> {
    Cow::Borrowed(text)
}
