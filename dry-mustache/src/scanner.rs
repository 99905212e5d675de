// MIT License
//
// Copyright (c) 2024 Jerome Johnson
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Mustache tag scanning
//!
//! This module splits raw template text into a lazy sequence of tags, each
//! carrying the text run that precedes it. Scanning honors the currently
//! active delimiter pair and must be re-invoked with the updated pair after
//! every delimiter change, since a change only applies from that point
//! forward.
//!
//! # Tag forms
//!
//! - Variables: `{{name}}`
//! - Unescaped variables: `{{{name}}}` or `{{&name}}`
//! - Sections: `{{#name}}...{{/name}}`
//! - Inverted sections: `{{^name}}...{{/name}}`
//! - Comments: `{{! comment }}`
//! - Partials: `{{>name}}`
//! - Delimiter changes: `{{=<% %>=}}`
//!
//! The triple-brace pair `{{{`/`}}}` always denotes unescaped interpolation,
//! regardless of the active delimiter pair.
//!
//! # Examples
//!
//! ```rust
//! use dry_mustache::scanner::{Delimiters, Tag, TagKind};
//!
//! let delims = Delimiters::default();
//! let tag = Tag::from("Hello {{name}}!", &delims).unwrap().unwrap();
//! assert_eq!(tag.kind, TagKind::Variable);
//! assert_eq!(tag.prefix, "Hello ");
//! assert_eq!(tag.content, "name");
//! assert_eq!(tag.postfix, "!");
//! ```

use crate::error::{ParseError, Result};

/// The default opening delimiter
pub const DEFAULT_OPEN: &str = "{{";
/// The default closing delimiter
pub const DEFAULT_CLOSE: &str = "}}";

const TRIPLE_OPEN: &str = "{{{";
const TRIPLE_CLOSE: &str = "}}}";

/// The active delimiter pair for one stretch of a template unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: DEFAULT_OPEN.to_string(),
            close: DEFAULT_CLOSE.to_string(),
        }
    }
}

impl Delimiters {
    /// Parses the body of a `{{=open close=}}` tag into a new pair
    ///
    /// Exactly two tokens separated by one run of whitespace; neither token
    /// may be empty or contain whitespace or `=`.
    pub(crate) fn changed(spec: &str, context: &str) -> Result<Self> {
        let mut parts = spec.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(open), Some(close), None) if !open.contains('=') && !close.contains('=') => {
                Ok(Self {
                    open: open.to_string(),
                    close: close.to_string(),
                })
            }
            _ => Err(ParseError::invalid_delimiters(spec, context)),
        }
    }
}

/// Kinds of Mustache tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// HTML-escaped interpolation: `{{name}}`
    Variable,
    /// Raw interpolation: `{{{name}}}` or `{{&name}}`
    Unescaped,
    /// Section open: `{{#name}}`
    SectionOpen,
    /// Inverted section open: `{{^name}}`
    InvertedOpen,
    /// Section close: `{{/name}}`
    SectionClose,
    /// Comment: `{{! ignored }}`
    Comment,
    /// Partial inclusion: `{{>name}}`
    Partial,
    /// Delimiter change: `{{=<% %>=}}`
    Delimiters,
}

/// A scanned tag occurrence
///
/// All fields borrow from the source text; nothing is copied until the tree
/// builder takes ownership.
#[derive(Debug, Clone, Copy)]
pub struct Tag<'a> {
    /// The kind of tag
    pub kind: TagKind,
    /// Text between the previous tag (or start of input) and this one
    pub prefix: &'a str,
    /// The tag content, trimmed, with the sigil stripped
    pub content: &'a str,
    /// Remaining text after the tag
    pub postfix: &'a str,
    /// The complete tag including delimiters
    pub raw: &'a str,
}

impl<'a> Tag<'a> {
    /// Scans the next tag from a template string
    ///
    /// Returns `Ok(None)` once no opening delimiter remains; the caller owns
    /// whatever text is left.
    pub fn from(src: &'a str, delims: &Delimiters) -> Result<Option<Self>> {
        let open_at = src.find(delims.open.as_str());
        let triple_at = src.find(TRIPLE_OPEN);
        let (start, triple) = match (open_at, triple_at) {
            (None, None) => return Ok(None),
            (Some(open), Some(triple)) if triple <= open => (triple, true),
            (None, Some(triple)) => (triple, true),
            (Some(open), _) => (open, false),
        };
        if triple {
            return Self::close(src, start, TRIPLE_OPEN, TRIPLE_CLOSE, TagKind::Unescaped);
        }
        Self::close(src, start, &delims.open, &delims.close, TagKind::Variable)
    }

    /// Scans the next tag after this one
    pub fn next(&self, delims: &Delimiters) -> Result<Option<Self>> {
        Self::from(self.postfix, delims)
    }

    /// Finds the closing delimiter and classifies the tag body
    fn close(
        src: &'a str,
        start: usize,
        open: &str,
        close: &str,
        kind: TagKind,
    ) -> Result<Option<Self>> {
        let body_start = start + open.len();
        let rest = &src[body_start..];
        let pos = match rest.find(close) {
            Some(pos) => pos,
            None => return Err(ParseError::unterminated(&src[..body_start])),
        };
        let end = body_start + pos + close.len();
        let mut content = rest[..pos].trim();
        let mut kind = kind;
        if kind != TagKind::Unescaped {
            (kind, content) = Self::classify(content, &src[..body_start])?;
        }
        Ok(Some(Self {
            kind,
            prefix: &src[..start],
            content,
            postfix: &src[end..],
            raw: &src[start..end],
        }))
    }

    /// Reads the sigil at the start of the tag body
    fn classify(content: &'a str, context: &str) -> Result<(TagKind, &'a str)> {
        let mut chars = content.chars();
        let kind = match chars.next() {
            Some('#') => TagKind::SectionOpen,
            Some('^') => TagKind::InvertedOpen,
            Some('/') => TagKind::SectionClose,
            Some('!') => TagKind::Comment,
            Some('>') => TagKind::Partial,
            Some('&') => TagKind::Unescaped,
            Some('=') => {
                // {{=open close=}}: the body carries its own trailing =
                let inner = chars.as_str();
                return match inner.strip_suffix('=') {
                    Some(spec) => Ok((TagKind::Delimiters, spec.trim())),
                    None => Err(ParseError::invalid_delimiters(content, context)),
                };
            }
            _ => return Ok((TagKind::Variable, content)),
        };
        Ok((kind, chars.as_str().trim()))
    }
}
