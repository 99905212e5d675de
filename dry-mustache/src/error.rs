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

//! Error handling for template parsing and rendering
//!
//! Parse errors are fatal for the template unit being compiled: no partial
//! syntax tree is ever returned. Render-time misses (unresolved names,
//! unknown partials) are *not* errors; they degrade to empty output by
//! design. `RenderError` is reserved for faults raised by injected
//! collaborators such as a partial resolver.

use std::{error::Error, fmt::Display};

/// Returns the last 32 characters of a string for error context
pub(crate) fn rcap(src: &str) -> &str {
    static CAP_AT: usize = 32;

    if src.len() > CAP_AT {
        let mut at = src.len() - CAP_AT;
        while !src.is_char_boundary(at) {
            at += 1;
        }
        &src[at..]
    } else {
        src
    }
}

/// Error type for template parsing failures
///
/// Every variant aborts compilation of the template unit it occurred in.
#[derive(Debug)]
pub enum ParseError {
    /// An open delimiter with no matching close delimiter
    UnterminatedTag { context: String },
    /// A `{{/name}}` that does not match the nearest open section
    MismatchedSection { name: String, context: String },
    /// End of input reached with a section still open
    UnclosedSection { name: String },
    /// A malformed `{{=open close=}}` delimiter change
    InvalidDelimiters { spec: String, context: String },
}

impl ParseError {
    /// Creates an error for an unterminated tag, capturing the text leading
    /// up to it
    pub(crate) fn unterminated(preffix: &str) -> Self {
        Self::UnterminatedTag {
            context: rcap(preffix).to_string(),
        }
    }

    pub(crate) fn mismatched(name: &str, preffix: &str) -> Self {
        Self::MismatchedSection {
            name: name.to_string(),
            context: rcap(preffix).to_string(),
        }
    }

    pub(crate) fn unclosed(name: &str) -> Self {
        Self::UnclosedSection {
            name: name.to_string(),
        }
    }

    pub(crate) fn invalid_delimiters(spec: &str, preffix: &str) -> Self {
        Self::InvalidDelimiters {
            spec: spec.to_string(),
            context: rcap(preffix).to_string(),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedTag { context } => {
                write!(f, "unterminated tag near \"{}\"", context)
            }
            Self::MismatchedSection { name, context } => {
                write!(f, "unexpected {{{{/{}}}}} near \"{}\"", name, context)
            }
            Self::UnclosedSection { name } => {
                write!(f, "unclosed section {{{{#{}}}}}", name)
            }
            Self::InvalidDelimiters { spec, context } => {
                write!(f, "invalid delimiter change \"{}\" near \"{}\"", spec, context)
            }
        }
    }
}

impl Error for ParseError {}

/// Error type for faults raised while rendering
///
/// Only injected collaborators produce these: a failing partial resolver, or
/// rendering a name the `Library` does not hold. Missing data never does.
#[derive(Debug)]
pub struct RenderError {
    message: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn Error + 'static))
    }
}

/// Result type for template parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
