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

//! Standalone-line whitespace normalization
//!
//! A tag is "standalone" when it is the only non-whitespace content on its
//! source line. Standalone comment, section, partial and delimiter-change
//! tags contribute no line to the output: the leading whitespace run and the
//! trailing newline are both elided. Partials are the one exception on the
//! leading side: their indentation is not discarded but captured, to be
//! re-applied to every line the partial expands to.
//!
//! Interpolation tags are never standalone-eligible; `{{name}}` alone on a
//! line keeps its surrounding whitespace.

use crate::scanner::{Tag, TagKind};

/// The outcome of classifying one tag occurrence
#[derive(Debug, Clone, Copy)]
pub(crate) struct Trim<'a> {
    /// Text to emit for the run preceding the tag
    pub text: &'a str,
    /// Captured indentation, non-empty only for standalone partials
    pub indent: &'a str,
    /// Where scanning resumes; past the trailing newline when standalone
    pub postfix: &'a str,
    /// Whether the tag stood alone on its line
    pub standalone: bool,
}

fn horizontal(s: &str) -> bool {
    s.bytes().all(|b| b == b' ' || b == b'\t')
}

/// Classifies a tag and computes the whitespace to strip
///
/// `at_line_start` reports whether the scan position before `tag.prefix` sat
/// at the beginning of a line; a tag preceded on its own line by another tag
/// is never standalone.
pub(crate) fn classify<'a>(tag: &Tag<'a>, at_line_start: bool) -> Trim<'a> {
    let kept = Trim {
        text: tag.prefix,
        indent: "",
        postfix: tag.postfix,
        standalone: false,
    };
    if !eligible(tag.kind) {
        return kept;
    }
    // Everything from the last newline (or start of line) to the open
    // delimiter must be horizontal whitespace.
    let (text, line) = match tag.prefix.rfind('\n') {
        Some(at) => tag.prefix.split_at(at + 1),
        None if at_line_start => ("", tag.prefix),
        None => return kept,
    };
    if !horizontal(line) {
        return kept;
    }
    // Everything from the close delimiter to the next newline or the end of
    // input must be horizontal whitespace; the newline itself is consumed.
    let after = tag.postfix.trim_start_matches([' ', '\t']);
    let postfix = if after.is_empty() {
        after
    } else if let Some(rest) = after.strip_prefix("\r\n") {
        rest
    } else if let Some(rest) = after.strip_prefix('\n') {
        rest
    } else {
        return kept;
    };
    let indent = if tag.kind == TagKind::Partial { line } else { "" };
    Trim {
        text,
        indent,
        postfix,
        standalone: true,
    }
}

fn eligible(kind: TagKind) -> bool {
    matches!(
        kind,
        TagKind::Comment
            | TagKind::SectionOpen
            | TagKind::InvertedOpen
            | TagKind::SectionClose
            | TagKind::Partial
            | TagKind::Delimiters
    )
}
