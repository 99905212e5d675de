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

//! Template tree construction
//!
//! The tree builder consumes normalized tags and produces an immutable,
//! exclusively owned syntax tree. A transient stack tracks the insertion
//! point while sections are open; it never survives parsing. Delimiter
//! changes mutate parser state and emit no node: the scanner is simply
//! re-invoked with the new pair from that point forward.

use std::mem;

use crate::error::{ParseError, Result};
use crate::scanner::{Delimiters, Tag, TagKind};
use crate::standalone;

/// A node of the parsed template tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, emitted verbatim
    Text(String),
    /// Variable interpolation; `escape` is false for `{{{name}}}`/`{{&name}}`
    Interpolate { name: String, escape: bool },
    /// A section (or inverted section) owning its body outright
    Section {
        name: String,
        inverted: bool,
        body: Vec<Node>,
    },
    /// A partial inclusion with its captured indentation prefix
    Partial { name: String, indent: String },
}

/// A parsed, named template unit
///
/// Immutable after construction and safe to share read-only across threads.
/// The source text is retained so partial inclusion can re-apply indentation
/// to the template's own lines.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    source: String,
    root: Vec<Node>,
}

impl Template {
    /// Compiles a template unit from source text
    ///
    /// The name is an opaque identifier used for partial lookups; no
    /// filesystem semantics are implied.
    pub fn parse(name: &str, source: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            source: source.to_string(),
            root: parse_nodes(source)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    /// The root node list of the tree
    pub fn root(&self) -> &[Node] {
        &self.root
    }
}

/// One open section while parsing: its name, polarity and the node list the
/// finished section will be appended to
struct OpenSection {
    name: String,
    inverted: bool,
    outer: Vec<Node>,
}

fn parse_nodes(source: &str) -> Result<Vec<Node>> {
    let mut delims = Delimiters::default();
    let mut current: Vec<Node> = Vec::new();
    let mut stack: Vec<OpenSection> = Vec::new();
    let mut rest = source;
    let mut at_line_start = true;

    while let Some(tag) = Tag::from(rest, &delims)? {
        let trim = standalone::classify(&tag, at_line_start);
        if !trim.text.is_empty() {
            current.push(Node::Text(trim.text.to_string()));
        }
        rest = trim.postfix;
        at_line_start = trim.standalone;

        match tag.kind {
            TagKind::Variable => current.push(Node::Interpolate {
                name: tag.content.to_string(),
                escape: true,
            }),
            TagKind::Unescaped => current.push(Node::Interpolate {
                name: tag.content.to_string(),
                escape: false,
            }),
            TagKind::SectionOpen | TagKind::InvertedOpen => stack.push(OpenSection {
                name: tag.content.to_string(),
                inverted: tag.kind == TagKind::InvertedOpen,
                outer: mem::take(&mut current),
            }),
            TagKind::SectionClose => {
                let open = match stack.pop() {
                    Some(open) if open.name == tag.content => open,
                    _ => return Err(ParseError::mismatched(tag.content, tag.prefix)),
                };
                let body = mem::replace(&mut current, open.outer);
                current.push(Node::Section {
                    name: open.name,
                    inverted: open.inverted,
                    body,
                });
            }
            TagKind::Comment => {}
            TagKind::Partial => current.push(Node::Partial {
                name: tag.content.to_string(),
                indent: trim.indent.to_string(),
            }),
            TagKind::Delimiters => {
                delims = Delimiters::changed(tag.content, tag.prefix)?;
            }
        }
    }
    if !rest.is_empty() {
        current.push(Node::Text(rest.to_string()));
    }
    if let Some(open) = stack.last() {
        return Err(ParseError::unclosed(&open.name));
    }
    Ok(current)
}
