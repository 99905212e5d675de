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

//! Template evaluation
//!
//! A depth-first walk of the parsed tree against a context stack and an
//! output sink. Sections push one scope per rendered body and pop it
//! immediately after; partials render against the caller's stack, never a
//! fresh one. Unresolved names and unknown partials render nothing; only
//! injected collaborators can fail a render.
//!
//! Standalone partials re-apply their captured indentation to the partial's
//! own source lines before rendering. Lines introduced by interpolated
//! values are deliberately not re-indented, matching the Mustache
//! whitespace contract, and nested standalone partials accumulate
//! indentation naturally.

use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::Value;

use crate::error::RenderError;
use crate::parser::{Node, Template};
use crate::resolve::{Stack, stringify, truthy};

/// The injectable escaping capability applied to `{{name}}` interpolations
pub type EscapeFn = dyn for<'s> Fn(&'s str) -> Cow<'s, str>;

/// Supplies templates for `{{>name}}` inclusions
///
/// `Ok(None)` is not an error: the partial simply renders nothing. An `Err`
/// aborts the render. The core applies no recursion limit; an implementor
/// serving self-referential templates is responsible for bounding depth.
pub trait Partials {
    fn get(&self, name: &str) -> Result<Option<&Template>, RenderError>;
}

/// The empty partial namespace
pub struct NoPartials;

impl Partials for NoPartials {
    fn get(&self, _name: &str) -> Result<Option<&Template>, RenderError> {
        Ok(None)
    }
}

impl Partials for HashMap<String, Template> {
    fn get(&self, name: &str) -> Result<Option<&Template>, RenderError> {
        Ok(HashMap::get(self, name))
    }
}

impl Template {
    /// Renders against a data context with HTML escaping and no partials
    pub fn render(&self, data: &Value) -> Result<String, RenderError> {
        self.render_with(data, &NoPartials, &crate::escape::html)
    }

    /// Renders with an explicit partial source and escape function
    pub fn render_with<P>(
        &self,
        data: &Value,
        partials: &P,
        escape: &EscapeFn,
    ) -> Result<String, RenderError>
    where
        P: Partials + ?Sized,
    {
        let renderer = Renderer { partials, escape };
        let mut stack = Stack::new(data);
        let mut out = String::new();
        renderer.render_nodes(self.root(), &mut stack, &mut out)?;
        Ok(out)
    }
}

struct Renderer<'a, P: Partials + ?Sized> {
    partials: &'a P,
    escape: &'a EscapeFn,
}

impl<'a, P: Partials + ?Sized> Renderer<'a, P> {
    fn render_nodes<'v>(
        &self,
        nodes: &[Node],
        stack: &mut Stack<'v>,
        out: &mut String,
    ) -> Result<(), RenderError> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Interpolate { name, escape } => {
                    if let Some(value) = stack.resolve(name) {
                        let text = stringify(value);
                        if *escape {
                            out.push_str(&(self.escape)(&text));
                        } else {
                            out.push_str(&text);
                        }
                    }
                }
                Node::Section {
                    name,
                    inverted,
                    body,
                } => self.render_section(name, *inverted, body, stack, out)?,
                Node::Partial { name, indent } => {
                    if let Some(template) = self.partials.get(name)? {
                        self.expand_partial(template, indent, stack, out)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn render_section<'v>(
        &self,
        name: &str,
        inverted: bool,
        body: &[Node],
        stack: &mut Stack<'v>,
        out: &mut String,
    ) -> Result<(), RenderError> {
        let value = stack.resolve(name);
        if inverted {
            // rendered once, against the unmodified stack
            if value.is_none_or(|v| !truthy(v)) {
                self.render_nodes(body, stack, out)?;
            }
            return Ok(());
        }
        let Some(value) = value else {
            return Ok(());
        };
        match value {
            Value::Array(items) => {
                for item in items {
                    stack.push(item);
                    let rendered = self.render_nodes(body, stack, out);
                    stack.pop();
                    rendered?;
                }
            }
            _ if truthy(value) => {
                stack.push(value);
                let rendered = self.render_nodes(body, stack, out);
                stack.pop();
                rendered?;
            }
            _ => {}
        }
        Ok(())
    }

    fn expand_partial<'v>(
        &self,
        template: &Template,
        indent: &str,
        stack: &mut Stack<'v>,
        out: &mut String,
    ) -> Result<(), RenderError> {
        if indent.is_empty() {
            return self.render_nodes(template.root(), stack, out);
        }
        let indented = indent_lines(template.source(), indent);
        let reparsed = Template::parse(template.name(), &indented).map_err(|err| {
            RenderError::with_source(
                format!("re-indenting partial \"{}\" failed", template.name()),
                err,
            )
        })?;
        self.render_nodes(reparsed.root(), stack, out)
    }
}

/// Prefixes every source line with the captured indentation
///
/// Nothing follows a final trailing newline, so it gains no prefix.
fn indent_lines(source: &str, indent: &str) -> String {
    let mut out = String::with_capacity(source.len() + indent.len() * 4);
    for line in source.split_inclusive('\n') {
        out.push_str(indent);
        out.push_str(line);
    }
    out
}
