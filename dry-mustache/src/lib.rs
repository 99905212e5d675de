//! Logic-less Mustache templates for Rust
//!
//! This crate parses Mustache template source into an immutable syntax tree
//! and renders it against JSON-shaped data. The language stays logic-less:
//! only existence/truthiness tests and iteration, no expressions and no
//! helpers.
//!
//! # Features
//!
//! - Variables with HTML escaping: `{{name}}`
//! - Unescaped variables: `{{{name}}}` and `{{&name}}`
//! - Sections and inverted sections: `{{#items}}...{{/items}}`,
//!   `{{^items}}...{{/items}}`
//! - Dotted names and the implicit iterator: `{{a.b.c}}`, `{{.}}`
//! - Comments: `{{! ignored }}`
//! - Partials with indentation: `{{>header}}`
//! - Delimiter changes: `{{=<% %>=}}`
//! - Standalone-line whitespace elision per the Mustache contract
//!
//! # Example
//!
//! ```rust
//! use dry_mustache::Library;
//! use serde_json::json;
//!
//! let mut library = Library::new();
//! library.add("item", "  <li>{{name}}</li>\n").unwrap();
//! library.add("list", "<ul>\n{{#items}}{{>item}}{{/items}}</ul>\n").unwrap();
//!
//! let html = library
//!     .render("list", &json!({"items": [{"name": "a"}, {"name": "<b>"}]}))
//!     .unwrap();
//! assert_eq!(html, "<ul>\n  <li>a</li>\n  <li>&lt;b&gt;</li>\n</ul>\n");
//! ```
//!
//! Templates are immutable once parsed and safe to share read-only across
//! threads. Data loading, HTML semantics and template discovery all live
//! outside the core: data arrives as [`serde_json::Value`] (or through
//! [`to_value`]), escaping is an injectable function, and partials come from
//! anything implementing [`Partials`].
//!
//! # Module Structure
//!
//! - `scanner.rs`: tag scanning with switchable delimiters
//! - `standalone.rs`: standalone-line whitespace normalization
//! - `parser.rs`: syntax tree construction
//! - `resolve.rs`: context stack and dotted-name resolution
//! - `render.rs`: tree evaluation, sections and partials
//! - `escape.rs`: default HTML escaping
//! - `error.rs`: parse and render error types

pub mod escape;
pub mod scanner;

mod error;
mod parser;
mod render;
mod resolve;
mod standalone;

use std::collections::HashMap;

pub use error::{ParseError, RenderError};
pub use parser::{Node, Template};
pub use render::{EscapeFn, NoPartials, Partials};
pub use serde_json::Value;

/// Compiles a template unit from source text
pub fn parse(name: &str, source: &str) -> Result<Template, ParseError> {
    Template::parse(name, source)
}

/// Encodes any serializable data into the context value model
pub fn to_value<T: serde::Serialize>(data: T) -> Result<Value, RenderError> {
    serde_json::to_value(data)
        .map_err(|err| RenderError::with_source("data did not encode to a context value", err))
}

/// An owned registry of parsed templates
///
/// Templates registered here see each other as partials. The registry is
/// immutable during rendering, so a populated `Library` can be shared
/// read-only across threads.
#[derive(Debug, Default)]
pub struct Library {
    templates: HashMap<String, Template>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and registers a template under a name
    pub fn add(&mut self, name: &str, source: &str) -> Result<(), ParseError> {
        self.insert(Template::parse(name, source)?);
        Ok(())
    }

    /// Registers an already parsed template under its own name
    pub fn insert(&mut self, template: Template) {
        self.templates.insert(template.name().to_string(), template);
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Renders a registered template with HTML escaping
    ///
    /// Rendering an unregistered name is a caller fault and fails; an
    /// unregistered *partial* referenced from inside a template still
    /// renders as nothing.
    pub fn render(&self, name: &str, data: &Value) -> Result<String, RenderError> {
        self.render_with(name, data, &escape::html)
    }

    /// Renders a registered template with an explicit escape function
    pub fn render_with(
        &self,
        name: &str,
        data: &Value,
        escape: &EscapeFn,
    ) -> Result<String, RenderError> {
        let template = self
            .get(name)
            .ok_or_else(|| RenderError::new(format!("no template named \"{}\"", name)))?;
        template.render_with(data, self, escape)
    }
}

impl Partials for Library {
    fn get(&self, name: &str) -> Result<Option<&Template>, RenderError> {
        Ok(self.templates.get(name))
    }
}
