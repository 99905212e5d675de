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

//! Context stack and dotted-name resolution
//!
//! A render call threads an explicit stack of borrowed scope values, pushed
//! and popped in lockstep with section entry and exit. Dotted names resolve
//! in two phases: the first segment walks the whole stack, most recent
//! scope first; every remaining segment is looked up only inside the value
//! the previous segment produced. A broken link anywhere yields a miss for
//! the whole expression, never an error.

use std::borrow::Cow;

use serde_json::Value;

/// The ordered scopes consulted during name resolution
///
/// Render-call-local; frames borrow from the root context for the duration
/// of one render.
pub(crate) struct Stack<'a> {
    frames: Vec<&'a Value>,
}

impl<'a> Stack<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { frames: vec![root] }
    }

    pub fn push(&mut self, value: &'a Value) {
        self.frames.push(value);
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Resolves a dotted name against the stack
    ///
    /// The special name `.` is the implicit iterator: the value on top of
    /// the stack itself.
    pub fn resolve(&self, name: &str) -> Option<&'a Value> {
        if name == "." {
            return self.frames.last().copied();
        }
        let mut parts = name.split('.');
        let head = parts.next()?;
        let mut value = self.lookup(head)?;
        for part in parts {
            value = match value {
                Value::Object(map) => map.get(part)?,
                _ => return None,
            };
        }
        Some(value)
    }

    /// Finds the first scope, most recent first, containing the key
    fn lookup(&self, key: &str) -> Option<&'a Value> {
        for frame in self.frames.iter().rev() {
            if let Value::Object(map) = frame {
                if let Some(value) = map.get(key) {
                    return Some(value);
                }
            }
        }
        None
    }
}

/// Truthiness for section gating
///
/// `null`, `false` and the empty list are falsey; everything else, `0` and
/// `""` included, is truthy.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

/// Interpolation text for a resolved value
///
/// Strings pass through verbatim; numbers keep their given precision;
/// falsey scalars produce nothing. Arrays and objects, left undefined by
/// the language, render as their compact JSON text.
pub(crate) fn stringify(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null | Value::Bool(false) => Cow::Borrowed(""),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nearest_scope_wins() {
        let root = json!({"name": "outer", "inner": {}});
        let shadow = json!({"name": "inner"});
        let mut stack = Stack::new(&root);
        stack.push(&shadow);
        assert_eq!(stack.resolve("name"), Some(&json!("inner")));
        stack.pop();
        assert_eq!(stack.resolve("name"), Some(&json!("outer")));
    }

    #[test]
    fn dotted_tail_never_reenters_the_stack() {
        // b.name exists only at the root; a.name must still miss
        let root = json!({"a": {}, "name": "root"});
        let stack = Stack::new(&root);
        assert_eq!(stack.resolve("a.name"), None);
    }

    #[test]
    fn broken_chain_is_a_miss() {
        let root = json!({"a": {"b": {}}});
        let stack = Stack::new(&root);
        assert_eq!(stack.resolve("a.b.c"), None);
        assert_eq!(stack.resolve("a.b"), Some(&json!({})));
        assert_eq!(stack.resolve("x.y.z"), None);
    }

    #[test]
    fn implicit_iterator() {
        let root = json!({"list": [1, 2]});
        let item = json!(2);
        let mut stack = Stack::new(&root);
        stack.push(&item);
        assert_eq!(stack.resolve("."), Some(&json!(2)));
    }

    #[test]
    fn truthiness() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!([])));
        assert!(truthy(&json!(0)));
        assert!(truthy(&json!("")));
        assert!(truthy(&json!({})));
        assert!(truthy(&json!([0])));
    }

    #[test]
    fn stringification() {
        assert_eq!(stringify(&json!("text")), "text");
        assert_eq!(stringify(&json!(3)), "3");
        assert_eq!(stringify(&json!(1.21)), "1.21");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&json!(false)), "");
        assert_eq!(stringify(&json!(null)), "");
    }
}
