//! Plain substitution engine using format-string style placeholders.
//!
//! This module provides [`SubstEngine`], a lightweight template engine that uses
//! `{variable}` syntax for variable substitution. It's much lighter than MiniJinja
//! and suitable for small markup fragments that don't need loops, conditionals,
//! or filters.
//!
//! # Syntax
//!
//! - `{name}` - Simple variable substitution
//! - `{user.name}` - Nested property access via dot notation
//! - `{items.0}` - Array index access
//! - `{{` and `}}` - Escaped braces (renders as `{` and `}`)
//!
//! # Example
//!
//! ```rust
//! use stagehand_render::{SubstEngine, TemplateEngine};
//! use serde_json::json;
//!
//! let engine = SubstEngine::new();
//! let data = json!({"title": "Inbox", "user": {"email": "test@example.com"}});
//!
//! let output = engine.render_template(
//!     "<h1>{title}</h1><span>{user.email}</span>",
//!     &data,
//! ).unwrap();
//!
//! assert_eq!(output, "<h1>Inbox</h1><span>test@example.com</span>");
//! ```
//!
//! # Limitations
//!
//! SubstEngine intentionally does NOT support:
//! - Loops (`{% for %}`)
//! - Conditionals (`{% if %}`)
//! - Filters (`| upper`)
//! - Template includes
//!
//! For these features, use [`MiniJinjaEngine`](crate::MiniJinjaEngine).

use std::collections::HashMap;

use crate::error::RenderError;

use super::TemplateEngine;

/// A lightweight template engine using format-string style substitution.
///
/// This engine provides simple `{variable}` substitution without the overhead
/// of a full template engine. It's ideal for:
///
/// - Small markup fragments
/// - Status lines and labels
/// - Test fixtures where template logic would be noise
///
/// # Example
///
/// ```rust
/// use stagehand_render::{SubstEngine, TemplateEngine};
/// use serde_json::json;
///
/// let engine = SubstEngine::new();
/// let data = json!({"status": "ok", "count": 42});
///
/// let output = engine.render_template(
///     "Status: {status}, Count: {count}",
///     &data,
/// ).unwrap();
///
/// assert_eq!(output, "Status: ok, Count: 42");
/// ```
pub struct SubstEngine {
    templates: HashMap<String, String>,
}

impl SubstEngine {
    /// Creates a new SubstEngine with no stored templates.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Resolves a dotted path in a JSON value.
    ///
    /// Supports:
    /// - Simple keys: `name`
    /// - Nested objects: `user.profile.name`
    /// - Array indices: `items.0` or `items.0.name`
    fn lookup_path<'a>(value: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
        let mut current = value;

        for part in path.split('.') {
            current = match current {
                serde_json::Value::Object(map) => map.get(part)?,
                serde_json::Value::Array(arr) => {
                    let index: usize = part.parse().ok()?;
                    arr.get(index)?
                }
                _ => return None,
            };
        }

        Some(current)
    }

    /// Formats a JSON value as a string for output.
    fn value_text(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Null => String::new(),
            // For arrays and objects, use JSON representation
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => value.to_string(),
        }
    }

    fn substitute(&self, template: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        let mut result = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == '{' {
                if chars.peek() == Some(&'{') {
                    // Escaped brace: {{ -> {
                    chars.next();
                    result.push('{');
                } else {
                    let mut var_name = String::new();
                    let mut found_close = false;

                    for inner_ch in chars.by_ref() {
                        if inner_ch == '}' {
                            found_close = true;
                            break;
                        }
                        var_name.push(inner_ch);
                    }

                    if !found_close {
                        return Err(RenderError::TemplateError(format!(
                            "Unclosed variable substitution: {{{}",
                            var_name
                        )));
                    }

                    let var_name = var_name.trim();

                    if var_name.is_empty() {
                        return Err(RenderError::TemplateError(
                            "Empty variable name in template".to_string(),
                        ));
                    }

                    match Self::lookup_path(data, var_name) {
                        Some(v) => result.push_str(&Self::value_text(v)),
                        None => {
                            // Variable not found - leave placeholder for debugging
                            result.push_str(&format!("{{{}}}", var_name));
                        }
                    }
                }
            } else if ch == '}' {
                if chars.peek() == Some(&'}') {
                    // Escaped brace: }} -> }
                    chars.next();
                    result.push('}');
                } else {
                    // Stray closing brace - just include it
                    result.push(ch);
                }
            } else {
                result.push(ch);
            }
        }

        Ok(result)
    }
}

impl Default for SubstEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for SubstEngine {
    fn render_template(
        &self,
        template: &str,
        data: &serde_json::Value,
    ) -> Result<String, RenderError> {
        self.substitute(template, data)
    }

    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.templates.insert(name.to_string(), source.to_string());
        Ok(())
    }

    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| RenderError::TemplateNotFound(name.to_string()))?;
        self.substitute(template, data)
    }

    fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}
