//! # Stagehand Render - Template Resolution and Rendering
//!
//! `stagehand-render` provides the template layer for the `stagehand` view
//! engine: named template registration, directory-based template discovery,
//! and rendering with serializable data.
//!
//! This crate is the rendering foundation for `stagehand`, but can be used
//! independently by any application that needs named markup templates.
//!
//! ## Core Concepts
//!
//! - [`Renderer`]: Pre-compile templates for repeated rendering
//! - [`TemplateEngine`]: Pluggable rendering backend trait
//! - [`MiniJinjaEngine`]: Default backend with full Jinja2-compatible syntax
//! - [`SubstEngine`]: Lightweight `{variable}` substitution backend
//! - [`TemplateRegistry`]: Name resolution across inline and file sources
//!
//! ## Quick Start
//!
//! ```rust
//! use stagehand_render::Renderer;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Card {
//!     title: String,
//!     count: usize,
//! }
//!
//! let mut renderer = Renderer::new();
//! renderer.add_template(
//!     "card",
//!     "<div class=\"card\"><h2>{{ title }}</h2><span>{{ count }}</span></div>",
//! ).unwrap();
//!
//! let output = renderer.render(
//!     "card",
//!     &Card { title: "Inbox".into(), count: 3 },
//! ).unwrap();
//! assert_eq!(output, "<div class=\"card\"><h2>Inbox</h2><span>3</span></div>");
//! ```
//!
//! ## File-Based Templates
//!
//! Templates can be discovered from directories and are resolved by relative
//! path without extension:
//!
//! ```rust,ignore
//! let mut renderer = Renderer::new();
//! renderer.add_template_dir("./templates")?;
//!
//! // Renders templates/widgets/card.html
//! let output = renderer.render("widgets/card", &data)?;
//! ```
//!
//! In debug builds, file-based templates are re-read from disk on each render
//! so template edits show up without recompiling.

mod engine;
mod error;
pub mod registry;
mod renderer;
mod subst;

pub use engine::{MiniJinjaEngine, TemplateEngine};
pub use error::RenderError;
pub use registry::{
    walk_template_dir, ResolvedTemplate, TemplateFile, TemplateRegistry, TEMPLATE_EXTENSIONS,
};
pub use renderer::Renderer;
pub use subst::SubstEngine;

use serde::Serialize;

/// Renders a one-off template string with the given data.
///
/// This is a convenience for rendering a template that isn't registered
/// anywhere. For repeated rendering, use [`Renderer`].
///
/// # Example
///
/// ```rust
/// use stagehand_render::render_str;
/// use serde_json::json;
///
/// let output = render_str(
///     "<li>{{ label }}</li>",
///     &json!({"label": "Buy milk"}),
/// ).unwrap();
/// assert_eq!(output, "<li>Buy milk</li>");
/// ```
pub fn render_str<T: Serialize>(template: &str, data: &T) -> Result<String, RenderError> {
    let engine = MiniJinjaEngine::new();
    let value = serde_json::to_value(data)?;
    engine.render_template(template, &value)
}
