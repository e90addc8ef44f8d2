//! # Stagehand - View Lifecycle Engine
//!
//! Stagehand manages named views: declarative bindings of a template, a page
//! target, a data payload, and a set of event handlers, with a render/hide
//! lifecycle that keeps the handlers consistent with the view's presence in
//! the page. It provides:
//!
//! - A [`ViewRegistry`] of named view declarations with validation and
//!   field defaults
//! - A render/hide state machine per view with idempotent handler
//!   (re)binding: re-rendering never stacks duplicate handlers
//! - Delegated event descriptors (`"click #save"`) that survive content
//!   replacement
//! - MiniJinja template rendering with memoized compilation, plus a
//!   dependency-light substitution engine
//! - An in-memory [`Page`] model with synchronous event dispatch, so the
//!   whole lifecycle is testable end to end without a browser
//!
//! The page is a boundary: anything implementing [`Binder`] can stand in
//! for the built-in model.
//!
//! ## Core Concepts
//!
//! - [`ViewConfig`]: declarative description of one view (name, selector,
//!   template, data, events, hooks)
//! - [`ViewRegistry`]: owns the name → view mapping and the shared
//!   [`Renderer`] and [`Binder`] handles
//! - [`View`]: cheap cloneable handle driving render/hide on one entity
//! - [`Target`]: handle to the rendered slot, returned by render and passed
//!   to callbacks
//! - [`Page`]: in-memory binder implementation with
//!   [`dispatch`](Page::dispatch) for simulating events
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use serde_json::json;
//! use stagehand::{Binder, Page, ViewConfig, ViewRegistry};
//!
//! let page = Rc::new(Page::new());
//! let mut registry = ViewRegistry::new(page.clone());
//! registry
//!     .renderer()
//!     .borrow_mut()
//!     .add_template("hello-template", "<p>Hello, {{ name }}!</p>")?;
//!
//! let view = registry.register(
//!     ViewConfig::new("hello")
//!         .selector("#hello-world")
//!         .template("hello-template")
//!         .data(json!({"name": "world"}))
//!         .on("click #btn", |view, _event| {
//!             println!("{} was clicked", view.name());
//!         }),
//! )?;
//!
//! view.render()?;
//! assert_eq!(
//!     page.content("#hello-world").as_deref(),
//!     Some("<p>Hello, world!</p>")
//! );
//!
//! // Simulate a click bubbling from #btn
//! page.dispatch("#hello-world", "click", Some("#btn"));
//!
//! view.hide();
//! assert!(!view.is_active());
//! # Ok::<(), stagehand::ViewError>(())
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//! register(config)          render() / render_with(data)
//!   validate + defaults  →    resolve template → inject markup → show
//!   entity created            detach stale handlers → attach handlers
//!   (inactive)                active = true → callback
//!
//!                           hide()
//!                             detach handlers → clear → hide
//!                             active = false → on_hide
//! ```
//!
//! Handlers receive the owning [`View`] handle and may call `render` or
//! `hide` on it from inside a dispatch.
//!
//! ## Manifests
//!
//! The static part of a view declaration can live in YAML:
//!
//! ```rust
//! use std::rc::Rc;
//! use stagehand::{Page, ViewRegistry};
//!
//! let mut registry = ViewRegistry::new(Rc::new(Page::new()));
//! let views = registry.register_manifest(r##"
//! - name: hello
//!   selector: "#hello-world"
//!   template: hello-template
//!   data:
//!     name: world
//! - name: footer
//! "##)?;
//! assert_eq!(views.len(), 2);
//! # Ok::<(), stagehand::ViewError>(())
//! ```

mod config;
mod error;
mod events;
mod registry;
mod view;

pub use config::{EventHandlerFn, HideHookFn, RenderCallbackFn, ViewConfig};
pub use error::{Result, ViewError};
pub use events::EventKey;
pub use registry::ViewRegistry;
pub use view::View;

// Re-export the rendering layer from stagehand-render
pub use stagehand_render::{
    render_str,
    walk_template_dir,
    MiniJinjaEngine,
    RenderError,
    Renderer,
    ResolvedTemplate,
    SubstEngine,
    TemplateEngine,
    TemplateFile,
    TemplateRegistry,
    TEMPLATE_EXTENSIONS,
};

// Re-export the page surface from stagehand-page
pub use stagehand_page::{Binder, Event, HandlerFn, Page, Target};
