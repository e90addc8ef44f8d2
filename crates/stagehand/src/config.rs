//! View configuration and the registration builder.
//!
//! A [`ViewConfig`] declares everything a view needs: its name, where it
//! renders (`selector`), what it renders (`template` + `data`), and how it
//! reacts (`events`, `callback`, `on_hide`). Configs are consumed by
//! [`ViewRegistry::register`](crate::ViewRegistry::register), which validates
//! them, fills in defaults, and produces a live [`View`](crate::View) handle.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use stagehand::ViewConfig;
//!
//! let config = ViewConfig::new("hello")
//!     .selector("#hello-world")
//!     .template("hello-template")
//!     .data(json!({"name": "world"}))
//!     .on("click #btn", |_view, _event| {
//!         // react to the click
//!     });
//! assert_eq!(config.name(), "hello");
//! ```
//!
//! # Manifests
//!
//! The static fields (`name`, `selector`, `template`, `data`) can also be
//! loaded from a YAML manifest via [`ViewConfig::from_yaml`]; handlers and
//! hooks attach through the builder afterwards.

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::Value;

use stagehand_page::{Event, Target};

use crate::error::ViewError;
use crate::view::View;

/// Type alias for event handler functions.
///
/// Handlers receive the owning view handle explicitly alongside the event,
/// so they can re-enter `render`/`hide` or read the view's data.
pub type EventHandlerFn = Rc<dyn Fn(&View, &Event)>;

/// Type alias for the post-render callback.
///
/// The callback receives the owning view and the rendered target, and its
/// return value becomes the return value of `render`.
pub type RenderCallbackFn = Rc<dyn Fn(&View, Target) -> Target>;

/// Type alias for the post-hide hook.
pub type HideHookFn = Rc<dyn Fn(&View)>;

/// Declarative configuration for one view.
///
/// Only `name` is required. `selector` defaults to `"#" + name` and
/// `template` defaults to `name` at registration time; `data` defaults to
/// `Value::Null`.
#[derive(Clone)]
pub struct ViewConfig {
    pub(crate) name: String,
    pub(crate) selector: Option<String>,
    pub(crate) template: Option<String>,
    pub(crate) data: Value,
    pub(crate) events: Vec<(String, EventHandlerFn)>,
    pub(crate) render_callback: Option<RenderCallbackFn>,
    pub(crate) hide_hook: Option<HideHookFn>,
}

impl ViewConfig {
    /// Creates a config with the given name and all other fields unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selector: None,
            template: None,
            data: Value::Null,
            events: Vec::new(),
            render_callback: None,
            hide_hook: None,
        }
    }

    /// Sets the target selector. Defaults to `"#" + name` when unset.
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Sets the template identifier. Defaults to the view name when unset.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Sets the initial data payload.
    pub fn data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Adds an event handler under a descriptor like `"click"` or
    /// `"click #save"`.
    ///
    /// Attachment order is declaration order. Declaring the same descriptor
    /// twice replaces the earlier handler in place (last write wins).
    pub fn on<F>(mut self, descriptor: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&View, &Event) + 'static,
    {
        self.events.push((descriptor.into(), Rc::new(handler)));
        self
    }

    /// Sets the post-render callback.
    pub fn on_render<F>(mut self, callback: F) -> Self
    where
        F: Fn(&View, Target) -> Target + 'static,
    {
        self.render_callback = Some(Rc::new(callback));
        self
    }

    /// Sets the post-hide hook.
    pub fn on_hide<F>(mut self, hook: F) -> Self
    where
        F: Fn(&View) + 'static,
    {
        self.hide_hook = Some(Rc::new(hook));
        self
    }

    /// The configured view name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Loads the static fields of one or more view configs from a YAML list.
    ///
    /// Handlers and hooks cannot be expressed in a manifest; attach them with
    /// [`on`](Self::on) / [`on_render`](Self::on_render) /
    /// [`on_hide`](Self::on_hide) on the returned configs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stagehand::ViewConfig;
    ///
    /// let configs = ViewConfig::from_yaml(r##"
    /// - name: hello
    ///   selector: "#hello-world"
    ///   template: hello-template
    ///   data:
    ///     name: world
    /// - name: footer
    /// "##).unwrap();
    ///
    /// assert_eq!(configs.len(), 2);
    /// assert_eq!(configs[0].name(), "hello");
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Vec<Self>, ViewError> {
        let entries: Vec<ManifestEntry> = serde_yaml::from_str(yaml)?;
        Ok(entries.into_iter().map(ManifestEntry::into_config).collect())
    }
}

impl fmt::Debug for ViewConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewConfig")
            .field("name", &self.name)
            .field("selector", &self.selector)
            .field("template", &self.template)
            .field("data", &self.data)
            .field("event_count", &self.events.len())
            .field("has_callback", &self.render_callback.is_some())
            .field("has_hide_hook", &self.hide_hook.is_some())
            .finish()
    }
}

/// One entry in a YAML view manifest.
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
    #[serde(default)]
    selector: Option<String>,
    #[serde(default)]
    template: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

impl ManifestEntry {
    fn into_config(self) -> ViewConfig {
        ViewConfig {
            name: self.name,
            selector: self.selector,
            template: self.template,
            data: self.data.unwrap_or(Value::Null),
            events: Vec::new(),
            render_callback: None,
            hide_hook: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_builder() {
        let config = ViewConfig::new("hello")
            .selector("#hello-world")
            .template("hello-template")
            .data(json!({"name": "world"}))
            .on("click #btn", |_view, _event| {})
            .on_render(|_view, target| target)
            .on_hide(|_view| {});

        assert_eq!(config.name(), "hello");
        assert_eq!(config.selector.as_deref(), Some("#hello-world"));
        assert_eq!(config.template.as_deref(), Some("hello-template"));
        assert_eq!(config.data, json!({"name": "world"}));
        assert_eq!(config.events.len(), 1);
        assert!(config.render_callback.is_some());
        assert!(config.hide_hook.is_some());
    }

    #[test]
    fn test_config_defaults_unset() {
        let config = ViewConfig::new("bare");
        assert_eq!(config.selector, None);
        assert_eq!(config.template, None);
        assert_eq!(config.data, Value::Null);
        assert!(config.events.is_empty());
    }

    #[test]
    fn test_config_debug_shows_counts() {
        let config = ViewConfig::new("hello").on("click", |_view, _event| {});
        let debug = format!("{:?}", config);
        assert!(debug.contains("\"hello\""));
        assert!(debug.contains("event_count: 1"));
        assert!(debug.contains("has_callback: false"));
    }

    #[test]
    fn test_from_yaml_full_entry() {
        let configs = ViewConfig::from_yaml(
            r##"
- name: hello
  selector: "#hello-world"
  template: hello-template
  data:
    name: world
"##,
        )
        .unwrap();

        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].name(), "hello");
        assert_eq!(configs[0].selector.as_deref(), Some("#hello-world"));
        assert_eq!(configs[0].template.as_deref(), Some("hello-template"));
        assert_eq!(configs[0].data, json!({"name": "world"}));
    }

    #[test]
    fn test_from_yaml_minimal_entry() {
        let configs = ViewConfig::from_yaml("- name: footer").unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].name(), "footer");
        assert_eq!(configs[0].selector, None);
        assert_eq!(configs[0].data, Value::Null);
    }

    #[test]
    fn test_from_yaml_rejects_malformed() {
        let result = ViewConfig::from_yaml("- selector: \"#never-named\"");
        assert!(matches!(result, Err(ViewError::Manifest(_))));
    }
}
