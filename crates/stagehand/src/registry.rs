//! The view registry.
//!
//! [`ViewRegistry`] owns the mapping from view name to entity, validates
//! configurations, applies field defaults, and hands out live [`View`]
//! handles. It also owns the shared [`Renderer`] and binder handles every
//! view it creates renders through.
//!
//! The registry is an explicit instance: construct one where the application
//! is composed and pass it by reference to whoever registers or looks up
//! views.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use stagehand_page::Binder;
use stagehand_render::Renderer;

use crate::config::{EventHandlerFn, ViewConfig};
use crate::error::{Result, ViewError};
use crate::events::EventKey;
use crate::view::{View, ViewParts};

/// Registry of named views.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use serde_json::json;
/// use stagehand::{Binder, Page, ViewConfig, ViewRegistry};
///
/// let page = Rc::new(Page::new());
/// let mut registry = ViewRegistry::new(page.clone());
/// registry
///     .renderer()
///     .borrow_mut()
///     .add_template("hello", "Hi, {{ who }}!")?;
///
/// let view = registry.register(
///     ViewConfig::new("hello").data(json!({"who": "there"})),
/// )?;
/// view.render()?;
///
/// assert!(registry.contains("hello"));
/// assert_eq!(page.content("#hello").as_deref(), Some("Hi, there!"));
/// # Ok::<(), stagehand::ViewError>(())
/// ```
pub struct ViewRegistry {
    views: HashMap<String, View>,
    renderer: Rc<RefCell<Renderer>>,
    binder: Rc<dyn Binder>,
}

impl ViewRegistry {
    /// Creates a registry over the given binder with a default renderer.
    pub fn new(binder: Rc<dyn Binder>) -> Self {
        Self::with_renderer(Renderer::new(), binder)
    }

    /// Creates a registry with a pre-configured renderer.
    ///
    /// Use this when templates come from directories or a non-default engine.
    pub fn with_renderer(renderer: Renderer, binder: Rc<dyn Binder>) -> Self {
        Self {
            views: HashMap::new(),
            renderer: Rc::new(RefCell::new(renderer)),
            binder,
        }
    }

    /// Registers a view and returns its live handle.
    ///
    /// Defaults are applied for unset fields: `selector` becomes
    /// `"#" + name` and `template` becomes `name`. The new entity starts
    /// inactive.
    ///
    /// Registering a name that already exists replaces the prior entity.
    /// When the prior entity is still active it is hidden first (handlers
    /// detached, target cleared, on-hide hook run) so no binding from the
    /// replaced entity can leak.
    ///
    /// # Errors
    ///
    /// Fails with [`ViewError::MissingName`] when `name` is blank and
    /// [`ViewError::InvalidDescriptor`] when an event descriptor cannot be
    /// parsed. On error the registry is left unchanged.
    pub fn register(&mut self, config: ViewConfig) -> Result<View> {
        let ViewConfig {
            name,
            selector,
            template,
            data,
            events,
            render_callback,
            hide_hook,
        } = config;

        if name.trim().is_empty() {
            return Err(ViewError::MissingName);
        }

        // Parse every descriptor before touching the registry so a bad
        // config leaves it unchanged.
        let mut parsed: Vec<(EventKey, EventHandlerFn)> = Vec::new();
        for (descriptor, handler) in events {
            let key = EventKey::parse(&descriptor)?;
            // A repeated descriptor replaces the earlier handler in place,
            // keeping its original attachment position
            match parsed.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = handler,
                None => parsed.push((key, handler)),
            }
        }

        let selector = selector.unwrap_or_else(|| format!("#{}", name));
        let template = template.unwrap_or_else(|| name.clone());

        if let Some(prior) = self.views.get(&name) {
            if prior.is_active() {
                prior.hide();
            }
        }

        let view = View::from_parts(
            ViewParts {
                name: name.clone(),
                selector,
                template,
                data,
                events: parsed,
                render_callback,
                hide_hook,
            },
            Rc::clone(&self.renderer),
            Rc::clone(&self.binder),
        );

        debug!(target: "stagehand.lifecycle", view = %name, "view registered");
        self.views.insert(name, view.clone());
        Ok(view)
    }

    /// Registers every view declared in a YAML manifest.
    ///
    /// Returns the handles in manifest order. Handlers and hooks cannot be
    /// expressed in YAML; register those views through
    /// [`register`](Self::register) with a built [`ViewConfig`], or attach
    /// behavior by re-registering.
    ///
    /// # Errors
    ///
    /// Fails without registering anything when the manifest does not parse
    /// or any entry has a blank name.
    pub fn register_manifest(&mut self, yaml: &str) -> Result<Vec<View>> {
        let configs = ViewConfig::from_yaml(yaml)?;
        for config in &configs {
            if config.name.trim().is_empty() {
                return Err(ViewError::MissingName);
            }
        }

        let mut views = Vec::with_capacity(configs.len());
        for config in configs {
            views.push(self.register(config)?);
        }
        Ok(views)
    }

    /// Looks up a view by name.
    pub fn get(&self, name: &str) -> Option<View> {
        self.views.get(name).cloned()
    }

    /// Returns true if a view is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    /// Returns an iterator over all registered view names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(|s| s.as_str())
    }

    /// Returns the number of registered views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns true if no views are registered.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// The shared renderer views resolve templates through.
    pub fn renderer(&self) -> &Rc<RefCell<Renderer>> {
        &self.renderer
    }

    /// The shared binder views render into.
    pub fn binder(&self) -> &Rc<dyn Binder> {
        &self.binder
    }
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("view_count", &self.views.len())
            .finish()
    }
}
