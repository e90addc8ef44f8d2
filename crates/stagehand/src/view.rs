//! The view lifecycle engine.
//!
//! A [`View`] is a live handle to one registered view entity. It drives the
//! render/hide state machine: rendering resolves the template against the
//! stored data, injects the markup into the target, and (re)binds the view's
//! event handlers; hiding detaches them, clears the target, and hides it.
//!
//! # Handler Identity
//!
//! Each user handler is wrapped exactly once when the entity is created, and
//! that same wrapper is attached and detached for the entity's whole
//! lifetime. The page layer matches handlers by pointer identity, so a view
//! only ever removes its own bindings and sibling views sharing an ancestor
//! selector are never disturbed.
//!
//! The wrapper holds a weak reference back to the entity, so the handler
//! table does not keep the entity alive through its own closures.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use stagehand_page::{Binder, Event, HandlerFn, Target};
use stagehand_render::{RenderError, Renderer};

use crate::config::{EventHandlerFn, HideHookFn, RenderCallbackFn};
use crate::error::Result;
use crate::events::EventKey;

/// One entry in the handler table: a parsed descriptor plus the wrapped
/// handler that gets attached while the view is active.
struct EventBinding {
    key: EventKey,
    bound: HandlerFn,
}

/// Everything the registry resolved for a new view entity.
pub(crate) struct ViewParts {
    pub name: String,
    pub selector: String,
    pub template: String,
    pub data: Value,
    pub events: Vec<(EventKey, EventHandlerFn)>,
    pub render_callback: Option<RenderCallbackFn>,
    pub hide_hook: Option<HideHookFn>,
}

struct ViewInner {
    name: String,
    selector: String,
    template: String,
    data: Value,
    active: bool,
    events: Vec<EventBinding>,
    render_callback: Option<RenderCallbackFn>,
    hide_hook: Option<HideHookFn>,
    renderer: Rc<RefCell<Renderer>>,
    binder: Rc<dyn Binder>,
}

/// A live handle to one registered view.
///
/// Handles are cheap to clone and share one underlying entity; rendering
/// through any clone is visible through all of them. The registry returns a
/// handle from [`register`](crate::ViewRegistry::register) and
/// [`get`](crate::ViewRegistry::get).
///
/// # Lifecycle
///
/// A view is either inactive (nothing in the page attributable to it) or
/// active (markup present, handlers attached). [`render`](Self::render)
/// moves it to active from either state without ever stacking duplicate
/// handlers; [`hide`](Self::hide) moves it back.
///
/// # Shared Selectors
///
/// The target named by `selector` is exclusively written by its owning view
/// while active. Two views registered over the same selector overwrite each
/// other's markup; that interleaving is unsupported.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use serde_json::json;
/// use stagehand::{Page, ViewConfig, ViewRegistry};
///
/// let page = Rc::new(Page::new());
/// let mut registry = ViewRegistry::new(page.clone());
/// registry
///     .renderer()
///     .borrow_mut()
///     .add_template("greeting", "Hello, {{ name }}!")?;
///
/// let view = registry.register(
///     ViewConfig::new("greeting").data(json!({"name": "world"})),
/// )?;
///
/// let target = view.render()?;
/// assert_eq!(target.content().as_deref(), Some("Hello, world!"));
/// assert!(view.is_active());
///
/// view.hide();
/// assert!(!view.is_active());
/// # Ok::<(), stagehand::ViewError>(())
/// ```
#[derive(Clone)]
pub struct View {
    inner: Rc<RefCell<ViewInner>>,
}

impl View {
    pub(crate) fn from_parts(
        parts: ViewParts,
        renderer: Rc<RefCell<Renderer>>,
        binder: Rc<dyn Binder>,
    ) -> Self {
        let inner = Rc::new(RefCell::new(ViewInner {
            name: parts.name,
            selector: parts.selector,
            template: parts.template,
            data: parts.data,
            active: false,
            events: Vec::new(),
            render_callback: parts.render_callback,
            hide_hook: parts.hide_hook,
            renderer,
            binder,
        }));

        // Wrap each user handler once. The same Rc is reused for every
        // attach/detach so the page layer can match it by pointer identity.
        let bindings: Vec<EventBinding> = parts
            .events
            .into_iter()
            .map(|(key, user)| {
                let weak = Rc::downgrade(&inner);
                let bound: HandlerFn = Rc::new(move |event: &Event| {
                    if let Some(inner) = weak.upgrade() {
                        let view = View { inner };
                        user(&view, event);
                    }
                });
                EventBinding { key, bound }
            })
            .collect();
        inner.borrow_mut().events = bindings;

        View { inner }
    }

    /// The view's registered name.
    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    /// The target selector this view renders into.
    pub fn selector(&self) -> String {
        self.inner.borrow().selector.clone()
    }

    /// The template identifier this view renders.
    pub fn template(&self) -> String {
        self.inner.borrow().template.clone()
    }

    /// A clone of the currently stored data payload.
    pub fn data(&self) -> Value {
        self.inner.borrow().data.clone()
    }

    /// True between a completed render and the next hide.
    pub fn is_active(&self) -> bool {
        self.inner.borrow().active
    }

    /// The number of event descriptors in the handler table.
    pub fn event_count(&self) -> usize {
        self.inner.borrow().events.len()
    }

    /// Renders the view with its currently stored data.
    ///
    /// Resolves the template, injects the markup into the target, makes it
    /// visible, and (re)binds the handler table. When the view is already
    /// active its handlers are detached first, so rendering twice leaves
    /// exactly one copy of each handler attached.
    ///
    /// Returns the rendered [`Target`], or the render callback's result when
    /// one is configured.
    ///
    /// # Errors
    ///
    /// Fails if the template cannot be resolved or rendered. On failure the
    /// view's active state and page content are left as they were.
    pub fn render(&self) -> Result<Target> {
        self.render_value(None)
    }

    /// Renders the view with a new data payload.
    ///
    /// The payload replaces the stored data wholesale and is retained for
    /// subsequent [`render`](Self::render) calls.
    pub fn render_with<T: Serialize>(&self, data: T) -> Result<Target> {
        let value = serde_json::to_value(data).map_err(RenderError::from)?;
        self.render_value(Some(value))
    }

    fn render_value(&self, data: Option<Value>) -> Result<Target> {
        let (markup, name, selector, was_active) = {
            let mut inner = self.inner.borrow_mut();
            if let Some(data) = data {
                inner.data = data;
            }
            // A resolution failure propagates before the page is touched,
            // leaving the active state as it was. The data replacement
            // above stands either way.
            let renderer = Rc::clone(&inner.renderer);
            let result = renderer.borrow_mut().render(&inner.template, &inner.data);
            let markup = result?;
            (
                markup,
                inner.name.clone(),
                inner.selector.clone(),
                inner.active,
            )
        };

        let binder = Rc::clone(&self.inner.borrow().binder);
        let target = Target::new(selector.as_str(), binder);
        target.set_content(&markup);
        target.set_visible(true);

        // Detach before attach on a re-render so handlers never stack.
        if was_active {
            self.detach_events(&target);
        }
        self.attach_events(&target);
        self.inner.borrow_mut().active = true;

        debug!(
            target: "stagehand.lifecycle",
            view = %name,
            selector = %selector,
            rerender = was_active,
            "view rendered"
        );

        // No borrow is held while the callback runs, so it may re-enter
        // render or hide freely.
        let callback = self.inner.borrow().render_callback.clone();
        match callback {
            Some(callback) => Ok(callback(self, target)),
            None => Ok(target),
        }
    }

    /// Hides the view.
    ///
    /// Detaches the handler table, clears the target's markup, hides it, and
    /// marks the view inactive. Hiding an already-inactive view is safe: the
    /// detach and clear steps re-run without effect.
    pub fn hide(&self) {
        let (name, selector) = {
            let inner = self.inner.borrow();
            (inner.name.clone(), inner.selector.clone())
        };
        let binder = Rc::clone(&self.inner.borrow().binder);
        let target = Target::new(selector.as_str(), binder);

        self.detach_events(&target);
        target.set_content("");
        target.set_visible(false);
        self.inner.borrow_mut().active = false;

        debug!(
            target: "stagehand.lifecycle",
            view = %name,
            selector = %selector,
            "view hidden"
        );

        let hook = self.inner.borrow().hide_hook.clone();
        if let Some(hook) = hook {
            hook(self);
        }
    }

    fn attach_events(&self, target: &Target) {
        let bindings = self.collect_bindings();
        for (key, bound) in bindings {
            trace!(
                target: "stagehand.events",
                selector = target.selector(),
                descriptor = %key,
                "attaching handler"
            );
            target.on(key.event_type(), key.delegate(), bound);
        }
    }

    fn detach_events(&self, target: &Target) {
        let bindings = self.collect_bindings();
        for (key, bound) in bindings {
            trace!(
                target: "stagehand.events",
                selector = target.selector(),
                descriptor = %key,
                "detaching handler"
            );
            target.off(key.event_type(), key.delegate(), &bound);
        }
    }

    // Collected up front so no borrow is held while the binder runs.
    fn collect_bindings(&self) -> Vec<(EventKey, HandlerFn)> {
        self.inner
            .borrow()
            .events
            .iter()
            .map(|binding| (binding.key.clone(), Rc::clone(&binding.bound)))
            .collect()
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("View")
            .field("name", &inner.name)
            .field("selector", &inner.selector)
            .field("template", &inner.template)
            .field("active", &inner.active)
            .field("event_count", &inner.events.len())
            .finish()
    }
}
