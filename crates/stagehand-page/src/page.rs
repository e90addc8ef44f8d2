//! In-memory page surface.
//!
//! [`Page`] is the built-in [`Binder`] implementation: a headless document
//! model that tracks per-selector content, visibility, and event bindings.
//! It backs tests and demos, and serves as the reference for the dispatch
//! semantics custom binders should follow.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::binder::Binder;
use crate::event::{Event, HandlerFn};

/// One attached handler on a slot.
struct Binding {
    event_type: String,
    delegate: Option<String>,
    handler: HandlerFn,
}

impl Binding {
    fn matches(&self, event_type: &str, delegate: Option<&str>, handler: &HandlerFn) -> bool {
        self.event_type == event_type
            && self.delegate.as_deref() == delegate
            && Rc::ptr_eq(&self.handler, handler)
    }
}

/// State tracked for one selector.
struct Slot {
    content: Option<String>,
    visible: bool,
    bindings: Vec<Binding>,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            content: None,
            // Elements start visible, like a freshly loaded document
            visible: true,
            bindings: Vec::new(),
        }
    }
}

/// An in-memory page surface.
///
/// Tracks content, visibility, and event bindings per selector. Events are
/// delivered synchronously via [`dispatch`](Self::dispatch).
///
/// # Interior Mutability
///
/// All [`Binder`] methods take `&self`. Internal state lives behind a
/// `RefCell`, and no borrow is held while a handler runs, so handlers may
/// freely call back into the page (re-bind, change content, dispatch again).
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use std::cell::Cell;
/// use stagehand_page::{Binder, Event, HandlerFn, Page};
///
/// let page = Page::new();
///
/// let clicks = Rc::new(Cell::new(0));
/// let clicks_in = clicks.clone();
/// let handler: HandlerFn = Rc::new(move |_event: &Event| {
///     clicks_in.set(clicks_in.get() + 1);
/// });
///
/// page.on("#counter", "click", None, handler);
/// page.dispatch("#counter", "click", None);
/// assert_eq!(clicks.get(), 1);
/// ```
#[derive(Default)]
pub struct Page {
    slots: RefCell<HashMap<String, Slot>>,
}

impl Page {
    /// Creates an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatches an event to the element at `selector`.
    ///
    /// `target` names the descendant the event originated on; `None` means
    /// the event originated on the element itself.
    ///
    /// # Matching
    ///
    /// For each binding on the slot with a matching event type:
    ///
    /// - A direct binding (no delegate) fires for any origin, mirroring an
    ///   event bubbling up to the bound element.
    /// - A delegated binding fires only when `target` equals its delegate
    ///   selector.
    ///
    /// Handlers run in attachment order. Returns the number of handlers that
    /// fired.
    pub fn dispatch(&self, selector: &str, event_type: &str, target: Option<&str>) -> usize {
        // Collect matching handlers first so no borrow is held while
        // user code runs.
        let matched: Vec<HandlerFn> = {
            let slots = self.slots.borrow();
            match slots.get(selector) {
                Some(slot) => slot
                    .bindings
                    .iter()
                    .filter(|b| {
                        if b.event_type != event_type {
                            return false;
                        }
                        match (target, b.delegate.as_deref()) {
                            (Some(t), Some(d)) => d == t,
                            (_, None) => true,
                            (None, Some(_)) => false,
                        }
                    })
                    .map(|b| Rc::clone(&b.handler))
                    .collect(),
                None => Vec::new(),
            }
        };

        trace!(
            target: "stagehand.page",
            selector,
            event_type,
            origin = target.unwrap_or(selector),
            fired = matched.len(),
            "dispatching event"
        );

        let event = Event::new(event_type, target.unwrap_or(selector));
        for handler in &matched {
            handler(&event);
        }
        matched.len()
    }

    /// Returns the number of handlers attached to the element at `selector`.
    pub fn binding_count(&self, selector: &str) -> usize {
        self.slots
            .borrow()
            .get(selector)
            .map(|slot| slot.bindings.len())
            .unwrap_or(0)
    }

    /// Returns the number of handlers attached for an exact
    /// `(event type, delegate)` pair on the element at `selector`.
    ///
    /// This is the instrumentation tests use to verify that render/hide
    /// cycles never stack duplicate handlers.
    pub fn handler_count(&self, selector: &str, event_type: &str, delegate: Option<&str>) -> usize {
        self.slots
            .borrow()
            .get(selector)
            .map(|slot| {
                slot.bindings
                    .iter()
                    .filter(|b| b.event_type == event_type && b.delegate.as_deref() == delegate)
                    .count()
            })
            .unwrap_or(0)
    }
}

impl Binder for Page {
    fn on(&self, selector: &str, event_type: &str, delegate: Option<&str>, handler: HandlerFn) {
        trace!(
            target: "stagehand.page",
            selector,
            event_type,
            delegate = delegate.unwrap_or(""),
            "attaching handler"
        );
        let mut slots = self.slots.borrow_mut();
        let slot = slots.entry(selector.to_string()).or_default();
        slot.bindings.push(Binding {
            event_type: event_type.to_string(),
            delegate: delegate.map(str::to_string),
            handler,
        });
    }

    fn off(&self, selector: &str, event_type: &str, delegate: Option<&str>, handler: &HandlerFn) {
        let mut slots = self.slots.borrow_mut();
        let Some(slot) = slots.get_mut(selector) else {
            return;
        };
        let before = slot.bindings.len();
        slot.bindings
            .retain(|b| !b.matches(event_type, delegate, handler));
        let removed = before - slot.bindings.len();
        if removed > 0 {
            trace!(
                target: "stagehand.page",
                selector,
                event_type,
                removed,
                "detached handler"
            );
        }
    }

    fn set_content(&self, selector: &str, markup: &str) {
        let mut slots = self.slots.borrow_mut();
        let slot = slots.entry(selector.to_string()).or_default();
        slot.content = Some(markup.to_string());
    }

    fn set_visible(&self, selector: &str, visible: bool) {
        let mut slots = self.slots.borrow_mut();
        let slot = slots.entry(selector.to_string()).or_default();
        slot.visible = visible;
    }

    fn content(&self, selector: &str) -> Option<String> {
        self.slots
            .borrow()
            .get(selector)
            .and_then(|slot| slot.content.clone())
    }

    fn is_visible(&self, selector: &str) -> bool {
        self.slots
            .borrow()
            .get(selector)
            .map(|slot| slot.visible)
            .unwrap_or(true)
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.borrow();
        let bindings: usize = slots.values().map(|slot| slot.bindings.len()).sum();
        f.debug_struct("Page")
            .field("slot_count", &slots.len())
            .field("binding_count", &bindings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_handler(counter: &Rc<Cell<usize>>) -> HandlerFn {
        let counter = counter.clone();
        Rc::new(move |_event: &Event| {
            counter.set(counter.get() + 1);
        })
    }

    #[test]
    fn test_direct_binding_fires() {
        let page = Page::new();
        let count = Rc::new(Cell::new(0));
        page.on("#panel", "click", None, counting_handler(&count));

        let fired = page.dispatch("#panel", "click", None);
        assert_eq!(fired, 1);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_direct_binding_fires_for_bubbled_events() {
        let page = Page::new();
        let count = Rc::new(Cell::new(0));
        page.on("#panel", "click", None, counting_handler(&count));

        // Event originating on a descendant still reaches a direct binding
        page.dispatch("#panel", "click", Some("#inner-button"));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_delegated_binding_matches_origin() {
        let page = Page::new();
        let count = Rc::new(Cell::new(0));
        page.on("#panel", "click", Some("#save"), counting_handler(&count));

        page.dispatch("#panel", "click", Some("#save"));
        assert_eq!(count.get(), 1);

        // Different origin does not match the delegate
        page.dispatch("#panel", "click", Some("#cancel"));
        assert_eq!(count.get(), 1);

        // Event on the element itself does not match a delegated binding
        page.dispatch("#panel", "click", None);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_event_type_must_match() {
        let page = Page::new();
        let count = Rc::new(Cell::new(0));
        page.on("#panel", "click", None, counting_handler(&count));

        page.dispatch("#panel", "submit", None);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_dispatch_unknown_selector() {
        let page = Page::new();
        assert_eq!(page.dispatch("#nowhere", "click", None), 0);
    }

    #[test]
    fn test_handler_receives_event() {
        let page = Page::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_in = seen.clone();
        let handler: HandlerFn = Rc::new(move |event: &Event| {
            seen_in
                .borrow_mut()
                .push((event.event_type.clone(), event.target.clone()));
        });
        page.on("#panel", "click", Some("#save"), handler);

        page.dispatch("#panel", "click", Some("#save"));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], ("click".to_string(), "#save".to_string()));
    }

    #[test]
    fn test_off_matches_by_identity() {
        let page = Page::new();
        let count_a = Rc::new(Cell::new(0));
        let count_b = Rc::new(Cell::new(0));
        let handler_a = counting_handler(&count_a);
        let handler_b = counting_handler(&count_b);

        page.on("#panel", "click", None, handler_a.clone());
        page.on("#panel", "click", None, handler_b.clone());
        assert_eq!(page.binding_count("#panel"), 2);

        page.off("#panel", "click", None, &handler_a);
        assert_eq!(page.binding_count("#panel"), 1);

        page.dispatch("#panel", "click", None);
        assert_eq!(count_a.get(), 0);
        assert_eq!(count_b.get(), 1);
    }

    #[test]
    fn test_off_requires_matching_delegate() {
        let page = Page::new();
        let count = Rc::new(Cell::new(0));
        let handler = counting_handler(&count);

        page.on("#panel", "click", Some("#save"), handler.clone());

        // Wrong delegate: nothing removed
        page.off("#panel", "click", Some("#cancel"), &handler);
        assert_eq!(page.binding_count("#panel"), 1);

        page.off("#panel", "click", Some("#save"), &handler);
        assert_eq!(page.binding_count("#panel"), 0);
    }

    #[test]
    fn test_off_unattached_is_noop() {
        let page = Page::new();
        let count = Rc::new(Cell::new(0));
        let handler = counting_handler(&count);

        // Never attached: no panic, no effect
        page.off("#panel", "click", None, &handler);
        assert_eq!(page.binding_count("#panel"), 0);
    }

    #[test]
    fn test_content_and_visibility() {
        let page = Page::new();
        assert_eq!(page.content("#panel"), None);
        assert!(page.is_visible("#panel"));

        page.set_content("#panel", "<p>hello</p>");
        page.set_visible("#panel", false);

        assert_eq!(page.content("#panel").as_deref(), Some("<p>hello</p>"));
        assert!(!page.is_visible("#panel"));

        page.set_content("#panel", "");
        assert_eq!(page.content("#panel").as_deref(), Some(""));
    }

    #[test]
    fn test_handler_count_is_pair_specific() {
        let page = Page::new();
        let count = Rc::new(Cell::new(0));
        page.on("#panel", "click", None, counting_handler(&count));
        page.on("#panel", "click", None, counting_handler(&count));
        page.on("#panel", "click", Some("#save"), counting_handler(&count));
        page.on("#panel", "submit", None, counting_handler(&count));

        assert_eq!(page.binding_count("#panel"), 4);
        assert_eq!(page.handler_count("#panel", "click", None), 2);
        assert_eq!(page.handler_count("#panel", "click", Some("#save")), 1);
        assert_eq!(page.handler_count("#panel", "submit", None), 1);
        assert_eq!(page.handler_count("#panel", "submit", Some("#save")), 0);
        assert_eq!(page.handler_count("#other", "click", None), 0);
    }

    #[test]
    fn test_handlers_run_in_attachment_order() {
        let page = Page::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let order_in = order.clone();
            let handler: HandlerFn = Rc::new(move |_event: &Event| {
                order_in.borrow_mut().push(label);
            });
            page.on("#panel", "click", None, handler);
        }

        page.dispatch("#panel", "click", None);
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_handler_may_mutate_page_during_dispatch() {
        let page = Rc::new(Page::new());
        let page_in = page.clone();
        let handler: HandlerFn = Rc::new(move |_event: &Event| {
            // Must not panic: no borrow is held while handlers run
            page_in.set_content("#status", "clicked");
        });
        page.on("#panel", "click", None, handler);

        page.dispatch("#panel", "click", None);
        assert_eq!(page.content("#status").as_deref(), Some("clicked"));
    }

    #[test]
    fn test_handler_may_rebind_during_dispatch() {
        let page = Rc::new(Page::new());
        let count = Rc::new(Cell::new(0));

        let page_in = page.clone();
        let late = counting_handler(&count);
        let handler: HandlerFn = Rc::new(move |_event: &Event| {
            page_in.on("#panel", "click", None, late.clone());
        });
        page.on("#panel", "click", None, handler);

        // First dispatch attaches the late handler but does not run it
        assert_eq!(page.dispatch("#panel", "click", None), 1);
        assert_eq!(count.get(), 0);

        // Second dispatch runs both
        assert_eq!(page.dispatch("#panel", "click", None), 2);
        assert_eq!(count.get(), 1);
    }
}
