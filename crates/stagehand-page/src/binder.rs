//! Binder abstraction over a page surface.
//!
//! This module defines the [`Binder`] trait, which abstracts the document
//! surface a view renders into: content injection, visibility, and event
//! handler attachment. The in-memory implementation is
//! [`Page`](crate::Page); applications embedding a real document model can
//! provide their own.
//!
//! [`Target`] pairs a selector with the binder that owns it, giving views a
//! single handle for all surface operations on one element.

use std::fmt;
use std::rc::Rc;

use crate::event::HandlerFn;

/// A surface that views render into and bind event handlers on.
///
/// All methods take `&self`; implementations use interior mutability. This
/// keeps the binder shareable across views via `Rc` and allows handlers
/// running during a dispatch to perform further surface operations.
///
/// # Handler Identity
///
/// [`off`](Self::off) matches handlers by event type, delegate selector, and
/// handler identity (`Rc::ptr_eq`). Detaching a handler that was never
/// attached is a no-op. This makes attach/detach cycles idempotent: a view
/// can re-bind its handlers without stacking duplicates, and detaching one
/// view's handlers never disturbs another view bound to the same element.
pub trait Binder {
    /// Attaches `handler` for `event_type` events on the element matched by
    /// `selector`.
    ///
    /// With `delegate` set, the handler only fires for events originating on
    /// descendants matching the delegate sub-selector (delegated binding).
    /// Without it, the handler fires for any matching event reaching the
    /// element (direct binding).
    fn on(&self, selector: &str, event_type: &str, delegate: Option<&str>, handler: HandlerFn);

    /// Detaches a previously attached handler.
    ///
    /// Matching is by `(event_type, delegate, handler identity)`. Detaching
    /// a handler that is not attached is a no-op.
    fn off(&self, selector: &str, event_type: &str, delegate: Option<&str>, handler: &HandlerFn);

    /// Replaces the inner markup of the element matched by `selector`.
    fn set_content(&self, selector: &str, markup: &str);

    /// Shows or hides the element matched by `selector`.
    fn set_visible(&self, selector: &str, visible: bool);

    /// Returns the content of the element matched by `selector`.
    ///
    /// `None` if the element's content was never set.
    fn content(&self, selector: &str) -> Option<String>;

    /// Returns whether the element matched by `selector` is visible.
    fn is_visible(&self, selector: &str) -> bool;
}

/// A handle to one element of a page surface.
///
/// Pairs a selector with the binder that owns it, so a view can operate on
/// its element without carrying the binder and selector separately.
#[derive(Clone)]
pub struct Target {
    selector: String,
    binder: Rc<dyn Binder>,
}

impl Target {
    /// Creates a target for `selector` on the given binder.
    pub fn new(selector: impl Into<String>, binder: Rc<dyn Binder>) -> Self {
        Self {
            selector: selector.into(),
            binder,
        }
    }

    /// Returns the selector this target addresses.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Returns the binder this target operates on.
    pub fn binder(&self) -> &Rc<dyn Binder> {
        &self.binder
    }

    /// Attaches a handler on this target's element.
    ///
    /// See [`Binder::on`].
    pub fn on(&self, event_type: &str, delegate: Option<&str>, handler: HandlerFn) {
        self.binder.on(&self.selector, event_type, delegate, handler);
    }

    /// Detaches a handler from this target's element.
    ///
    /// See [`Binder::off`].
    pub fn off(&self, event_type: &str, delegate: Option<&str>, handler: &HandlerFn) {
        self.binder
            .off(&self.selector, event_type, delegate, handler);
    }

    /// Replaces this element's inner markup.
    pub fn set_content(&self, markup: &str) {
        self.binder.set_content(&self.selector, markup);
    }

    /// Shows or hides this element.
    pub fn set_visible(&self, visible: bool) {
        self.binder.set_visible(&self.selector, visible);
    }

    /// Returns this element's content, or `None` if it was never set.
    pub fn content(&self) -> Option<String> {
        self.binder.content(&self.selector)
    }

    /// Returns whether this element is visible.
    pub fn is_visible(&self) -> bool {
        self.binder.is_visible(&self.selector)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}
