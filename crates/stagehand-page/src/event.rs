//! Event type passed to bound handlers.

use std::rc::Rc;

/// An event dispatched on a page surface.
///
/// Carries the event type and the selector of the element the event
/// originated on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// The event type, e.g. `"click"` or `"submit"`.
    pub event_type: String,
    /// Selector of the element the event originated on.
    pub target: String,
}

impl Event {
    /// Creates a new event.
    pub fn new(event_type: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            target: target.into(),
        }
    }
}

/// Type alias for bound handler functions.
///
/// Handlers are reference-counted so the same handler instance can be
/// attached, compared by identity (`Rc::ptr_eq`), and detached later.
pub type HandlerFn = Rc<dyn Fn(&Event)>;
