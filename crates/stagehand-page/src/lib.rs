//! # Stagehand Page - Surface Binding and Event Dispatch
//!
//! `stagehand-page` provides the surface layer for the `stagehand` view
//! engine: the [`Binder`] trait that abstracts a document surface, the
//! [`Target`] handle views operate through, and [`Page`], an in-memory
//! surface with synchronous event dispatch.
//!
//! # Flow
//!
//! ```text
//! view renders markup
//!   → Target::set_content / set_visible   (surface mutation)
//!   → Target::on                          (handler attachment)
//!   → Page::dispatch                      (event delivery)
//!   → bound handlers run
//! ```
//!
//! # Handler Identity
//!
//! Handlers are `Rc<dyn Fn(&Event)>` and are matched for detachment by
//! pointer identity. Two views bound to the same element never disturb each
//! other's handlers, and re-attaching after detach is idempotent.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use std::cell::Cell;
//! use stagehand_page::{Binder, Event, HandlerFn, Page, Target};
//!
//! let page = Rc::new(Page::new());
//! let target = Target::new("#save-area", page.clone() as Rc<dyn Binder>);
//!
//! target.set_content("<button id=\"save\">Save</button>");
//!
//! let saves = Rc::new(Cell::new(0));
//! let saves_in = saves.clone();
//! let handler: HandlerFn = Rc::new(move |_event: &Event| {
//!     saves_in.set(saves_in.get() + 1);
//! });
//! target.on("click", Some("#save"), handler);
//!
//! page.dispatch("#save-area", "click", Some("#save"));
//! assert_eq!(saves.get(), 1);
//! ```

mod binder;
mod event;
mod page;

pub use binder::{Binder, Target};
pub use event::{Event, HandlerFn};
pub use page::Page;
