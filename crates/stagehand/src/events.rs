//! Event descriptor parsing.
//!
//! A descriptor names one entry in a view's event table: an event type,
//! optionally followed by a delegate sub-selector. `"click"` binds directly on
//! the view's target; `"click #save"` delegates to descendants matching
//! `#save`. The delegate part may itself contain spaces (descendant
//! selectors such as `"click .toolbar button"`).

use std::fmt;

use crate::error::ViewError;

/// A parsed event descriptor: event type plus optional delegate sub-selector.
///
/// Two descriptors are the same binding slot when both parts are equal, so
/// `"click #save"` and `"click #cancel"` are distinct entries while a second
/// `"click #save"` replaces the first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    event_type: String,
    delegate: Option<String>,
}

impl EventKey {
    /// Parses a descriptor string.
    ///
    /// The first whitespace-separated token is the event type; everything
    /// after it is the delegate sub-selector. A blank descriptor is an error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stagehand::EventKey;
    ///
    /// let key = EventKey::parse("click #save").unwrap();
    /// assert_eq!(key.event_type(), "click");
    /// assert_eq!(key.delegate(), Some("#save"));
    ///
    /// let key = EventKey::parse("submit").unwrap();
    /// assert_eq!(key.delegate(), None);
    /// ```
    pub fn parse(descriptor: &str) -> Result<Self, ViewError> {
        let trimmed = descriptor.trim();
        if trimmed.is_empty() {
            return Err(ViewError::InvalidDescriptor {
                descriptor: descriptor.to_string(),
                reason: "missing event type",
            });
        }

        match trimmed.split_once(char::is_whitespace) {
            Some((event_type, rest)) => {
                let delegate = rest.trim();
                Ok(Self {
                    event_type: event_type.to_string(),
                    delegate: if delegate.is_empty() {
                        None
                    } else {
                        Some(delegate.to_string())
                    },
                })
            }
            None => Ok(Self {
                event_type: trimmed.to_string(),
                delegate: None,
            }),
        }
    }

    /// The event type, e.g. `"click"`.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The delegate sub-selector, if the descriptor named one.
    pub fn delegate(&self) -> Option<&str> {
        self.delegate.as_deref()
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.delegate {
            Some(delegate) => write!(f, "{} {}", self.event_type, delegate),
            None => write!(f, "{}", self.event_type),
        }
    }
}
