//! Error types for view registration and rendering.

use thiserror::Error;

use stagehand_render::RenderError;

/// Errors that can occur when registering or rendering views.
#[derive(Debug, Error)]
pub enum ViewError {
    /// View registration requires a non-blank name.
    #[error("view registration requires a name")]
    MissingName,

    /// An event descriptor could not be parsed.
    ///
    /// Descriptors are `"type"` or `"type selector"`, e.g. `"click"` or
    /// `"click #save"`.
    #[error("invalid event descriptor '{descriptor}': {reason}")]
    InvalidDescriptor {
        descriptor: String,
        reason: &'static str,
    },

    /// Template resolution or rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A YAML view manifest could not be parsed.
    #[error("invalid view manifest: {0}")]
    Manifest(#[from] serde_yaml::Error),
}

impl ViewError {
    /// Returns true if this error is a missing-template failure.
    ///
    /// Useful for callers that register templates lazily and want to retry
    /// after adding the source.
    pub fn is_template_not_found(&self) -> bool {
        matches!(self, ViewError::Render(RenderError::TemplateNotFound(_)))
    }
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
