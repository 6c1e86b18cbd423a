//! Error types for the transit show.

use thiserror::Error;

/// Result type for show setup operations.
pub type Result<T> = std::result::Result<T, TransitError>;

/// Errors raised while building the timeline or bringing the show up.
/// All of these are startup failures: once the show runs, nothing here is produced.
#[derive(Error, Debug)]
pub enum TransitError {
    #[error("unknown timeline label: {0}")]
    UnknownLabel(String),

    #[error("duplicate timeline label: {0}")]
    DuplicateLabel(String),

    #[error("invalid duration {duration} for stage '{stage}'")]
    InvalidDuration { stage: String, duration: f32 },

    #[error("stage '{0}' has no previous stage to anchor to")]
    NoPreviousStage(String),

    #[error("timeline has zero total duration")]
    EmptyTimeline,

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("missing page element: {0}")]
    MissingElement(String),

    #[error("rendering context unavailable: {0}")]
    NoContext(String),
}

/// A failure reported by the scene backend while drawing one frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The backend context is gone; no further frame can succeed.
    #[error("render context lost: {0}")]
    ContextLost(String),

    /// This frame failed but the context is still usable.
    #[error("frame failed: {0}")]
    Frame(String),
}

impl RenderError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::ContextLost(_))
    }
}

/// Audio backend failure (autoplay restrictions, node creation).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("audio error: {0}")]
pub struct AudioError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_loss_is_fatal() {
        assert!(RenderError::ContextLost("gone".into()).is_fatal());
        assert!(!RenderError::Frame("hiccup".into()).is_fatal());
    }

    #[test]
    fn config_error_converts() {
        let err: TransitError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("config error"));
    }
}
