/// Crate-wide result type.
pub type StoryResult<T> = Result<T, StoryError>;

/// Failure reported by the text generation collaborator.
///
/// Carries the human-readable message shown to the user. There is no retry policy attached; the
/// caller decides whether to re-invoke.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("generation failed: {message}")]
pub struct GenerationError {
    /// User-facing message.
    pub message: String,
}

impl GenerationError {
    /// Build a generation error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors produced by the story playback and export engine.
#[derive(thiserror::Error, Debug)]
pub enum StoryError {
    /// Invalid input values (dimensions, fps, frame ranges, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Title or content not available yet.
    #[error("not ready: {0}")]
    NotReady(String),

    /// Text shaping or font registration failed.
    #[error("layout error: {0}")]
    Layout(String),

    /// Painting a frame failed.
    #[error("render error: {0}")]
    Render(String),

    /// Capture stream creation, encoding or finalization failed.
    #[error("capture error: {0}")]
    Capture(String),

    /// The export was aborted by the caller.
    #[error("export cancelled")]
    Cancelled,

    /// A second export was requested while one is still recording.
    #[error("an export is already in progress")]
    ExportInProgress,

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Text generation collaborator failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Anything else, with context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryError {
    /// Build a [`StoryError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoryError::NotReady`].
    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }

    /// Build a [`StoryError::Layout`].
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`StoryError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StoryError::Capture`].
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`StoryError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
