//! Error types shared across Iris crates.

/// Top-level error type for Iris operations.
#[derive(Debug, thiserror::Error)]
pub enum IrisError {
    /// The frame source produced nothing this tick. Recoverable: the
    /// motion stage is skipped for the tick and the loop continues.
    #[error("Frame unavailable from source")]
    FrameUnavailable,

    /// Camera / frame source failed to open or died mid-run. Fatal at
    /// startup, before the tick loop is entered.
    #[error("Camera error: {message}")]
    Camera { message: String },

    /// Rendering surface failed to open or present. Fatal at startup.
    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Vision error: {message}")]
    Vision { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using IrisError.
pub type IrisResult<T> = Result<T, IrisError>;

impl IrisError {
    pub fn camera(msg: impl Into<String>) -> Self {
        Self::Camera {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn vision(msg: impl Into<String>) -> Self {
        Self::Vision {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// Whether the tick loop may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::FrameUnavailable)
    }
}
