//! Error types for fxscope-rs.

use thiserror::Error;

/// The main error type for fxscope-rs operations.
#[derive(Error, Debug)]
pub enum FxscopeError {
    /// An actor with the given name is already in the scene.
    #[error("actor '{0}' already exists")]
    ActorExists(String),

    /// No actor with the given name is in the scene.
    #[error("actor '{0}' not found")]
    ActorNotFound(String),

    /// The observer id is not bound to the named actor.
    #[error("observer {id} not found on actor '{actor}'")]
    ObserverNotFound { actor: String, id: u64 },

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A parameter is outside its valid range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Zero-sized render target.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The animation already reached its last frame.
    #[error("animation finished after {0} frames")]
    AnimationFinished(u64),

    /// Rendering error.
    #[error("render error: {0}")]
    RenderError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for fxscope-rs operations.
pub type Result<T> = std::result::Result<T, FxscopeError>;
