//! Error types for the PitchView renderer abstraction.

use crate::types::MeshHandle;
use thiserror::Error;

/// Errors that can occur while building, styling or disposing render geometry.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer cannot hold any more meshes
    #[error("Render resources exhausted (capacity {capacity})")]
    ResourceExhausted { capacity: usize },

    /// The handle was never issued, or has already been disposed
    #[error("Unknown mesh handle: {0}")]
    UnknownHandle(MeshHandle),

    /// A tube needs at least one point
    #[error("Tube path is empty")]
    EmptyPath,

    /// Radius or segment count out of range
    #[error("Invalid tube style: {0}")]
    InvalidStyle(String),

    /// Failure reported by the backing engine
    #[error("Renderer backend error: {0}")]
    Backend(String),
}

impl RenderError {
    /// Creates an invalid style error.
    pub fn invalid_style(msg: impl Into<String>) -> Self {
        Self::InvalidStyle(msg.into())
    }

    /// Creates a backend error.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}
