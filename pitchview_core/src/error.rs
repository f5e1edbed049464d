//! Error types for the animation engine.

use pitchview_env::RenderError;
use thiserror::Error;

/// A trajectory that cannot be animated
#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("Trajectory '{name}' has {usable} usable samples, need at least 2")]
    Malformed { name: String, usable: usize },
}

/// Dataset loading errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset contains no trajectories")]
    Empty,
}

/// Per-tick animation errors
#[derive(Debug, Error)]
pub enum AnimationError {
    /// One or more tubes could not be rebuilt this tick.
    ///
    /// Every failed slot still shows its previous geometry.
    #[error("Failed to rebuild {failed} of {attempted} tubes at frame {frame} (index {index})")]
    Rebuild {
        frame: u64,
        index: usize,
        failed: usize,
        attempted: usize,
        #[source]
        source: RenderError,
    },
}
