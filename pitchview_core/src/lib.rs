//! PitchView Core - Frame-Synchronized Trajectory Animation
//!
//! Turns pre-computed, timestamped projectile samples into tube geometry and
//! grows that geometry one step per display frame:
//! 1. **Mapping**: domain samples (feet, z-up) become render points (metres, y-up)
//! 2. **Buffering**: each trajectory's sentinel sample is dropped once, at setup
//! 3. **Animation**: a frame clock selects the index, every tracked tube and the
//!    connector between the first two are rebuilt in lock-step
//!
//! All drawing goes through the [`pitchview_env::Renderer`] trait.

pub mod animator;
pub mod buffer;
pub mod clock;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod mapper;
pub mod palette;
pub mod trajectory;

#[cfg(feature = "visualization")]
pub mod visualization;

// Re-export key types for convenience
pub use animator::{TickOutcome, TrajectoryAnimator, TubeSlot};
pub use buffer::TrajectoryBuffer;
pub use clock::{AnimationPhase, FrameClock};
pub use config::{AnimationConfig, TubeStyle};
pub use dataset::{load_dataset, parse_dataset, sample_dataset, Sample, Timing, TrajectoryRecord};
pub use error::{AnimationError, DatasetError, TrajectoryError};
pub use geometry::GeometryBuilder;
pub use mapper::{to_render_space, MappedPoint};
pub use trajectory::{track, Role, Trajectory};
