//! PitchView Host Harness
//!
//! Everything around the animation engine that a real scene needs:
//! a frame tick source, scene dressing, and a JSON frame log.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                  RenderLoop                    │
//! │  tokio interval ── one tick per frame ──┐      │
//! │                                         ▼      │
//! │   ┌──────────────────────────────────────────┐ │
//! │   │ TrajectoryAnimator<R: Renderer>          │ │
//! │   │  FrameClock · tube slots · connector     │ │
//! │   └──────────────────────────────────────────┘ │
//! │                     │                          │
//! │             SceneRenderer / RerunRenderer      │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use pitchview_sim::{play, LoopConfig};
//!
//! let mut animator = TrajectoryAnimator::from_records(&records, config, SceneRenderer::new());
//! let summary = play(&mut animator, &LoopConfig::default(), None).await;
//! ```

mod dressing;
mod exporter;
mod render_loop;

pub use dressing::{GroundPlane, SceneDressing};
pub use exporter::{FrameLog, FrameRecord, TubeRecord};
pub use render_loop::{play, LoopConfig, PlaybackSummary, RenderLoop};
