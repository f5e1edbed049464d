//! JSON frame log.
//!
//! Records what every frame put on screen: phase, animation index and the
//! path length of each tube slot.

use crate::dressing::SceneDressing;
use pitchview_core::{AnimationError, TrajectoryAnimator, TubeSlot};
use pitchview_env::Renderer;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// One tube as displayed after a frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TubeRecord {
    pub label: String,

    /// Trajectory role, absent for the connector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    pub path_len: usize,
    pub visible: bool,
}

impl TubeRecord {
    pub fn from_slot(slot: &TubeSlot) -> Self {
        Self {
            label: slot.label().to_string(),
            role: slot.role().map(|r| r.to_string()),
            path_len: slot.path_len(),
            visible: slot.handle().is_some(),
        }
    }
}

/// A single frame of playback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    pub frame: u64,
    pub phase: String,

    /// Whether the animation had reached its terminal phase
    pub complete: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    pub tubes: Vec<TubeRecord>,

    /// Rebuild failure, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FrameRecord {
    /// Snapshots the animator right after a tick.
    pub fn capture<R: Renderer>(
        animator: &TrajectoryAnimator<R>,
        error: Option<&AnimationError>,
    ) -> Self {
        let phase = animator.phase();
        Self {
            frame: animator.frame(),
            phase: phase.name().to_string(),
            complete: animator.is_complete(),
            index: phase.index(),
            tubes: animator
                .slots()
                .iter()
                .chain(animator.connector())
                .map(TubeRecord::from_slot)
                .collect(),
            error: error.map(|e| e.to_string()),
        }
    }
}

/// Complete playback export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameLog {
    /// Dataset name or path
    pub dataset: String,

    /// Delay buffer, in ticks
    pub delay: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dressing: Option<SceneDressing>,

    /// All frames
    pub frames: Vec<FrameRecord>,

    /// Frame at which the animation completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<u64>,
}

impl FrameLog {
    /// Creates a new export container.
    pub fn new(dataset: &str, delay: u64) -> Self {
        Self {
            dataset: dataset.to_string(),
            delay,
            dressing: None,
            frames: Vec::new(),
            completed_at: None,
        }
    }

    pub fn with_dressing(mut self, dressing: SceneDressing) -> Self {
        self.dressing = Some(dressing);
        self
    }

    /// Adds a frame.
    pub fn push(&mut self, frame: FrameRecord) {
        if frame.complete && self.completed_at.is_none() {
            self.completed_at = Some(frame.frame);
        }
        self.frames.push(frame);
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
