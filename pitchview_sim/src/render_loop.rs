//! Frame tick source and playback driver.

use crate::exporter::{FrameLog, FrameRecord};
use pitchview_core::{TickOutcome, TrajectoryAnimator};
use pitchview_env::Renderer;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Configuration for a playback run.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Ticks per second
    pub fps: u32,

    /// Stop after this many frames (0 = no cap)
    pub max_frames: u64,

    /// Frames to keep ticking once the animation is complete
    pub hold_frames: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            max_frames: 0,
            hold_frames: 30,
        }
    }
}

/// Per-frame tick source.
///
/// Calls the registered callback once per displayed frame. Awaiting the
/// interval is the only suspension point, so a callback always finishes
/// before the next frame starts.
pub struct RenderLoop {
    period: Duration,
}

impl RenderLoop {
    pub fn new(fps: u32) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Ticks until `on_frame` breaks. Returns the number of frames delivered.
    pub async fn run<F>(&self, mut on_frame: F) -> u64
    where
        F: FnMut() -> ControlFlow<()>,
    {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut delivered = 0;
        loop {
            interval.tick().await;
            delivered += 1;
            if on_frame().is_break() {
                return delivered;
            }
        }
    }
}

/// Outcome of a playback run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackSummary {
    pub frames: u64,
    pub rebuilds: u64,
    pub failed_ticks: u64,
    /// Frame at which the animation completed, if it did
    pub completed_at: Option<u64>,
}

/// Drives `animator` from a `RenderLoop` until the frame budget runs out,
/// or until `hold_frames` have passed after completion.
///
/// With `max_frames == 0` the run only ends through completion.
pub async fn play<R: Renderer>(
    animator: &mut TrajectoryAnimator<R>,
    config: &LoopConfig,
    mut log: Option<&mut FrameLog>,
) -> PlaybackSummary {
    let mut summary = PlaybackSummary::default();
    let render_loop = RenderLoop::new(config.fps);
    info!(
        fps = config.fps,
        max_frames = config.max_frames,
        period_ms = render_loop.period().as_secs_f64() * 1000.0,
        "Starting render loop"
    );

    let frames = render_loop
        .run(|| {
            let result = animator.tick();
            let frame = animator.frame();

            match &result {
                Ok(outcome) => {
                    if matches!(outcome, TickOutcome::Rebuilt { .. }) {
                        summary.rebuilds += 1;
                    }
                    debug!(?outcome, "tick");
                }
                Err(e) => {
                    summary.failed_ticks += 1;
                    warn!("Frame {} kept previous geometry: {}", frame, e);
                }
            }

            if let Some(log) = log.as_deref_mut() {
                log.push(FrameRecord::capture(animator, result.as_ref().err()));
            }

            if animator.is_complete() && summary.completed_at.is_none() {
                summary.completed_at = Some(frame);
            }

            let held_long_enough = summary
                .completed_at
                .is_some_and(|done| frame >= done + config.hold_frames);
            let out_of_budget = config.max_frames > 0 && frame >= config.max_frames;

            if held_long_enough || out_of_budget {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .await;
    summary.frames = frames;

    info!(
        frames = summary.frames,
        rebuilds = summary.rebuilds,
        failed_ticks = summary.failed_ticks,
        completed_at = ?summary.completed_at,
        "Render loop stopped"
    );
    summary
}
