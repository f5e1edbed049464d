//! The trajectory animator: per-tick orchestration of tube rebuilds.
//!
//! # Tick Lifecycle
//!
//! ```text
//! tick()
//!   |-- clock.tick() -> frame
//!   |-- Idle      -> nothing built, nothing shown
//!   |-- Animating -> for each slot: build new -> dispose old -> store new
//!   |-- Complete  -> geometry frozen, no renderer calls
//! ```
//!
//! The animator is the sole owner of every handle it creates. A slot whose
//! rebuild fails keeps its previous handle, so the scene never blanks.

use crate::clock::{AnimationPhase, FrameClock};
use crate::config::{AnimationConfig, TubeStyle};
use crate::dataset::TrajectoryRecord;
use crate::error::AnimationError;
use crate::geometry::GeometryBuilder;
use crate::mapper::MappedPoint;
use crate::trajectory::{self, Role, Trajectory};
use pitchview_env::{MeshHandle, RenderError, Renderer};
use tracing::{debug, info, warn};

/// Result of one successful tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Inside the delay buffer
    Idle { frame: u64 },
    /// Every slot was rebuilt for `index`
    Rebuilt { frame: u64, index: usize },
    /// Animation finished; geometry left as is
    Complete { frame: u64 },
}

impl TickOutcome {
    pub fn frame(&self) -> u64 {
        match *self {
            TickOutcome::Idle { frame }
            | TickOutcome::Rebuilt { frame, .. }
            | TickOutcome::Complete { frame } => frame,
        }
    }
}

/// One displayed tube and its single current handle.
#[derive(Debug)]
pub struct TubeSlot {
    label: String,
    role: Option<Role>,
    style: TubeStyle,
    handle: Option<MeshHandle>,
    path_len: usize,
}

impl TubeSlot {
    fn new(label: impl Into<String>, role: Option<Role>, style: TubeStyle) -> Self {
        Self {
            label: label.into(),
            role,
            style,
            handle: None,
            path_len: 0,
        }
    }

    /// Trajectory name, or `"connector"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// `None` for the connector.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn style(&self) -> &TubeStyle {
        &self.style
    }

    pub fn handle(&self) -> Option<MeshHandle> {
        self.handle
    }

    /// Points in the currently displayed path (0 before the first build).
    pub fn path_len(&self) -> usize {
        self.path_len
    }

    /// Swaps in a tube built from `path`: build new, dispose old, store new.
    fn replace<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        path: &[MappedPoint],
        closed: bool,
    ) -> Result<(), RenderError> {
        let fresh = GeometryBuilder::build(renderer, path, &self.style, closed)?;

        if let Some(stale) = self.handle.replace(fresh) {
            if let Err(e) = renderer.dispose(stale) {
                warn!(slot = %self.label, handle = %stale, "Failed to dispose stale tube: {}", e);
            }
        }
        self.path_len = path.len();
        Ok(())
    }
}

/// Drives tube geometry for a set of tracked trajectories.
///
/// Owns the frame clock, the renderer, one slot per trajectory and, when at
/// least two trajectories are tracked, a connector slot spanning the
/// corresponding points of the first two.
pub struct TrajectoryAnimator<R: Renderer> {
    renderer: R,
    clock: FrameClock,
    config: AnimationConfig,
    trajectories: Vec<Trajectory>,
    slots: Vec<TubeSlot>,
    connector: Option<TubeSlot>,
    max_usable_index: Option<usize>,
    phase: AnimationPhase,
}

impl<R: Renderer> TrajectoryAnimator<R> {
    /// Creates an animator over already validated trajectories.
    pub fn new(trajectories: Vec<Trajectory>, config: AnimationConfig, renderer: R) -> Self {
        let slots: Vec<TubeSlot> = trajectories
            .iter()
            .map(|t| TubeSlot::new(t.name(), Some(t.role()), config.trajectory_style(t.role())))
            .collect();

        let connector = (trajectories.len() >= 2)
            .then(|| TubeSlot::new("connector", None, config.connector_style()));
        if connector.is_none() {
            warn!(
                tracked = trajectories.len(),
                "Fewer than two usable trajectories; connector disabled"
            );
        }

        let max_usable_index = trajectories.iter().map(Trajectory::len).min().map(|n| n - 1);

        info!(
            tracked = trajectories.len(),
            delay = config.delay,
            max_usable_index = ?max_usable_index,
            "Animator ready"
        );

        Self {
            renderer,
            clock: FrameClock::new(config.delay),
            config,
            trajectories,
            slots,
            connector,
            max_usable_index,
            phase: AnimationPhase::Idle,
        }
    }

    /// Validates raw records, skipping malformed ones, then builds the animator.
    pub fn from_records(records: &[TrajectoryRecord], config: AnimationConfig, renderer: R) -> Self {
        Self::new(trajectory::track(records), config, renderer)
    }

    /// Advances one display frame.
    ///
    /// While animating, every slot is attempted even if an earlier one fails;
    /// the first failure is returned after all attempts.
    pub fn tick(&mut self) -> Result<TickOutcome, AnimationError> {
        let frame = self.clock.tick();
        self.renderer.begin_frame(frame);

        let phase = if self.phase == AnimationPhase::Complete {
            AnimationPhase::Complete
        } else {
            self.clock.phase(frame, self.max_usable_index)
        };

        match (self.phase, phase) {
            (AnimationPhase::Idle, AnimationPhase::Animating { .. }) => {
                info!(frame, "Animation started");
            }
            (AnimationPhase::Complete, _) => {}
            (_, AnimationPhase::Complete) => {
                info!(frame, "Animation complete; geometry frozen");
            }
            _ => {}
        }
        self.phase = phase;

        match phase {
            AnimationPhase::Idle => Ok(TickOutcome::Idle { frame }),
            AnimationPhase::Complete => Ok(TickOutcome::Complete { frame }),
            AnimationPhase::Animating { index } => self.rebuild(frame, index),
        }
    }

    fn rebuild(&mut self, frame: u64, index: usize) -> Result<TickOutcome, AnimationError> {
        let closed = self.config.closed;
        let mut attempted = 0;
        let mut failures: Vec<RenderError> = Vec::new();

        for (slot, trajectory) in self.slots.iter_mut().zip(&self.trajectories) {
            // index < max_usable_index <= len - 1
            let Some(path) = trajectory.buffer().prefix(index) else {
                continue;
            };
            attempted += 1;
            if let Err(e) = slot.replace(&mut self.renderer, &path, closed) {
                warn!(frame, index, slot = %slot.label, "Tube rebuild failed: {}", e);
                failures.push(e);
            }
        }

        if let Some(connector) = self.connector.as_mut() {
            let ends = self.trajectories[0]
                .buffer()
                .point(index)
                .zip(self.trajectories[1].buffer().point(index));
            if let Some((a, b)) = ends {
                attempted += 1;
                if let Err(e) = connector.replace(&mut self.renderer, &[a, b], false) {
                    warn!(frame, index, "Connector rebuild failed: {}", e);
                    failures.push(e);
                }
            }
        }

        debug!(frame, index, attempted, failed = failures.len(), "Rebuilt tubes");

        let failed = failures.len();
        match failures.into_iter().next() {
            None => Ok(TickOutcome::Rebuilt { frame, index }),
            Some(source) => Err(AnimationError::Rebuild {
                frame,
                index,
                failed,
                attempted,
                source,
            }),
        }
    }

    /// Phase computed by the most recent tick.
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == AnimationPhase::Complete
    }

    /// Ticks delivered so far.
    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// `min(tracked lengths) - 1`, or `None` when nothing is tracked.
    pub fn max_usable_index(&self) -> Option<usize> {
        self.max_usable_index
    }

    pub fn tracked(&self) -> &[Trajectory] {
        &self.trajectories
    }

    pub fn connector_enabled(&self) -> bool {
        self.connector.is_some()
    }

    /// Per-trajectory slots, in tracked order.
    pub fn slots(&self) -> &[TubeSlot] {
        &self.slots
    }

    pub fn connector(&self) -> Option<&TubeSlot> {
        self.connector.as_ref()
    }

    /// Every handle currently owned, trajectories first, connector last.
    pub fn handles(&self) -> Vec<MeshHandle> {
        self.slots
            .iter()
            .chain(self.connector.as_ref())
            .filter_map(TubeSlot::handle)
            .collect()
    }

    /// Read-only access to the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable renderer access for host-side dressing. Handles owned by the
    /// animator must not be touched through it.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Gives the renderer back, dropping the animator.
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{sample_dataset, Sample};
    use pitchview_env::{Color, Material, SceneRenderer};

    fn record(name: &str, n: usize, offset: f64) -> TrajectoryRecord {
        TrajectoryRecord::new(
            name,
            (0..n)
                .map(|k| Sample::new(k as f64 + offset, 10.0, k as f64, k as f64 * 0.1))
                .collect(),
        )
    }

    fn animator(records: &[TrajectoryRecord], delay: u64) -> TrajectoryAnimator<SceneRenderer> {
        TrajectoryAnimator::from_records(
            records,
            AnimationConfig::default().with_delay(delay),
            SceneRenderer::new(),
        )
    }

    #[test]
    fn test_idle_builds_nothing() {
        let mut anim = animator(&sample_dataset(), 3);
        for frame in 1..=3 {
            assert_eq!(anim.tick().unwrap(), TickOutcome::Idle { frame });
        }
        assert!(anim.handles().is_empty());
        assert_eq!(anim.renderer().stats().created, 0);
    }

    #[test]
    fn test_first_animated_tick() {
        let mut anim = animator(&sample_dataset(), 0);
        assert_eq!(anim.tick().unwrap(), TickOutcome::Rebuilt { frame: 1, index: 0 });

        let scene = anim.renderer();
        for (slot, trajectory) in anim.slots().iter().zip(anim.tracked()) {
            let mesh = &scene.get(slot.handle().unwrap()).unwrap().mesh;
            let p0 = trajectory.points()[0];
            assert_eq!(mesh.path, vec![p0, p0]);
        }

        let connector = anim.connector().unwrap();
        let mesh = &scene.get(connector.handle().unwrap()).unwrap().mesh;
        assert_eq!(
            mesh.path,
            vec![anim.tracked()[0].points()[0], anim.tracked()[1].points()[0]]
        );
        assert_eq!(scene.resident(), 3);
    }

    #[test]
    fn test_each_tube_keeps_its_own_material() {
        let mut anim = animator(&sample_dataset(), 0);
        anim.tick().unwrap();

        let scene = anim.renderer();
        let color_of = |handle: MeshHandle| scene.get(handle).unwrap().material.clone();
        assert_eq!(
            color_of(anim.slots()[0].handle().unwrap()),
            Some(Material::diffuse(Color::BLUE))
        );
        assert_eq!(
            color_of(anim.slots()[1].handle().unwrap()),
            Some(Material::diffuse(Color::GREEN))
        );
        assert_eq!(
            color_of(anim.connector().unwrap().handle().unwrap()),
            Some(Material::diffuse(Color::RED))
        );
    }

    #[test]
    fn test_one_generation_resident() {
        let mut anim = animator(&sample_dataset(), 0);
        for _ in 0..10 {
            anim.tick().unwrap();
            assert!(anim.renderer().resident() <= 3);
        }
        let stats = anim.renderer().stats();
        assert_eq!(stats.created - stats.disposed, 3);
    }

    #[test]
    fn test_length_mismatch_bounded_by_shortest() {
        let records = vec![record("long", 9, 0.0), record("short", 4, 1.0)];
        let mut anim = animator(&records, 0);
        assert_eq!(anim.max_usable_index(), Some(2));

        assert_eq!(anim.tick().unwrap(), TickOutcome::Rebuilt { frame: 1, index: 0 });
        assert_eq!(anim.tick().unwrap(), TickOutcome::Rebuilt { frame: 2, index: 1 });
        assert_eq!(anim.tick().unwrap(), TickOutcome::Complete { frame: 3 });
        assert_eq!(anim.slots()[0].path_len(), 3);
    }

    #[test]
    fn test_single_trajectory_has_no_connector() {
        let records = vec![record("alone", 5, 0.0), record("broken", 1, 0.0)];
        let mut anim = animator(&records, 0);

        assert!(!anim.connector_enabled());
        assert_eq!(anim.tick().unwrap(), TickOutcome::Rebuilt { frame: 1, index: 0 });
        assert_eq!(anim.handles().len(), 1);
    }

    #[test]
    fn test_nothing_tracked() {
        let mut anim = animator(&[record("broken", 2, 0.0)], 1);
        assert_eq!(anim.max_usable_index(), None);
        assert_eq!(anim.tick().unwrap(), TickOutcome::Idle { frame: 1 });
        assert_eq!(anim.tick().unwrap(), TickOutcome::Complete { frame: 2 });
        assert!(anim.handles().is_empty());
    }

    #[test]
    fn test_extra_trajectories_animate_without_extra_connectors() {
        let records = vec![
            record("a", 6, 0.0),
            record("b", 6, 1.0),
            record("c", 6, 2.0),
        ];
        let mut anim = animator(&records, 0);
        anim.tick().unwrap();

        assert_eq!(anim.slots()[2].role(), Some(Role::Extra(2)));
        assert_eq!(anim.handles().len(), 4);
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_geometry() {
        let mut anim = animator(&sample_dataset(), 0);
        anim.tick().unwrap();
        let before = anim.handles();

        // No headroom: every build fails
        anim.renderer_mut().set_capacity(Some(3));
        let err = anim.tick().unwrap_err();
        match err {
            AnimationError::Rebuild {
                frame,
                index,
                failed,
                attempted,
                ref source,
            } => {
                assert_eq!((frame, index, failed, attempted), (2, 1, 3, 3));
                assert!(matches!(source, RenderError::ResourceExhausted { capacity: 3 }));
            }
        }
        assert_eq!(anim.handles(), before);
        assert!(before.iter().all(|h| anim.renderer().contains(*h)));

        // One spare mesh is enough for build-then-dispose
        anim.renderer_mut().set_capacity(Some(4));
        assert_eq!(anim.tick().unwrap(), TickOutcome::Rebuilt { frame: 3, index: 2 });
        assert_eq!(anim.slots()[0].path_len(), 4);
        assert!(before.iter().all(|h| !anim.renderer().contains(*h)));
    }

    #[test]
    fn test_complete_is_terminal_and_silent() {
        let mut anim = animator(&sample_dataset(), 0);
        while !anim.is_complete() {
            anim.tick().unwrap();
        }
        let frozen = anim.handles();
        let stats = anim.renderer().stats();

        for _ in 0..20 {
            assert!(matches!(anim.tick().unwrap(), TickOutcome::Complete { .. }));
        }
        assert_eq!(anim.handles(), frozen);
        assert_eq!(anim.renderer().stats(), stats);
    }

    #[test]
    fn test_into_renderer_keeps_final_scene() {
        let mut anim = animator(&sample_dataset(), 2);
        assert_eq!(anim.config().delay, 2);
        while !anim.is_complete() {
            anim.tick().unwrap();
        }
        let handles = anim.handles();

        let scene = anim.into_renderer();
        assert_eq!(scene.resident(), handles.len());
        assert!(handles.iter().all(|&h| scene.contains(h)));
    }
}
