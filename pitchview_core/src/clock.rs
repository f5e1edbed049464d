//! The frame clock: tick counter plus start delay.

use serde::{Deserialize, Serialize};

/// Where the animation stands for a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationPhase {
    /// Still inside the delay buffer
    Idle,
    /// Rebuilding geometry for `index`
    Animating { index: usize },
    /// Shortest trajectory exhausted; geometry frozen
    Complete,
}

impl AnimationPhase {
    pub fn index(&self) -> Option<usize> {
        match self {
            AnimationPhase::Animating { index } => Some(*index),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnimationPhase::Idle => "idle",
            AnimationPhase::Animating { .. } => "animating",
            AnimationPhase::Complete => "complete",
        }
    }
}

/// Counts display frames and maps them to animation indices.
///
/// `frame` is the number of ticks delivered so far. A tick animates the
/// index of the frame count it started from, so the first tick after the
/// delay buffer (tick `delay + 1`) animates index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    frame: u64,
    delay: u64,
}

impl FrameClock {
    pub fn new(delay: u64) -> Self {
        Self { frame: 0, delay }
    }

    /// Advances one frame and returns the new frame number.
    pub fn tick(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn delay(&self) -> u64 {
        self.delay
    }

    /// `frame - delay`; negative while inside the delay buffer.
    pub fn animation_index(&self, frame: u64) -> i64 {
        frame as i64 - self.delay as i64
    }

    /// Index animated by the tick that produced `frame`.
    pub fn tick_index(&self, frame: u64) -> i64 {
        self.animation_index(frame.saturating_sub(1))
    }

    /// Phase of the tick that produced `frame`.
    ///
    /// `max_usable_index` is `min(tracked lengths) - 1`; `None` means nothing
    /// is tracked and the animation completes as soon as it would start.
    pub fn phase(&self, frame: u64, max_usable_index: Option<usize>) -> AnimationPhase {
        let index = self.tick_index(frame);
        if index < 0 {
            return AnimationPhase::Idle;
        }

        match max_usable_index {
            Some(max) if (index as u64) < max as u64 => AnimationPhase::Animating {
                index: index as usize,
            },
            _ => AnimationPhase::Complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_counts_up() {
        let mut clock = FrameClock::new(50);
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.tick(), 1);
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_animation_index() {
        let clock = FrameClock::new(50);
        assert_eq!(clock.animation_index(0), -50);
        assert_eq!(clock.animation_index(50), 0);
        assert_eq!(clock.animation_index(55), 5);
    }

    #[test]
    fn test_phases_around_delay() {
        let clock = FrameClock::new(50);
        let max = Some(4);

        assert_eq!(clock.phase(1, max), AnimationPhase::Idle);
        assert_eq!(clock.phase(50, max), AnimationPhase::Idle);
        assert_eq!(clock.phase(51, max), AnimationPhase::Animating { index: 0 });
        assert_eq!(clock.phase(54, max), AnimationPhase::Animating { index: 3 });
        assert_eq!(clock.phase(55, max), AnimationPhase::Complete);
        assert_eq!(clock.phase(500, max), AnimationPhase::Complete);
    }

    #[test]
    fn test_zero_delay_starts_on_first_tick() {
        let clock = FrameClock::new(0);
        assert_eq!(clock.phase(1, Some(2)), AnimationPhase::Animating { index: 0 });
        assert_eq!(clock.phase(3, Some(2)), AnimationPhase::Complete);
    }

    #[test]
    fn test_nothing_tracked_completes() {
        let clock = FrameClock::new(2);
        assert_eq!(clock.phase(2, None), AnimationPhase::Idle);
        assert_eq!(clock.phase(3, None), AnimationPhase::Complete);
    }

    #[test]
    fn test_phase_accessors() {
        assert_eq!(AnimationPhase::Animating { index: 3 }.index(), Some(3));
        assert_eq!(AnimationPhase::Complete.index(), None);
        assert_eq!(AnimationPhase::Idle.name(), "idle");
    }
}
