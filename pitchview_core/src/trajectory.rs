//! Validated, immutable trajectories ready for animation.

use crate::buffer::TrajectoryBuffer;
use crate::dataset::{Sample, Timing, TrajectoryRecord};
use crate::error::TrajectoryError;
use crate::mapper::MappedPoint;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Styling role of a tracked trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Main,
    Shadow,
    /// Any trajectory past the first two, by tracked position
    Extra(usize),
}

impl Role {
    /// Role of the `position`-th usable trajectory.
    pub fn for_position(position: usize) -> Self {
        match position {
            0 => Role::Main,
            1 => Role::Shadow,
            n => Role::Extra(n),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Main => write!(f, "main"),
            Role::Shadow => write!(f, "shadow"),
            Role::Extra(n) => write!(f, "extra{}", n),
        }
    }
}

/// A named trajectory with its sentinel sample removed.
#[derive(Debug, Clone)]
pub struct Trajectory {
    name: String,
    role: Role,
    samples: Vec<Sample>,
    buffer: TrajectoryBuffer,
    timing: Timing,
}

impl Trajectory {
    /// Minimum number of samples left after sentinel removal
    pub const MIN_USABLE_SAMPLES: usize = 2;

    /// Validates a raw record and derives its render-space points.
    pub fn new(record: &TrajectoryRecord, role: Role) -> Result<Self, TrajectoryError> {
        let buffer = TrajectoryBuffer::from_samples(&record.samples);
        if buffer.len() < Self::MIN_USABLE_SAMPLES {
            return Err(TrajectoryError::Malformed {
                name: record.name.clone(),
                usable: buffer.len(),
            });
        }

        Ok(Self {
            name: record.name.clone(),
            role,
            samples: record.samples[..buffer.len()].to_vec(),
            buffer,
            timing: record.timing(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Samples after sentinel removal.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn buffer(&self) -> &TrajectoryBuffer {
        &self.buffer
    }

    pub fn points(&self) -> &[MappedPoint] {
        self.buffer.points()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }
}

/// Builds the tracked set from raw records.
///
/// Malformed records are logged and skipped. Roles follow the order of the
/// records that survive, so a bad first record promotes the next one to main.
pub fn track(records: &[TrajectoryRecord]) -> Vec<Trajectory> {
    let mut tracked: Vec<Trajectory> = Vec::with_capacity(records.len());

    for record in records {
        if !record.is_time_ordered() {
            warn!(name = %record.name, "Sample times decrease; animating in recorded order");
        }

        match Trajectory::new(record, Role::for_position(tracked.len())) {
            Ok(trajectory) => {
                info!(
                    name = %trajectory.name(),
                    role = %trajectory.role(),
                    points = trajectory.len(),
                    duration_ms = trajectory.timing().duration_ms,
                    "Tracking trajectory"
                );
                tracked.push(trajectory);
            }
            Err(e) => warn!("Skipping trajectory: {}", e),
        }
    }

    tracked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, n: usize) -> TrajectoryRecord {
        TrajectoryRecord::new(
            name,
            (0..n)
                .map(|k| Sample::new(k as f64, 1.0, 2.0, k as f64 * 0.1))
                .collect(),
        )
    }

    #[test]
    fn test_trajectory_trims_sentinel() {
        let t = Trajectory::new(&record("a", 6), Role::Main).unwrap();
        assert_eq!(t.len(), 5);
        assert_eq!(t.samples().len(), 5);
        assert_eq!(t.samples()[4].x, 4.0);
        assert_eq!(t.role(), Role::Main);
    }

    #[test]
    fn test_malformed_trajectory() {
        // Two raw samples leave a single usable point
        let err = Trajectory::new(&record("short", 2), Role::Main).unwrap_err();
        assert!(matches!(
            err,
            TrajectoryError::Malformed { ref name, usable: 1 } if name == "short"
        ));
        assert!(Trajectory::new(&record("min", 3), Role::Main).is_ok());
    }

    #[test]
    fn test_track_skips_malformed_and_reassigns_roles() {
        let records = vec![
            record("broken", 1),
            record("first", 6),
            record("second", 4),
            record("third", 8),
        ];
        let tracked = track(&records);

        let summary: Vec<(&str, Role)> = tracked.iter().map(|t| (t.name(), t.role())).collect();
        assert_eq!(
            summary,
            vec![
                ("first", Role::Main),
                ("second", Role::Shadow),
                ("third", Role::Extra(2)),
            ]
        );
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Main.to_string(), "main");
        assert_eq!(Role::Shadow.to_string(), "shadow");
        assert_eq!(Role::Extra(3).to_string(), "extra3");
    }
}
