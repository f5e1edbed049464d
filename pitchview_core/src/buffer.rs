//! Trimmed, render-space view of a trajectory.

use crate::dataset::Sample;
use crate::mapper::{to_render_space, MappedPoint};

/// Ordered render-space points of one trajectory.
///
/// Built once at setup and never mutated. The final raw sample is the data
/// generator's one-step overrun and is always dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectoryBuffer {
    points: Vec<MappedPoint>,
}

impl TrajectoryBuffer {
    /// Drops the sentinel sample and maps the rest.
    ///
    /// Fewer than 2 raw samples leaves nothing usable.
    pub fn from_samples(samples: &[Sample]) -> Self {
        let usable = samples.split_last().map_or(&[][..], |(_, rest)| rest);
        Self {
            points: usable.iter().map(to_render_space).collect(),
        }
    }

    pub fn points(&self) -> &[MappedPoint] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<MappedPoint> {
        self.points.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The path drawn at animation index `index`: the first point, then
    /// points `0..=index`.
    ///
    /// The leading duplicate keeps the path non-empty at index 0. Returns
    /// `None` when `index` is past the end.
    pub fn prefix(&self, index: usize) -> Option<Vec<MappedPoint>> {
        let head = self.points.get(..=index)?;
        let mut path = Vec::with_capacity(index + 2);
        path.push(head[0]);
        path.extend_from_slice(head);
        Some(path)
    }
}
