//! Tube mesh payload handed to renderers.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// CPU-side tube geometry ready for upload.
///
/// `path` is the centerline the tube was swept along. `vertices` are laid out
/// ring by ring: ring `k` occupies `vertices[k * radial_segments..(k + 1) * radial_segments]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TubeMesh {
    /// Centerline points, in render space
    pub path: Vec<Point3<f64>>,

    /// Tube radius, in render units
    pub radius: f64,

    /// Vertices per ring
    pub radial_segments: usize,

    /// Whether the last ring is joined back to the first
    pub closed: bool,

    /// Surface vertices
    pub vertices: Vec<Point3<f64>>,

    /// Outward unit normals, one per vertex
    pub normals: Vec<Vector3<f64>>,

    /// Triangle list into `vertices`
    pub triangles: Vec<[u32; 3]>,
}

impl TubeMesh {
    /// Number of centerline points.
    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    /// Number of surface vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}
