//! Tube geometry construction.
//!
//! Sweeps a circle of `radial_segments` vertices along a centerline using
//! parallel-transported frames, so rings do not twist between samples.

use crate::config::TubeStyle;
use crate::mapper::MappedPoint;
use nalgebra::Vector3;
use pitchview_env::{MeshHandle, RenderError, Renderer, TubeMesh};
use std::f64::consts::TAU;
use tracing::warn;

/// Segments shorter than this are treated as zero-length
const MIN_SEGMENT_LENGTH: f64 = 1e-12;

/// Stateless tube constructor.
pub struct GeometryBuilder;

impl GeometryBuilder {
    /// Builds a styled tube in `renderer` and returns its handle.
    ///
    /// The new mesh is fully styled before it is returned. If styling fails the
    /// new mesh is disposed again; a failed rollback is logged and the styling
    /// error is still returned.
    pub fn build<R: Renderer + ?Sized>(
        renderer: &mut R,
        path: &[MappedPoint],
        style: &TubeStyle,
        closed: bool,
    ) -> Result<MeshHandle, RenderError> {
        let mesh = Self::tube_mesh(path, style.radius, style.radial_segments, closed)?;
        let handle = renderer.create_tube(mesh)?;

        if let Err(e) = renderer.set_material(handle, &style.material) {
            if let Err(dispose_err) = renderer.dispose(handle) {
                warn!(%handle, error = %dispose_err, "Failed to roll back unstyled tube");
            }
            return Err(e);
        }

        Ok(handle)
    }

    /// Computes the tube surface for `path`.
    ///
    /// A single-point path yields one ring and no triangles. `closed` joins
    /// the last ring to the first when the path has more than two points.
    pub fn tube_mesh(
        path: &[MappedPoint],
        radius: f64,
        radial_segments: usize,
        closed: bool,
    ) -> Result<TubeMesh, RenderError> {
        if path.is_empty() {
            return Err(RenderError::EmptyPath);
        }
        if radius.is_nan() || radius <= 0.0 {
            return Err(RenderError::invalid_style(format!("radius {} must be positive", radius)));
        }
        if radial_segments < 3 {
            return Err(RenderError::invalid_style(format!(
                "{} radial segments, need at least 3",
                radial_segments
            )));
        }

        let wrap = closed && path.len() > 2;
        let tangents = path_tangents(path, wrap);
        let frames = transport_frames(&tangents);

        let ring_count = path.len();
        let mut vertices = Vec::with_capacity(ring_count * radial_segments);
        let mut normals = Vec::with_capacity(ring_count * radial_segments);

        for (center, (normal, binormal)) in path.iter().zip(&frames) {
            for s in 0..radial_segments {
                let theta = TAU * s as f64 / radial_segments as f64;
                let dir = normal * theta.cos() + binormal * theta.sin();
                vertices.push(center + dir * radius);
                normals.push(dir);
            }
        }

        let spans = if wrap { ring_count } else { ring_count - 1 };
        let mut triangles = Vec::with_capacity(spans * radial_segments * 2);
        for k in 0..spans {
            let a = k * radial_segments;
            let b = ((k + 1) % ring_count) * radial_segments;
            for s in 0..radial_segments {
                let s2 = (s + 1) % radial_segments;
                let (i0, i1) = ((a + s) as u32, (a + s2) as u32);
                let (i2, i3) = ((b + s) as u32, (b + s2) as u32);
                triangles.push([i0, i2, i1]);
                triangles.push([i1, i2, i3]);
            }
        }

        Ok(TubeMesh {
            path: path.to_vec(),
            radius,
            radial_segments,
            closed,
            vertices,
            normals,
            triangles,
        })
    }
}

/// Unit tangent per point, averaging the incoming and outgoing directions.
///
/// Points with no usable direction (duplicates, single-point paths) borrow
/// the nearest preceding tangent, or the first one found.
fn path_tangents(path: &[MappedPoint], wrap: bool) -> Vec<Vector3<f64>> {
    let n = path.len();
    let raw: Vec<Option<Vector3<f64>>> = (0..n)
        .map(|k| {
            let prev = match k {
                0 if wrap => Some(path[n - 1]),
                0 => None,
                _ => Some(path[k - 1]),
            };
            let next = if k + 1 < n {
                Some(path[k + 1])
            } else if wrap {
                Some(path[0])
            } else {
                None
            };

            let mut t = Vector3::zeros();
            if let Some(d) = prev.and_then(|p| (path[k] - p).try_normalize(MIN_SEGMENT_LENGTH)) {
                t += d;
            }
            if let Some(d) = next.and_then(|p| (p - path[k]).try_normalize(MIN_SEGMENT_LENGTH)) {
                t += d;
            }
            t.try_normalize(MIN_SEGMENT_LENGTH)
        })
        .collect();

    let mut last = raw.iter().flatten().next().copied().unwrap_or_else(Vector3::y);
    raw.into_iter()
        .map(|t| {
            if let Some(t) = t {
                last = t;
            }
            last
        })
        .collect()
}

/// (normal, binormal) per tangent, each frame transported from the previous one.
fn transport_frames(tangents: &[Vector3<f64>]) -> Vec<(Vector3<f64>, Vector3<f64>)> {
    let mut frames = Vec::with_capacity(tangents.len());
    let mut normal = match tangents.first() {
        Some(t) => seed_normal(t),
        None => return frames,
    };

    for t in tangents {
        normal = (normal - t * t.dot(&normal))
            .try_normalize(MIN_SEGMENT_LENGTH)
            .unwrap_or_else(|| seed_normal(t));
        frames.push((normal, t.cross(&normal)));
    }
    frames
}

/// Any unit vector perpendicular to `t`.
fn seed_normal(t: &Vector3<f64>) -> Vector3<f64> {
    let (x, y, z) = (t.x.abs(), t.y.abs(), t.z.abs());
    let axis = if x <= y && x <= z {
        Vector3::x()
    } else if y <= z {
        Vector3::y()
    } else {
        Vector3::z()
    };
    t.cross(&axis).normalize()
}
