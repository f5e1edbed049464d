//! Visualization backend for PitchView using Rerun.io
//!
//! `RerunRenderer` implements [`Renderer`] by logging each tube as a
//! `Mesh3D` under its own entity path:
//! - `world/tubes/<handle>`: one entity per resident mesh
//! - `world/ground`: static ground plane (scene dressing)
//! - `frame`: sequence timeline advanced on every tick
//!
//! Enable with the `visualization` feature flag.

use nalgebra::{UnitQuaternion, Vector3};
use pitchview_env::{Color, Material, MeshHandle, RenderError, Renderer, TubeMesh};
use rerun::{RecordingStream, RecordingStreamBuilder};
use std::collections::HashMap;

/// Rerun-backed renderer
pub struct RerunRenderer {
    rec: RecordingStream,
    meshes: HashMap<MeshHandle, TubeMesh>,
}

impl RerunRenderer {
    /// Create a renderer that spawns the Rerun viewer
    pub fn new(app_id: &str) -> Result<Self, RenderError> {
        let rec = RecordingStreamBuilder::new(app_id)
            .spawn()
            .map_err(RenderError::backend)?;
        Self::with_stream(rec)
    }

    /// Create a renderer that saves to a `.rrd` file
    pub fn new_to_file(app_id: &str, path: &str) -> Result<Self, RenderError> {
        let rec = RecordingStreamBuilder::new(app_id)
            .save(path)
            .map_err(RenderError::backend)?;
        Self::with_stream(rec)
    }

    fn with_stream(rec: RecordingStream) -> Result<Self, RenderError> {
        // Render space is y-up
        rec.log_static("world", &rerun::ViewCoordinates::RIGHT_HAND_Y_UP())
            .map_err(RenderError::backend)?;

        Ok(Self {
            rec,
            meshes: HashMap::new(),
        })
    }

    /// Log a flat ground plane rotated about the up axis
    pub fn log_ground_plane(
        &self,
        center: [f64; 3],
        width: f64,
        depth: f64,
        rotation_y: f64,
        color: Color,
    ) -> Result<(), RenderError> {
        let q = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), rotation_y);

        self.rec
            .log_static(
                "world/ground",
                &rerun::Boxes3D::from_centers_and_half_sizes(
                    [[center[0] as f32, center[1] as f32, center[2] as f32]],
                    [[(width / 2.0) as f32, 0.001, (depth / 2.0) as f32]],
                )
                .with_quaternions([rerun::Quaternion::from_xyzw([
                    q.i as f32, q.j as f32, q.k as f32, q.w as f32,
                ])])
                .with_colors([rerun::Color::from_rgb(color.r, color.g, color.b)])
                .with_fill_mode(rerun::FillMode::Solid),
            )
            .map_err(RenderError::backend)
    }

    fn entity_path(handle: MeshHandle) -> String {
        format!("world/tubes/{}", handle.as_uuid())
    }

    fn mesh_archetype(mesh: &TubeMesh) -> rerun::Mesh3D {
        rerun::Mesh3D::new(
            mesh.vertices
                .iter()
                .map(|v| [v.x as f32, v.y as f32, v.z as f32]),
        )
        .with_vertex_normals(mesh.normals.iter().map(|n| [n.x as f32, n.y as f32, n.z as f32]))
        .with_triangle_indices(mesh.triangles.iter().copied())
    }
}

impl Renderer for RerunRenderer {
    fn create_tube(&mut self, mesh: TubeMesh) -> Result<MeshHandle, RenderError> {
        let handle = MeshHandle::new();
        self.rec
            .log(Self::entity_path(handle), &Self::mesh_archetype(&mesh))
            .map_err(RenderError::backend)?;
        self.meshes.insert(handle, mesh);
        Ok(handle)
    }

    fn set_material(&mut self, handle: MeshHandle, material: &Material) -> Result<(), RenderError> {
        let mesh = self
            .meshes
            .get(&handle)
            .ok_or(RenderError::UnknownHandle(handle))?;
        let c = material.diffuse;

        self.rec
            .log(
                Self::entity_path(handle),
                &Self::mesh_archetype(mesh).with_albedo_factor(rerun::Rgba32::from_rgb(c.r, c.g, c.b)),
            )
            .map_err(RenderError::backend)
    }

    fn dispose(&mut self, handle: MeshHandle) -> Result<(), RenderError> {
        self.meshes
            .remove(&handle)
            .ok_or(RenderError::UnknownHandle(handle))?;
        self.rec
            .log(Self::entity_path(handle), &rerun::Clear::flat())
            .map_err(RenderError::backend)
    }

    fn begin_frame(&mut self, frame: u64) {
        self.rec.set_time_sequence("frame", frame as i64);
    }
}
