//! Headless implementation of Renderer backed by an in-memory scene graph.

use crate::error::RenderError;
use crate::mesh::TubeMesh;
use crate::renderer::Renderer;
use crate::types::{Material, MeshHandle};
use std::collections::HashMap;

/// A mesh resident in the scene.
#[derive(Debug, Clone)]
pub struct SceneMesh {
    pub mesh: TubeMesh,
    pub material: Option<Material>,
    /// Frame during which the mesh was created
    pub created_frame: u64,
}

/// Lifetime counters for a scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub created: u64,
    pub disposed: u64,
    pub rejected: u64,
}

/// In-memory scene graph.
///
/// Keeps every resident mesh in a handle arena so the headless host and the
/// tests can inspect exactly what would be on screen. An optional capacity
/// models render-resource exhaustion: once `capacity` meshes are resident,
/// `create_tube` fails until something is disposed.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    meshes: HashMap<MeshHandle, SceneMesh>,
    capacity: Option<usize>,
    frame: u64,
    stats: SceneStats,
}

impl SceneRenderer {
    /// Creates an unbounded scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scene that holds at most `capacity` meshes at once.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Changes the resident-mesh cap (`None` = unbounded).
    pub fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
    }

    /// Returns a resident mesh.
    pub fn get(&self, handle: MeshHandle) -> Option<&SceneMesh> {
        self.meshes.get(&handle)
    }

    pub fn contains(&self, handle: MeshHandle) -> bool {
        self.meshes.contains_key(&handle)
    }

    /// Number of meshes currently resident.
    pub fn resident(&self) -> usize {
        self.meshes.len()
    }

    /// Last frame announced via `begin_frame`.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }
}

impl Renderer for SceneRenderer {
    fn create_tube(&mut self, mesh: TubeMesh) -> Result<MeshHandle, RenderError> {
        if let Some(capacity) = self.capacity {
            if self.meshes.len() >= capacity {
                self.stats.rejected += 1;
                return Err(RenderError::ResourceExhausted { capacity });
            }
        }

        let handle = MeshHandle::new();
        tracing::trace!(
            %handle,
            points = mesh.path_len(),
            triangles = mesh.triangle_count(),
            "scene: create tube"
        );
        self.meshes.insert(
            handle,
            SceneMesh {
                mesh,
                material: None,
                created_frame: self.frame,
            },
        );
        self.stats.created += 1;
        Ok(handle)
    }

    fn set_material(&mut self, handle: MeshHandle, material: &Material) -> Result<(), RenderError> {
        let entry = self
            .meshes
            .get_mut(&handle)
            .ok_or(RenderError::UnknownHandle(handle))?;
        entry.material = Some(material.clone());
        Ok(())
    }

    fn dispose(&mut self, handle: MeshHandle) -> Result<(), RenderError> {
        self.meshes
            .remove(&handle)
            .ok_or(RenderError::UnknownHandle(handle))?;
        self.stats.disposed += 1;
        Ok(())
    }

    fn begin_frame(&mut self, frame: u64) {
        self.frame = frame;
    }
}
