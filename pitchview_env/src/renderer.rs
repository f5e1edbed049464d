//! Core renderer capability trait for PitchView.

use crate::error::RenderError;
use crate::mesh::TubeMesh;
use crate::types::{Material, MeshHandle};

/// The central interface for scene interaction.
///
/// This trait abstracts the host rendering engine so that the animation
/// engine can run against a real viewer or a headless scene graph.
///
/// # Implementations
///
/// - **Headless**: `SceneRenderer` - in-memory handle arena, optional capacity
/// - **Viewer**: `RerunRenderer` (in `pitchview_core`, `visualization` feature)
///
/// # Ownership
///
/// Whoever receives a handle from `create_tube` owns it and is the only one
/// allowed to style or dispose it.
pub trait Renderer {
    /// Uploads a tube mesh and returns a handle to the new scene object.
    ///
    /// # Returns
    /// * `Ok(handle)` - The mesh is resident and will be displayed
    /// * `Err(RenderError::ResourceExhausted)` - No room for another mesh
    fn create_tube(&mut self, mesh: TubeMesh) -> Result<MeshHandle, RenderError>;

    /// Assigns a material to a resident mesh.
    fn set_material(&mut self, handle: MeshHandle, material: &Material) -> Result<(), RenderError>;

    /// Releases a mesh and every resource attached to it.
    ///
    /// Disposing an unknown or already disposed handle is an error.
    fn dispose(&mut self, handle: MeshHandle) -> Result<(), RenderError>;

    /// Notifies the renderer that a new display frame has started.
    ///
    /// Called once per tick before any geometry for that frame is built.
    fn begin_frame(&mut self, _frame: u64) {}
}
