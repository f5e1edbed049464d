//! PitchView Renderer Abstraction Layer
//!
//! This crate provides the seam between the trajectory-animation engine and
//! whatever host actually draws the scene. The engine never touches a scene
//! graph directly: every tube it shows goes through the [`Renderer`] trait,
//! and every tube it owns is referenced by an opaque [`MeshHandle`].
//!
//! # Core Concept: Replace, Don't Mutate
//!
//! Geometry is never edited in place. A tube is built, styled, shown, and
//! eventually disposed as a whole:
//!
//! ```text
//! Engine                         Renderer
//!   |-- create_tube(mesh) -------->|  -> MeshHandle (new)
//!   |-- set_material(new, mat) --->|
//!   |-- dispose(old) ------------->|
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pitchview_env::{Color, Material, Renderer, SceneRenderer};
//!
//! let mut scene = SceneRenderer::new();
//! let handle = scene.create_tube(mesh)?;
//! scene.set_material(handle, &Material::diffuse(Color::BLUE))?;
//! scene.dispose(handle)?;
//! ```

mod error;
mod mesh;
mod renderer;
mod scene;
mod types;

pub use error::RenderError;
pub use mesh::TubeMesh;
pub use renderer::Renderer;
pub use scene::{SceneMesh, SceneRenderer, SceneStats};
pub use types::{Color, Material, MeshHandle};
