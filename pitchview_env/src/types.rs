//! Common types for the PitchView renderer abstraction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque reference to a mesh resident in a renderer.
///
/// Handles are minted by the renderer on `create_tube` and become invalid
/// once disposed. Uses UUID v4 so that handles from different renderers
/// never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub Uuid);

impl MeshHandle {
    /// Creates a new random handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MeshHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MeshHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Show first 8 chars for readability
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Surface material assigned to a mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base (diffuse) color
    pub diffuse: Color,
}

impl Material {
    /// A plain diffuse material.
    pub fn diffuse(color: Color) -> Self {
        Self { diffuse: color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#616161"), Some(Color::rgb(0x61, 0x61, 0x61)));
        assert_eq!(Color::from_hex("1f77b4"), Some(Color::rgb(0x1f, 0x77, 0xb4)));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_handles_are_unique() {
        assert_ne!(MeshHandle::new(), MeshHandle::new());
    }

    #[test]
    fn test_handle_display_is_short() {
        let handle = MeshHandle::new();
        assert_eq!(handle.to_string().len(), 8);
    }
}
