//! Scene dressing around the animated tubes.

use pitchview_env::Color;
use serde::{Deserialize, Serialize};

/// Square ground patch under the pitch, rotated about the up axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundPlane {
    /// Center in render space (metres)
    pub center: [f64; 3],
    pub width: f64,
    pub depth: f64,
    /// Rotation about render up, in radians
    pub rotation_y: f64,
    pub color: Color,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0, 18.4],
            width: 27.4,
            depth: 27.4,
            rotation_y: std::f64::consts::FRAC_PI_4,
            color: Color::rgb(0x61, 0x61, 0x61),
        }
    }
}

/// Static, non-animated scene content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDressing {
    pub ground: GroundPlane,
}

impl SceneDressing {
    /// Logs the dressing to a Rerun renderer.
    #[cfg(feature = "visualization")]
    pub fn apply(
        &self,
        renderer: &pitchview_core::visualization::RerunRenderer,
    ) -> Result<(), pitchview_env::RenderError> {
        let g = &self.ground;
        renderer.log_ground_plane(g.center, g.width, g.depth, g.rotation_y, g.color)
    }
}
