//! Animation configuration and per-tube styling.

use crate::palette;
use crate::trajectory::Role;
use pitchview_env::{Color, Material};
use serde::{Deserialize, Serialize};

/// Ticks to wait before the first rebuild, giving the host time to warm up
pub const DEFAULT_DELAY_FRAMES: u64 = 50;

/// Trajectory tube radius, in metres
pub const DEFAULT_TUBE_RADIUS: f64 = 0.015;

/// Radius, resolution and material of one tube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TubeStyle {
    pub radius: f64,
    pub radial_segments: usize,
    pub material: Material,
}

/// Configuration for a `TrajectoryAnimator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Delay buffer, in ticks
    pub delay: u64,

    /// Trajectory tube radius
    pub tube_radius: f64,

    /// Radial segments of trajectory tubes
    pub tube_segments: usize,

    /// Connector radius (thinner than trajectory tubes)
    pub connector_radius: f64,

    /// Radial segments of the connector (fewer than trajectory tubes)
    pub connector_segments: usize,

    /// Join each trajectory tube's end back to its start
    pub closed: bool,

    pub main_color: Color,
    pub shadow_color: Color,
    pub connector_color: Color,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY_FRAMES,
            tube_radius: DEFAULT_TUBE_RADIUS,
            tube_segments: 8,
            connector_radius: DEFAULT_TUBE_RADIUS / 2.0,
            connector_segments: 5,
            closed: false,
            main_color: Color::BLUE,
            shadow_color: Color::GREEN,
            connector_color: Color::RED,
        }
    }
}

impl AnimationConfig {
    pub fn with_delay(mut self, delay: u64) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_tube(mut self, radius: f64, segments: usize) -> Self {
        self.tube_radius = radius;
        self.tube_segments = segments;
        self
    }

    pub fn with_connector(mut self, radius: f64, segments: usize) -> Self {
        self.connector_radius = radius;
        self.connector_segments = segments;
        self
    }

    /// Style of a trajectory tube. Each call yields its own material.
    pub fn trajectory_style(&self, role: Role) -> TubeStyle {
        let color = match role {
            Role::Main => self.main_color,
            Role::Shadow => self.shadow_color,
            Role::Extra(n) => palette::ordinal(n),
        };
        TubeStyle {
            radius: self.tube_radius,
            radial_segments: self.tube_segments,
            material: Material::diffuse(color),
        }
    }

    pub fn connector_style(&self) -> TubeStyle {
        TubeStyle {
            radius: self.connector_radius,
            radial_segments: self.connector_segments,
            material: Material::diffuse(self.connector_color),
        }
    }
}
