//! Domain-to-render coordinate mapping.
//!
//! The data generator works in feet with z pointing up. The scene works in
//! metres with y pointing up, so the two vertical axes swap.

use crate::dataset::Sample;
use nalgebra::Point3;

/// Domain units (feet) per render unit (metre)
pub const DOMAIN_UNITS_PER_RENDER_UNIT: f64 = 3.281;

/// A sample position in render space.
pub type MappedPoint = Point3<f64>;

/// Maps one sample into render space.
///
/// Non-finite input is passed through untouched.
pub fn to_render_space(sample: &Sample) -> MappedPoint {
    Point3::new(
        sample.x / DOMAIN_UNITS_PER_RENDER_UNIT,
        sample.z / DOMAIN_UNITS_PER_RENDER_UNIT, // y and z are flipped in the data
        sample.y / DOMAIN_UNITS_PER_RENDER_UNIT,
    )
}
