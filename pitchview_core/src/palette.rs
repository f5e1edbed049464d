//! Ordinal color scale for labelling trajectories.

use pitchview_env::Color;

/// The ten-color categorical scheme used for pitch names
pub const CATEGORY10: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
];

/// Color for the `index`-th category, wrapping after ten.
pub fn ordinal(index: usize) -> Color {
    CATEGORY10[index % CATEGORY10.len()]
}
