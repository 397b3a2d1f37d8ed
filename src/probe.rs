//! Text rendering of a cone light for the headless probe.

use glam::IVec3;
use illuminated_light::ConeLightModel;

/// Horizontal slice of block light levels through the eye, one row per Z.
///
/// Levels print as hex digits, unlit blocks as `.` and the eye block as `@`.
pub fn render_slice(light: &ConeLightModel, radius: i32) -> String {
    let eye = light.frame().eye().floor().as_ivec3();
    let radius = radius.max(0);
    let mut out = String::new();
    for z in (eye.z - radius)..=(eye.z + radius) {
        for x in (eye.x - radius)..=(eye.x + radius) {
            let block = IVec3::new(x, eye.y, z);
            let glyph = if block == eye {
                '@'
            } else {
                level_glyph(light.light_level_at_block(block))
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn level_glyph(level: u8) -> char {
    match level {
        0 => '.',
        level => char::from_digit(u32::from(level.min(15)), 16).unwrap_or('f'),
    }
}

/// Number of blocks inside the light's bounding box that receive any light.
pub fn lit_block_count(light: &ConeLightModel) -> usize {
    light
        .bounding_box()
        .blocks()
        .filter(|block| light.light_level_at_block(*block) > 0)
        .count()
}
