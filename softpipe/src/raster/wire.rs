use itertools::Itertools;

use crate::framebuffer::RenderTarget;
use crate::math_prelude::*;

/// Side of the square drawn at each vertex, in pixels.
pub const MARKER_SIZE: i32 = 4;

/// Draws the segment `a -> b` with a DDA walk, one pixel per step along the
/// longer axis. No depth test.
pub fn draw_line<T: RenderTarget + ?Sized>(target: &mut T, a: Vec2, b: Vec2, color: u32) {
    if !a.is_finite() || !b.is_finite() {
        return;
    }
    let delta = b - a;
    let steps = delta.x.abs().max(delta.y.abs()).round() as i32;
    if steps == 0 {
        target.set_pixel(a.x.floor() as i32, a.y.floor() as i32, color);
        return;
    }

    let increment = delta / steps as f32;
    let mut current = a;
    for _ in 0..=steps {
        target.set_pixel(current.x.floor() as i32, current.y.floor() as i32, color);
        current += increment;
    }
}

/// Fills a [`MARKER_SIZE`] square centered on `center`.
pub fn draw_marker<T: RenderTarget + ?Sized>(target: &mut T, center: Vec2, color: u32) {
    if !center.is_finite() {
        return;
    }
    let x = center.x.floor() as i32 - MARKER_SIZE / 2;
    let y = center.y.floor() as i32 - MARKER_SIZE / 2;
    for (py, px) in (y..y + MARKER_SIZE).cartesian_product(x..x + MARKER_SIZE) {
        target.set_pixel(px, py, color);
    }
}
