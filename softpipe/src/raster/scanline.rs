//! Scanline traversal of a triangle split at its middle vertex.
//!
//! Vertices are sorted top to bottom. The upper half runs between the edges
//! `top -> mid` and `top -> bottom`, the lower half between `mid -> bottom`
//! and the same long edge. Each row steps both edge positions by their
//! inverse slope. A pixel is covered when its center lies in the half open
//! span `[left, right)`, and rows follow the same rule vertically, so
//! neighbouring triangles never share a pixel.

use std::ops::Range;

use super::bounding_box::BoundingBox;
use super::edge::MIN_AREA;
use crate::math::edge_function;
use crate::math_prelude::*;

/// First pixel row or column whose center is at or past `v`.
fn first_center(v: f32) -> i32 {
    (v - 0.5).ceil() as i32
}

/// `dx / dy` of the edge `a -> b`, zero for horizontal edges.
fn inverse_slope(a: Vec2, b: Vec2) -> f32 {
    let dy = b.y - a.y;
    if dy == 0.0 {
        0.0
    } else {
        (b.x - a.x) / dy
    }
}

/// Same contract as [`super::edge::fill_triangle`]: `plot(x, y, weights)`
/// for every covered pixel, weights in the order of `points`, false when the
/// triangle has no area.
pub fn fill_triangle<F>(points: [Vec2; 3], clip: &BoundingBox, mut plot: F) -> bool
where
    F: FnMut(i32, i32, [f32; 3]),
{
    let [v0, v1, v2] = points;
    let area = edge_function(v0, v1, v2);
    if !area.is_finite() || area.abs() < MIN_AREA {
        return false;
    }

    let mut sorted = points;
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y));
    let [top, mid, bottom] = sorted;
    let long_slope = inverse_slope(top, bottom);

    // barycentrics come from the unsorted triangle so the weights keep the
    // caller's vertex order; the clamp absorbs rounding at the span ends and
    // the weights are rescaled to sum to one again
    let weights = |p: Vec2| {
        let w = [
            edge_function(v1, v2, p) / area,
            edge_function(v2, v0, p) / area,
            edge_function(v0, v1, p) / area,
        ]
        .map(|w| w.max(0.0));
        let sum = w[0] + w[1] + w[2];
        if sum > 0.0 {
            w.map(|w| w / sum)
        } else {
            w
        }
    };
    let mut span = |y: i32, xa: f32, xb: f32| {
        let (left, right) = if xa <= xb { (xa, xb) } else { (xb, xa) };
        let start = first_center(left).max(clip.x());
        let end = first_center(right).min(clip.right());
        let py = y as f32 + 0.5;
        for x in start..end {
            plot(x, y, weights(Vec2::new(x as f32 + 0.5, py)));
        }
    };

    let upper = first_center(top.y)..first_center(mid.y);
    let lower = first_center(mid.y)..first_center(bottom.y);
    walk_half((top, mid), (top, long_slope), upper, clip, &mut span);
    walk_half((mid, bottom), (top, long_slope), lower, clip, &mut span);
    true
}

/// Walks `rows` of one half, calling `span(y, x_short, x_long)` per row.
fn walk_half<S>(
    short: (Vec2, Vec2),
    long: (Vec2, f32),
    rows: Range<i32>,
    clip: &BoundingBox,
    span: &mut S,
) where
    S: FnMut(i32, f32, f32),
{
    let rows = rows.start.max(clip.y())..rows.end.min(clip.bottom());
    if rows.is_empty() {
        return;
    }

    let (short_start, short_end) = short;
    let (long_start, long_slope) = long;
    let short_slope = inverse_slope(short_start, short_end);

    let py = rows.start as f32 + 0.5;
    let mut x_short = short_start.x + (py - short_start.y) * short_slope;
    let mut x_long = long_start.x + (py - long_start.y) * long_slope;
    for y in rows {
        span(y, x_short, x_long);
        x_short += short_slope;
        x_long += long_slope;
    }
}
