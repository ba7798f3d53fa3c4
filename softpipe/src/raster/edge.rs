//! Bounding box traversal with edge functions.

use super::bounding_box::BoundingBox;
use crate::math::edge_function;
use crate::math_prelude::*;

/// Twice the screen area below which a triangle is skipped.
pub const MIN_AREA: f32 = 1e-6;

/// Whether `a -> b` is a top or left edge of a triangle with positive area
/// in y-down screen space.
fn is_top_left(a: Vec2, b: Vec2) -> bool {
    let d = b - a;
    (d.y == 0.0 && d.x > 0.0) || d.y < 0.0
}

/// Calls `plot(x, y, weights)` for every pixel whose center lies inside the
/// triangle, `weights` being the screen space barycentric weights of
/// `points` in their given order. Pixel centers exactly on a shared edge go
/// to one triangle only.
///
/// Returns false, plotting nothing, when the triangle has no area.
pub fn fill_triangle<F>(points: [Vec2; 3], clip: &BoundingBox, mut plot: F) -> bool
where
    F: FnMut(i32, i32, [f32; 3]),
{
    let [v0, mut v1, mut v2] = points;
    let mut area = edge_function(v0, v1, v2);
    if !area.is_finite() || area.abs() < MIN_AREA {
        return false;
    }
    // counter clockwise on screen: walk it the other way round and remember
    // which weight belongs to which input vertex
    let mut order = [0, 1, 2];
    if area < 0.0 {
        std::mem::swap(&mut v1, &mut v2);
        order.swap(1, 2);
        area = -area;
    }

    let area_box = match BoundingBox::from_points(&[v0, v1, v2]).and_then(|bb| bb.overlap(clip)) {
        Some(bb) => bb,
        None => return true,
    };

    let top_left = [is_top_left(v1, v2), is_top_left(v2, v0), is_top_left(v0, v1)];
    let inside = |w: f32, top_left: bool| w > 0.0 || (w == 0.0 && top_left);

    for (x, y) in area_box.pixels() {
        let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
        let w = [
            edge_function(v1, v2, p),
            edge_function(v2, v0, p),
            edge_function(v0, v1, p),
        ];
        if !(inside(w[0], top_left[0]) && inside(w[1], top_left[1]) && inside(w[2], top_left[2])) {
            continue;
        }

        let mut weights = [0.0; 3];
        for (i, &slot) in order.iter().enumerate() {
            weights[slot] = w[i] / area;
        }
        plot(x, y, weights);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn covered(points: [Vec2; 3]) -> Vec<(i32, i32, [f32; 3])> {
        let mut out = Vec::new();
        let clip = BoundingBox::viewport(16, 16);
        fill_triangle(points, &clip, |x, y, w| out.push((x, y, w)));
        out
    }

    #[test]
    fn weights_sum_to_one_and_match_winding() {
        let cw = [Vec2::new(1.0, 9.0), Vec2::new(5.0, 1.0), Vec2::new(9.0, 9.0)];
        let ccw = [cw[0], cw[2], cw[1]];
        let a = covered(cw);
        let b = covered(ccw);
        assert!(!a.is_empty());
        assert_eq!(a.len(), b.len());
        for ((xa, ya, wa), (xb, yb, wb)) in a.iter().zip(&b) {
            assert_eq!((xa, ya), (xb, yb));
            assert!((wa.iter().sum::<f32>() - 1.0).abs() < 1e-5);
            assert!((wa[0] - wb[0]).abs() < 1e-6);
            assert!((wa[1] - wb[2]).abs() < 1e-6);
            assert!((wa[2] - wb[1]).abs() < 1e-6);
        }
    }

    #[test]
    fn nearest_vertex_dominates_weights() {
        let points = [Vec2::new(0.0, 10.0), Vec2::new(4.5, 0.5), Vec2::new(10.0, 10.0)];
        let w = covered(points)
            .into_iter()
            .find(|&(x, y, _)| (x, y) == (4, 2))
            .map(|(_, _, w)| w)
            .unwrap();
        // edge functions at (4.5, 2.5) are 11, 75 and 9, the area is 95
        assert!((w[1] - 75.0 / 95.0).abs() < 1e-5);
        assert!((w[0] - 11.0 / 95.0).abs() < 1e-5);
    }

    #[test]
    fn shared_edge_is_drawn_once() {
        // square split along its diagonal, diagonal through pixel centers
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(8.0, 0.0);
        let c = Vec2::new(8.0, 8.0);
        let d = Vec2::new(0.0, 8.0);
        let mut hits: HashMap<(i32, i32), u32> = HashMap::new();
        for tri in [[a, b, c], [a, c, d]] {
            for (x, y, _) in covered(tri) {
                *hits.entry((x, y)).or_default() += 1;
            }
        }
        assert_eq!(hits.len(), 64);
        assert!(hits.values().all(|&n| n == 1));
    }

    #[test]
    fn degenerate_triangle_is_rejected() {
        let line = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0), Vec2::new(8.0, 8.0)];
        let clip = BoundingBox::viewport(16, 16);
        assert!(!fill_triangle(line, &clip, |_, _, _| panic!("plotted a line")));
    }

    #[test]
    fn pixels_outside_the_viewport_are_skipped() {
        let points = [Vec2::new(-20.0, 40.0), Vec2::new(8.0, -20.0), Vec2::new(40.0, 40.0)];
        for (x, y, _) in covered(points) {
            assert!((0..16).contains(&x) && (0..16).contains(&y));
        }
        assert_eq!(covered(points).len(), 256);
    }
}
