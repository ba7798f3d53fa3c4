use itertools::Itertools;

use crate::math_prelude::*;

/// Pixel rectangle, `x..x + w` by `y..y + h`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn viewport(width: usize, height: usize) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Smallest box holding every pixel whose center may lie inside the
    /// given points. `None` when a coordinate is not finite.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        if points.iter().any(|p| !p.is_finite()) {
            return None;
        }
        let min = points.iter().fold(Vec2::splat(f32::MAX), |m, p| m.min(*p));
        let max = points.iter().fold(Vec2::splat(f32::MIN), |m, p| m.max(*p));
        // huge values saturate in the cast and are cut by the viewport later
        let x = min.x.floor() as i32;
        let y = min.y.floor() as i32;
        let w = (max.x.ceil() as i32).saturating_sub(x);
        let h = (max.y.ceil() as i32).saturating_sub(y);
        Some(Self::new(x, y, w, h))
    }

    pub fn x(&self) -> i32 {
        self.x
    }
    pub fn y(&self) -> i32 {
        self.y
    }
    pub fn width(&self) -> i32 {
        self.w
    }
    pub fn height(&self) -> i32 {
        self.h
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Intersection of both boxes, `None` when it is empty.
    pub fn overlap(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let maxl = self.x.max(other.x);
        let minr = self.right().min(other.right());
        if minr <= maxl {
            return None;
        }

        let maxt = self.y.max(other.y);
        let minb = self.bottom().min(other.bottom());
        if minb <= maxt {
            return None;
        }

        Some(BoundingBox::new(maxl, maxt, minr - maxl, minb - maxt))
    }

    /// Pixel coordinates, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32)> {
        (self.y..self.bottom())
            .cartesian_product(self.x..self.right())
            .map(|(y, x)| (x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_covers_fractional_points() {
        let bb = BoundingBox::from_points(&[Vec2::new(1.2, 3.7), Vec2::new(4.5, 0.5)]).unwrap();
        assert_eq!(bb, BoundingBox::new(1, 0, 4, 4));
    }

    #[test]
    fn overlap_is_clipped_to_both() {
        let a = BoundingBox::new(-5, -5, 10, 10);
        let b = BoundingBox::viewport(8, 8);
        assert_eq!(a.overlap(&b), Some(BoundingBox::new(0, 0, 5, 5)));
        assert_eq!(BoundingBox::new(10, 10, 2, 2).overlap(&b), None);
    }

    #[test]
    fn pixels_walk_rows() {
        let px: Vec<_> = BoundingBox::new(2, 3, 2, 2).pixels().collect();
        assert_eq!(px, [(2, 3), (3, 3), (2, 4), (3, 4)]);
    }

    #[test]
    fn non_finite_points_have_no_box() {
        assert!(BoundingBox::from_points(&[Vec2::new(f32::NAN, 0.0)]).is_none());
    }
}
