//! Sutherland-Hodgman clipping of view space triangles against the six
//! frustum planes.

use crate::interpolate::Interpolate;
use crate::math;
use crate::math_prelude::*;

/// Upper bound on the vertices of a triangle clipped by six planes, each
/// plane adds at most one.
pub const MAX_POLYGON_VERTICES: usize = 3 + 6;

/// A vertex that can be clipped: it has a view space position and its
/// attributes can be blended along an edge.
pub trait ClipVertex: Interpolate + Clone {
    fn position(&self) -> Vec3;
}

impl ClipVertex for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }
}

/// Plane through `point`, with `normal` pointing to the inside half-space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: math::normalize_or_zero(normal),
        }
    }

    /// Positive inside, negative outside.
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p - self.point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    pub const LEFT: usize = 0;
    pub const RIGHT: usize = 1;
    pub const TOP: usize = 2;
    pub const BOTTOM: usize = 3;
    pub const NEAR: usize = 4;
    pub const FAR: usize = 5;

    /// View frustum of a camera at the origin looking down `+z`, both field
    /// of view angles in radians.
    pub fn new(fov_x: f32, fov_y: f32, znear: f32, zfar: f32) -> Self {
        let (sin_x, cos_x) = (fov_x / 2.0).sin_cos();
        let (sin_y, cos_y) = (fov_y / 2.0).sin_cos();

        Self {
            planes: [
                Plane::new(Vec3::ZERO, Vec3::new(cos_x, 0.0, sin_x)),
                Plane::new(Vec3::ZERO, Vec3::new(-cos_x, 0.0, sin_x)),
                Plane::new(Vec3::ZERO, Vec3::new(0.0, -cos_y, sin_y)),
                Plane::new(Vec3::ZERO, Vec3::new(0.0, cos_y, sin_y)),
                Plane::new(Vec3::new(0.0, 0.0, znear), Vec3::Z),
                Plane::new(Vec3::new(0.0, 0.0, zfar), -Vec3::Z),
            ],
        }
    }

    /// Frustum for a vertical field of view on a viewport with the given
    /// aspect ratio (width / height).
    pub fn from_vertical_fov(fov_y: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self::new(math::horizontal_fov(fov_y, aspect), fov_y, znear, zfar)
    }

    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    pub fn contains(&self, p: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.signed_distance(p) >= 0.0)
    }
}

/// Working polygon of the clipper.
///
/// Both vertex buffers are kept between uses so clipping every face of a
/// frame does not allocate.
#[derive(Debug, Clone)]
pub struct Polygon<V> {
    vertices: Vec<V>,
    scratch: Vec<V>,
    overflowed: bool,
}

impl<V: ClipVertex> Default for Polygon<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ClipVertex> Polygon<V> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(MAX_POLYGON_VERTICES),
            scratch: Vec::with_capacity(MAX_POLYGON_VERTICES),
            overflowed: false,
        }
    }

    pub fn from_triangle(triangle: [V; 3]) -> Self {
        let mut polygon = Self::new();
        polygon.reset(triangle);
        polygon
    }

    /// Reuses the polygon for another triangle.
    pub fn reset(&mut self, triangle: [V; 3]) {
        self.vertices.clear();
        self.vertices.extend(triangle);
        self.overflowed = false;
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether a clip produced more than [`MAX_POLYGON_VERTICES`] vertices
    /// since the last reset; the extra vertices were dropped.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Keeps the part of the polygon on the inside of `plane`. Vertices on
    /// the plane count as inside.
    pub fn clip_against(&mut self, plane: &Plane) {
        self.scratch.clear();
        let Some(last) = self.vertices.last() else {
            return;
        };

        let mut previous = last;
        let mut previous_distance = plane.signed_distance(previous.position());
        for current in &self.vertices {
            let current_distance = plane.signed_distance(current.position());
            let previous_inside = previous_distance >= 0.0;
            let current_inside = current_distance >= 0.0;

            if previous_inside != current_inside {
                let t = previous_distance / (previous_distance - current_distance);
                push_bounded(
                    &mut self.scratch,
                    V::lerp(previous, current, t),
                    &mut self.overflowed,
                );
            }
            if current_inside {
                push_bounded(&mut self.scratch, current.clone(), &mut self.overflowed);
            }

            previous = current;
            previous_distance = current_distance;
        }

        std::mem::swap(&mut self.vertices, &mut self.scratch);
    }

    /// Clips against every frustum plane, stopping early once nothing is left.
    pub fn clip(&mut self, frustum: &Frustum) {
        for plane in frustum.planes() {
            if self.vertices.is_empty() {
                break;
            }
            self.clip_against(plane);
        }
        if self.vertices.len() < 3 {
            self.vertices.clear();
        }
    }

    /// Number of triangles [`Polygon::triangles`] yields.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len().saturating_sub(2)
    }

    /// Fan triangulation around the first vertex: `(0, i + 1, i + 2)`.
    pub fn triangles(&self) -> impl Iterator<Item = [V; 3]> + '_ {
        (0..self.triangle_count()).map(move |i| {
            [
                self.vertices[0].clone(),
                self.vertices[i + 1].clone(),
                self.vertices[i + 2].clone(),
            ]
        })
    }
}

fn push_bounded<V>(out: &mut Vec<V>, v: V, overflowed: &mut bool) {
    if out.len() < MAX_POLYGON_VERTICES {
        out.push(v);
    } else {
        *overflowed = true;
    }
}
