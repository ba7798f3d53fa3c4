//! Matrix constructors and vector helpers used by the pipeline.
//!
//! Vectors and matrices are glam types. Matrices follow the usual
//! mathematical convention: `M * v` with the translation in the last column,
//! so a world matrix reads right to left in application order. The camera
//! space is left handed: +x right, +y up, +z into the screen.

use crate::math_prelude::*;

/// Builds a matrix from its rows.
pub fn from_rows(rows: [[f32; 4]; 4]) -> Mat4 {
    Mat4::from_cols_array_2d(&rows).transpose()
}

/// World matrix for a mesh instance: scale, then rotate about z, y and x,
/// then translate.
pub fn world_matrix(scale: Vec3, rotation: Vec3, translation: Vec3) -> Mat4 {
    Mat4::from_translation(translation)
        * Mat4::from_rotation_x(rotation.x)
        * Mat4::from_rotation_y(rotation.y)
        * Mat4::from_rotation_z(rotation.z)
        * Mat4::from_scale(scale)
}

/// Left handed perspective projection.
///
/// `aspect` is width / height. View space depth ends up in `w`, and after the
/// homogeneous divide `z` lies in `[0, 1]` between the near and far planes.
///
/// ```text
/// | f/aspect  0  0   0     |
/// | 0         f  0   0     |
/// | 0         0  q  -q*near|
/// | 0         0  1   0     |
/// ```
pub fn perspective(fov_y: f32, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let q = zfar / (zfar - znear);
    from_rows([
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, q, -q * znear],
        [0.0, 0.0, 1.0, 0.0],
    ])
}

/// Horizontal field of view matching `fov_y` on a viewport with the given
/// aspect ratio (width / height).
pub fn horizontal_fov(fov_y: f32, aspect: f32) -> f32 {
    2.0 * ((fov_y / 2.0).tan() * aspect).atan()
}

/// Left handed view matrix. Rows are the camera basis, the last column moves
/// the eye to the origin.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let z = normalize_or_zero(target - eye);
    let x = normalize_or_zero(up.cross(z));
    let y = z.cross(x);

    from_rows([
        [x.x, x.y, x.z, -x.dot(eye)],
        [y.x, y.y, y.z, -y.dot(eye)],
        [z.x, z.y, z.z, -z.dot(eye)],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Inverse transpose of the upper 3x3 of `world`, used for normals, tangents
/// and bitangents. `None` when the matrix is singular.
pub fn normal_matrix(world: &Mat4) -> Option<Mat3> {
    let linear = Mat3::from_mat4(*world);
    let det = linear.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    Some(linear.inverse().transpose())
}

/// Multiplies `v` by `m` and performs the perspective divide. The returned
/// vector keeps the clip space `w`. `None` when `w` is zero.
pub fn project(m: &Mat4, v: Vec4) -> Option<Vec4> {
    let clip = *m * v;
    if clip.w.abs() <= f32::EPSILON || !clip.w.is_finite() {
        return None;
    }
    Some(Vec4::new(
        clip.x / clip.w,
        clip.y / clip.w,
        clip.z / clip.w,
        clip.w,
    ))
}

/// Zero length vectors normalize to zero instead of NaN.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// Twice the signed area of the triangle `(a, b, p)`.
///
/// In screen space (y down) the value is positive when `p` lies on the inner
/// side of an edge of a triangle wound clockwise on screen, which is counter
/// clockwise in the usual y up orientation.
#[inline]
pub fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}
