use crate::math_prelude::*;

/// Attributes that can be blended across a triangle.
///
/// `r0`, `r1` and `r2` are the weights of `v0`, `v1` and `v2`; they sum to 1.
/// Structs of interpolatable fields get an implementation through
/// `#[derive(Interpolate)]`.
pub trait Interpolate {
    fn interpolate(v0: &Self, v1: &Self, v2: &Self, r0: f32, r1: f32, r2: f32) -> Self;

    /// Linear blend along an edge, `t = 0` gives `a`, `t = 1` gives `b`.
    fn lerp(a: &Self, b: &Self, t: f32) -> Self
    where
        Self: Sized,
    {
        Self::interpolate(a, b, b, 1.0 - t, t, 0.0)
    }
}

macro_rules! impl_interpolate {
    ($ty:ident) => {
        impl Interpolate for $ty {
            fn interpolate(v0: &Self, v1: &Self, v2: &Self, r0: f32, r1: f32, r2: f32) -> Self {
                *v0 * r0 + *v1 * r1 + *v2 * r2
            }
        }
    };
}

impl_interpolate!(f32);
impl_interpolate!(Vec2);
impl_interpolate!(Vec3);
impl_interpolate!(Vec4);

/// Turns screen space barycentric weights into perspective correct ones.
///
/// Attributes divided by `w` and `1/w` itself are linear in screen space, so
/// the true weight of vertex `i` is `l_i / w_i` renormalized by the
/// interpolated `1/w`. Returns the corrected weights and the interpolated
/// `1/w`, or `None` when the latter is not a positive finite number.
pub fn perspective_weights(lambda: [f32; 3], inv_w: [f32; 3]) -> Option<([f32; 3], f32)> {
    let a = lambda[0] * inv_w[0];
    let b = lambda[1] * inv_w[1];
    let c = lambda[2] * inv_w[2];
    let one_over_w = a + b + c;
    if !(one_over_w > 0.0) || !one_over_w.is_finite() {
        return None;
    }
    Some(([a / one_over_w, b / one_over_w, c / one_over_w], one_over_w))
}
