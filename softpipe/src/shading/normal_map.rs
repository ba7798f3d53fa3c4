use super::phong::lit_albedo;
use super::{Fragment, SurfaceShader};
use crate::math;
use crate::math_prelude::*;

/// Surface normal at `fragment`, bent by the normal map if the mesh has one.
///
/// The map stores tangent space normals in `[0, 1]`; they are brought back
/// to `[-1, 1]` and expressed in the interpolated tangent, bitangent and
/// normal basis.
pub fn perturb_normal(fragment: &Fragment) -> Vec3 {
    let normal = math::normalize_or_zero(fragment.normal);
    let map = match &fragment.maps.normal {
        Some(map) => map,
        None => return normal,
    };

    let sample = math::normalize_or_zero(map.sample(fragment.uv).xyz() * 2.0 - Vec3::ONE);
    let tbn = Mat3::from_cols(
        math::normalize_or_zero(fragment.tangent),
        math::normalize_or_zero(fragment.bitangent),
        normal,
    );
    let bent = math::normalize_or_zero(tbn * sample);
    if bent == Vec3::ZERO {
        normal
    } else {
        bent
    }
}

pub struct NormalMapped;

impl SurfaceShader for NormalMapped {
    fn shade(&self, fragment: &Fragment) -> Vec4 {
        let normal = perturb_normal(fragment);
        let lit = lit_albedo(fragment, normal, fragment.material);
        match &fragment.maps.glow {
            Some(glow) => lit + glow.sample(fragment.uv).xyz().extend(0.0),
            None => lit,
        }
    }
}
