use super::{Fragment, SurfaceShader};
use crate::light::{Light, Material};
use crate::math;
use crate::math_prelude::*;

/// Scales the RGB channels of `color` by `factor`, alpha untouched.
pub fn scale_intensity(color: Vec4, factor: f32) -> Vec4 {
    (color.xyz() * factor).extend(color.w)
}

/// Ambient, diffuse and specular light reaching a surface, as an RGB factor
/// to multiply the albedo with.
///
/// `normal` and `view` must be unit vectors, `view` pointing from the
/// surface to the eye.
pub fn blinn_phong(
    normal: Vec3,
    view: Vec3,
    light: &Light,
    shininess: f32,
    specular_strength: f32,
) -> Vec3 {
    let to_light = -light.direction;
    let ambient = light.color * light.ambient_strength;
    let diffuse = light.color * normal.dot(to_light).max(0.0);

    let halfway = math::normalize_or_zero(view + to_light);
    let highlight = normal.dot(halfway).max(0.0).powf(shininess);
    let specular = light.color * highlight * specular_strength;

    ambient + diffuse + specular
}

/// Blinn-Phong lit albedo, with the specular strength scaled by the
/// specular map when there is one.
pub(super) fn lit_albedo(fragment: &Fragment, normal: Vec3, material: &Material) -> Vec4 {
    let albedo = fragment.albedo();
    let strength = fragment.scalar(&fragment.maps.specular, 1.0) * material.specular_strength;
    let light = blinn_phong(
        normal,
        fragment.view_direction(),
        fragment.light,
        material.shininess,
        strength,
    );
    (albedo.xyz() * light).extend(albedo.w)
}

pub struct Unlit;

impl SurfaceShader for Unlit {
    fn shade(&self, fragment: &Fragment) -> Vec4 {
        fragment.albedo()
    }
}

/// Albedo scaled by the diffuse intensity alone, no ambient or highlights.
pub struct Flat;

impl SurfaceShader for Flat {
    fn shade(&self, fragment: &Fragment) -> Vec4 {
        let normal = math::normalize_or_zero(fragment.normal);
        let factor = normal.dot(fragment.to_light()).max(0.0);
        scale_intensity(fragment.albedo(), factor)
    }
}

pub struct BlinnPhong;

impl SurfaceShader for BlinnPhong {
    fn shade(&self, fragment: &Fragment) -> Vec4 {
        let normal = math::normalize_or_zero(fragment.normal);
        lit_albedo(fragment, normal, fragment.material)
    }
}
