use std::f32::consts::PI;

use super::normal_map::perturb_normal;
use super::{Fragment, SurfaceShader};
use crate::math;
use crate::math_prelude::*;

const EPS: f32 = f32::EPSILON;

/// Roughness is clamped to at least this so the distribution stays finite.
pub const MIN_ROUGHNESS: f32 = 0.045;

/// GGX normal distribution with `alpha = roughness^2`.
pub fn distribution_ggx(n_dot_h: f32, roughness: f32) -> f32 {
    let alpha = roughness * roughness;
    let alpha2 = alpha * alpha;
    let denom = n_dot_h * n_dot_h * (alpha2 - 1.0) + 1.0;
    alpha2 / (PI * denom * denom).max(EPS)
}

/// Schlick-GGX geometry term for one direction.
pub fn geometry_schlick_ggx(n_dot_x: f32, roughness: f32) -> f32 {
    let k = roughness * roughness / 2.0;
    n_dot_x / (n_dot_x * (1.0 - k) + k).max(EPS)
}

/// Smith shadowing-masking, the view and light geometry terms combined.
pub fn geometry_smith(n_dot_v: f32, n_dot_l: f32, roughness: f32) -> f32 {
    geometry_schlick_ggx(n_dot_v, roughness) * geometry_schlick_ggx(n_dot_l, roughness)
}

pub fn fresnel_schlick(cos_theta: f32, f0: Vec3) -> Vec3 {
    f0 + (Vec3::ONE - f0) * (1.0 - cos_theta).clamp(0.0, 1.0).powi(5)
}

/// Clamped cosines and surface parameters for [`cook_torrance`].
#[derive(Debug, Clone, Copy)]
pub struct BrdfInput {
    pub n_dot_l: f32,
    pub n_dot_v: f32,
    pub n_dot_h: f32,
    pub v_dot_h: f32,
    /// Reflectance at normal incidence.
    pub f0: Vec3,
    /// Color of the diffuse lobe before the Fresnel split.
    pub diffuse_color: Vec3,
    pub roughness: f32,
}

impl BrdfInput {
    /// Cosines from unit normal, view and to-light vectors.
    pub fn new(normal: Vec3, view: Vec3, to_light: Vec3) -> Self {
        let halfway = math::normalize_or_zero(view + to_light);
        Self {
            n_dot_l: normal.dot(to_light).max(0.0),
            n_dot_v: normal.dot(view).max(0.0),
            n_dot_h: normal.dot(halfway).max(0.0),
            v_dot_h: view.dot(halfway).max(0.0),
            f0: Vec3::splat(0.04),
            diffuse_color: Vec3::ZERO,
            roughness: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrdfTerms {
    pub diffuse: Vec3,
    pub specular: Vec3,
}

/// Cook-Torrance microfacet BRDF, split into its diffuse and specular lobes.
pub fn cook_torrance(input: &BrdfInput) -> BrdfTerms {
    let roughness = input.roughness.clamp(MIN_ROUGHNESS, 1.0);
    let d = distribution_ggx(input.n_dot_h, roughness);
    let g = geometry_smith(input.n_dot_v, input.n_dot_l, roughness);
    let f = fresnel_schlick(input.v_dot_h, input.f0);

    let specular = f * (d * g) / (4.0 * input.n_dot_l * input.n_dot_v).max(EPS);
    let diffuse = (Vec3::ONE - f) * input.diffuse_color;
    BrdfTerms { diffuse, specular }
}

/// Outgoing light for one fragment: both lobes scaled by `n_dot_l` and the
/// light color, plus ambient, then multiplied by the AO map when present.
fn radiance(fragment: &Fragment, input: &BrdfInput, albedo: Vec4) -> Vec4 {
    let terms = cook_torrance(input);
    let light = fragment.light;
    let direct = (terms.diffuse + terms.specular) * input.n_dot_l * light.color;
    let ambient = light.color * light.ambient_strength * albedo.xyz();
    let mut color = direct + ambient;
    if let Some(ao) = &fragment.maps.ambient_occlusion {
        color *= ao.sample(fragment.uv).x;
    }
    color.extend(albedo.w)
}

pub struct MetallicRoughness;

impl SurfaceShader for MetallicRoughness {
    fn shade(&self, fragment: &Fragment) -> Vec4 {
        let material = fragment.material;
        let albedo = fragment.albedo();
        let metallic = fragment
            .scalar(&fragment.maps.metallic, material.metallic)
            .clamp(0.0, 1.0);
        let roughness = fragment.scalar(&fragment.maps.roughness, material.roughness);

        let mut input = BrdfInput::new(
            perturb_normal(fragment),
            fragment.view_direction(),
            fragment.to_light(),
        );
        input.f0 = Vec3::splat(0.04).lerp(albedo.xyz(), metallic);
        input.diffuse_color = albedo.xyz() * (1.0 - metallic);
        input.roughness = roughness;
        radiance(fragment, &input, albedo)
    }
}

pub struct SpecularGlossiness;

impl SurfaceShader for SpecularGlossiness {
    fn shade(&self, fragment: &Fragment) -> Vec4 {
        let material = fragment.material;
        let albedo = fragment.albedo();
        let specular = match &fragment.maps.specular {
            Some(map) => map.sample(fragment.uv).xyz(),
            None => material.specular_color,
        };
        let glossiness = fragment.scalar(&fragment.maps.glossiness, material.glossiness);

        let mut input = BrdfInput::new(
            perturb_normal(fragment),
            fragment.view_direction(),
            fragment.to_light(),
        );
        input.f0 = specular;
        input.diffuse_color = albedo.xyz() * (Vec3::ONE - specular);
        input.roughness = 1.0 - glossiness.clamp(0.0, 1.0);
        radiance(fragment, &input, albedo)
    }
}
