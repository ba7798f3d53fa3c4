//! Surface shading.
//!
//! Every lighting model implements [`SurfaceShader`]; a [`ShadingModel`]
//! names one and hands out its shader. All vectors a shader sees are in view
//! space, where the camera sits at the origin.

mod normal_map;
mod pbr;
mod phong;

use std::fmt;
use std::str::FromStr;

use crate::color;
use crate::error::ParseError;
use crate::light::{Light, Material};
use crate::math;
use crate::math_prelude::*;
use crate::texture::{Texture, TextureMaps};

pub use normal_map::{perturb_normal, NormalMapped};
pub use pbr::{
    cook_torrance, distribution_ggx, fresnel_schlick, geometry_schlick_ggx, geometry_smith,
    BrdfInput, BrdfTerms, MetallicRoughness, SpecularGlossiness, MIN_ROUGHNESS,
};
pub use phong::{blinn_phong, scale_intensity, BlinnPhong, Flat, Unlit};

/// Everything a shader may look at for one sample point.
#[derive(Debug, Clone, Copy)]
pub struct Fragment<'a> {
    pub position: Vec3,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub uv: Vec2,
    /// Interpolated vertex or face color.
    pub color: Vec4,
    pub maps: &'a TextureMaps,
    pub material: &'a Material,
    /// The light with its direction already in view space.
    pub light: &'a Light,
}

impl<'a> Fragment<'a> {
    /// Unit vector from the surface towards the camera.
    pub fn view_direction(&self) -> Vec3 {
        math::normalize_or_zero(-self.position)
    }

    /// Unit vector from the surface towards the light.
    pub fn to_light(&self) -> Vec3 {
        math::normalize_or_zero(-self.light.direction)
    }

    /// Base color: vertex color times material color times the albedo map.
    pub fn albedo(&self) -> Vec4 {
        let base = self.color * self.material.color;
        match &self.maps.albedo {
            Some(albedo) => base * albedo.sample(self.uv),
            None => base,
        }
    }

    /// First channel of `map` at this fragment, or `fallback` without a map.
    pub fn scalar(&self, map: &Option<Texture>, fallback: f32) -> f32 {
        map.as_ref().map_or(fallback, |m| m.sample(self.uv).x)
    }
}

pub trait SurfaceShader: Sync {
    /// Linear RGBA, not yet clamped.
    fn shade(&self, fragment: &Fragment) -> Vec4;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShadingModel {
    /// Color as is, no lighting.
    Unlit,
    /// Color scaled by the diffuse intensity.
    Flat,
    #[default]
    BlinnPhong,
    /// Blinn-Phong over a tangent space normal map, plus the glow map.
    NormalMapped,
    MetallicRoughness,
    SpecularGlossiness,
}

impl ShadingModel {
    pub const ALL: [ShadingModel; 6] = [
        ShadingModel::Unlit,
        ShadingModel::Flat,
        ShadingModel::BlinnPhong,
        ShadingModel::NormalMapped,
        ShadingModel::MetallicRoughness,
        ShadingModel::SpecularGlossiness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShadingModel::Unlit => "unlit",
            ShadingModel::Flat => "flat",
            ShadingModel::BlinnPhong => "blinn-phong",
            ShadingModel::NormalMapped => "normal-mapped",
            ShadingModel::MetallicRoughness => "metallic-roughness",
            ShadingModel::SpecularGlossiness => "specular-glossiness",
        }
    }

    pub fn shader(self) -> &'static dyn SurfaceShader {
        match self {
            ShadingModel::Unlit => &Unlit,
            ShadingModel::Flat => &Flat,
            ShadingModel::BlinnPhong => &BlinnPhong,
            ShadingModel::NormalMapped => &NormalMapped,
            ShadingModel::MetallicRoughness => &MetallicRoughness,
            ShadingModel::SpecularGlossiness => &SpecularGlossiness,
        }
    }

    /// The model used when a whole face gets one color: anything beyond
    /// plain lighting needs per pixel texture lookups and falls back to
    /// Blinn-Phong.
    pub fn per_face(self) -> ShadingModel {
        match self {
            ShadingModel::Unlit | ShadingModel::Flat => self,
            _ => ShadingModel::BlinnPhong,
        }
    }
}

impl fmt::Display for ShadingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShadingModel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShadingModel::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError {
                kind: "shading model",
                value: s.to_string(),
                expected: "unlit, flat, blinn-phong, normal-mapped, metallic-roughness, specular-glossiness",
            })
    }
}

/// Shades one face with its view space face normal, evaluated at the face
/// centroid. Used by the untextured fill modes.
pub fn shade_face(
    model: ShadingModel,
    centroid: Vec3,
    normal: Vec3,
    base: Vec4,
    material: &Material,
    light: &Light,
    maps: &TextureMaps,
) -> Vec4 {
    let fragment = Fragment {
        position: centroid,
        normal,
        tangent: Vec3::ZERO,
        bitangent: Vec3::ZERO,
        uv: Vec2::ZERO,
        color: base,
        maps,
        material,
        light,
    };
    color::saturate(model.per_face().shader().shade(&fragment))
}
