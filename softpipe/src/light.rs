use crate::color;
use crate::math_prelude::*;
use crate::shading::ShadingModel;

/// Directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Direction the light travels in, world space.
    pub direction: Vec3,
    pub color: Vec3,
    pub ambient_strength: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, 0.0, 1.0),
            color: Vec3::ONE,
            ambient_strength: 0.1,
        }
    }
}

impl Light {
    pub fn new(direction: Vec3, color: Vec3, ambient_strength: f32) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            color,
            ambient_strength,
        }
    }

    /// The same light with its direction rotated into view space.
    pub fn to_view_space(&self, view: &Mat4) -> Self {
        Self {
            direction: view.transform_vector3(self.direction).normalize_or_zero(),
            ..*self
        }
    }
}

/// Surface parameters shared by every face drawn with it.
///
/// The scalar PBR parameters are used when the mesh has no map for them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub shading: ShadingModel,
    pub color: Vec4,
    pub shininess: f32,
    pub specular_strength: f32,
    pub metallic: f32,
    pub roughness: f32,
    pub glossiness: f32,
    pub specular_color: Vec3,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shading: ShadingModel::BlinnPhong,
            color: color::WHITE,
            shininess: 32.0,
            specular_strength: 0.5,
            metallic: 0.0,
            roughness: 0.5,
            glossiness: 0.5,
            specular_color: Vec3::splat(0.04),
        }
    }
}

impl Material {
    pub fn new(shading: ShadingModel, color: Vec4, shininess: f32, specular_strength: f32) -> Self {
        Self {
            shading,
            color,
            shininess,
            specular_strength,
            ..Default::default()
        }
    }

    pub fn unlit(color: Vec4) -> Self {
        Self {
            shading: ShadingModel::Unlit,
            color,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math;

    #[test]
    fn view_space_light_follows_the_camera() {
        // camera turned to look down +x: a light travelling along +x now
        // travels along +z in view space
        let view = math::look_at(Vec3::ZERO, Vec3::X, Vec3::Y);
        let light = Light::new(Vec3::X, Vec3::ONE, 0.2).to_view_space(&view);
        assert!(light.direction.abs_diff_eq(Vec3::Z, 1e-6));
        assert_eq!(light.ambient_strength, 0.2);
    }

    #[test]
    fn new_light_normalizes_direction() {
        let light = Light::new(Vec3::new(0.0, -3.0, 4.0), Vec3::ONE, 0.0);
        assert!((light.direction.length() - 1.0).abs() < 1e-6);
    }
}
