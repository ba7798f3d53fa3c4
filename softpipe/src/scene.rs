use crate::camera::Camera;
use crate::light::{Light, Material};
use crate::mesh::Mesh;

/// Everything drawn in a frame. The renderer only reads it, so it can be
/// mutated freely between frames.
#[derive(Debug, Clone, Default)]
pub struct SceneContext {
    pub camera: Camera,
    pub light: Light,
    /// Used by meshes without a material of their own.
    pub material: Material,
    pub meshes: Vec<Mesh>,
}

impl SceneContext {
    pub fn new(camera: Camera, light: Light, material: Material) -> Self {
        Self {
            camera,
            light,
            material,
            meshes: Vec::new(),
        }
    }

    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.meshes.push(mesh);
        self
    }

    pub fn material_for<'a>(&'a self, mesh: &'a Mesh) -> &'a Material {
        mesh.material.as_ref().unwrap_or(&self.material)
    }
}
