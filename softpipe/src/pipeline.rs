//! Geometry stage: model space faces in, screen space triangles out.
//!
//! Per mesh the world, view and normal matrices are built once; per face the
//! corners are moved to view space, culled, clipped against the frustum,
//! projected and, for untextured fills, shaded once.

use crate::clipping::{ClipVertex, Frustum, Polygon};
use crate::config::{self, CullMode, RenderConfig, RenderMode};
use crate::error::ConfigError;
use crate::light::Light;
use crate::math;
use crate::math_prelude::*;
use crate::mesh::{Face, Mesh};
use crate::scene::SceneContext;
use crate::shading;
use crate::stats::FrameStats;
use crate::Interpolate;

/// View space vertex with everything the fragment stage interpolates.
#[derive(Interpolate, Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub uv: Vec2,
    pub color: Vec4,
}

impl ClipVertex for Vertex {
    fn position(&self) -> Vec3 {
        self.position
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    /// `x` and `y` in pixels with y growing down, `z` the normalized depth,
    /// `w` the view space depth.
    pub position: Vec4,
    pub vertex: Vertex,
}

impl ScreenVertex {
    pub fn xy(&self) -> Vec2 {
        self.position.xy()
    }
}

/// A projected triangle ready for the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTriangle {
    pub vertices: [ScreenVertex; 3],
    /// Face shading result used by the untextured fill modes.
    pub flat_color: Vec4,
    /// Index of the source mesh in the scene.
    pub mesh: usize,
}

pub struct Pipeline {
    projection: Mat4,
    frustum: Frustum,
    fov_y: f32,
    znear: f32,
    zfar: f32,
    width: usize,
    height: usize,
    max_triangles: usize,
    light: Light,
    polygon: Polygon<Vertex>,
    triangles: Vec<RenderTriangle>,
}

impl Pipeline {
    pub fn new(config: &RenderConfig, width: usize, height: usize) -> Result<Self, ConfigError> {
        config.validate()?;
        config::validate_viewport(width, height)?;

        let mut pipeline = Self {
            projection: Mat4::IDENTITY,
            frustum: Frustum::new(config.fov_y, config.fov_y, config.znear, config.zfar),
            fov_y: config.fov_y,
            znear: config.znear,
            zfar: config.zfar,
            width,
            height,
            max_triangles: config.max_triangles,
            light: Light::default(),
            polygon: Polygon::new(),
            triangles: Vec::with_capacity(config.max_triangles.min(1 << 16)),
        };
        pipeline.rebuild_projection();
        Ok(pipeline)
    }

    fn rebuild_projection(&mut self) {
        let aspect = self.width as f32 / self.height as f32;
        self.projection = math::perspective(self.fov_y, aspect, self.znear, self.zfar);
        self.frustum = Frustum::from_vertical_fov(self.fov_y, aspect, self.znear, self.zfar);
        log::debug!(
            "projection rebuilt: fov_y {:.3} rad, {}x{}, z [{}, {}]",
            self.fov_y,
            self.width,
            self.height,
            self.znear,
            self.zfar
        );
    }

    pub fn set_fov(&mut self, fov_y: f32) -> Result<(), ConfigError> {
        config::validate_fov(fov_y)?;
        self.fov_y = fov_y;
        self.rebuild_projection();
        Ok(())
    }

    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), ConfigError> {
        config::validate_viewport(width, height)?;
        self.width = width;
        self.height = height;
        self.rebuild_projection();
        Ok(())
    }

    pub fn fov(&self) -> f32 {
        self.fov_y
    }

    pub fn viewport(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// The scene light in view space, as of the last [`Pipeline::run`].
    pub fn light(&self) -> &Light {
        &self.light
    }

    /// Triangles produced by the last [`Pipeline::run`].
    pub fn triangles(&self) -> &[RenderTriangle] {
        &self.triangles
    }

    /// Runs the geometry stage for every mesh of `scene`.
    pub fn run(
        &mut self,
        scene: &SceneContext,
        mode: RenderMode,
        cull: CullMode,
        stats: &mut FrameStats,
    ) -> &[RenderTriangle] {
        self.triangles.clear();

        let view = scene.camera.view_matrix();
        let view_linear = Mat3::from_mat4(view);
        self.light = scene.light.to_view_space(&view);
        let shade_faces = mode.fills() && !mode.textured();

        for (index, mesh) in scene.meshes.iter().enumerate() {
            let world = mesh.transform.matrix();
            let normal_matrix = match math::normal_matrix(&world) {
                Some(m) => view_linear * m,
                None => {
                    log::warn!("skipping mesh {}: singular world matrix", index);
                    stats.meshes_skipped += 1;
                    continue;
                }
            };
            let model_view = view * world;
            log::trace!("mesh {}: {} faces", index, mesh.faces().len());

            for face in mesh.faces() {
                stats.faces += 1;
                let corners = view_space_corners(mesh, face, &model_view, &normal_matrix);
                let [a, b, c] = corners.map(|v| v.position);
                let face_normal =
                    math::normalize_or_zero(b - a).cross(math::normalize_or_zero(c - a));

                if cull == CullMode::Backface && face_normal.dot(-a) <= 0.0 {
                    stats.faces_culled += 1;
                    continue;
                }

                let flat_color = if shade_faces {
                    let base = (0..3).map(|i| mesh.corner_color(face, i)).sum::<Vec4>() / 3.0;
                    shading::shade_face(
                        scene.material_for(mesh).shading,
                        (a + b + c) / 3.0,
                        math::normalize_or_zero(face_normal),
                        base,
                        scene.material_for(mesh),
                        &self.light,
                        &mesh.maps,
                    )
                } else {
                    face.color
                };

                self.polygon.reset(corners);
                self.polygon.clip(&self.frustum);
                if self.polygon.overflowed() {
                    log::warn!("clip polygon of mesh {} exceeded its vertex capacity", index);
                    stats.clip_overflows += 1;
                }
                if self.polygon.is_empty() {
                    stats.faces_clipped += 1;
                    continue;
                }

                for triangle in self.polygon.triangles() {
                    let projected = [
                        to_screen(&self.projection, &triangle[0], self.width, self.height),
                        to_screen(&self.projection, &triangle[1], self.width, self.height),
                        to_screen(&self.projection, &triangle[2], self.width, self.height),
                    ];
                    let vertices = match projected {
                        [Some(v0), Some(v1), Some(v2)] => [v0, v1, v2],
                        _ => {
                            stats.triangles_degenerate += 1;
                            continue;
                        }
                    };
                    if self.triangles.len() >= self.max_triangles {
                        stats.triangles_dropped += 1;
                        continue;
                    }
                    self.triangles.push(RenderTriangle {
                        vertices,
                        flat_color,
                        mesh: index,
                    });
                    stats.triangles += 1;
                }
            }
        }

        if stats.triangles_dropped > 0 {
            log::warn!(
                "render list full: dropped {} triangles past the limit of {}",
                stats.triangles_dropped,
                self.max_triangles
            );
        }

        &self.triangles
    }
}

fn view_space_corners(mesh: &Mesh, face: &Face, model_view: &Mat4, normal_matrix: &Mat3) -> [Vertex; 3] {
    let direction = |v: Vec3| math::normalize_or_zero(*normal_matrix * v);
    [0, 1, 2].map(|i| {
        let vertex = face.vertices[i];
        Vertex {
            position: model_view.transform_point3(mesh.vertices()[vertex]),
            normal: direction(mesh.normals()[face.normals[i]]),
            tangent: direction(mesh.tangents()[vertex]),
            bitangent: direction(mesh.bitangents()[vertex]),
            uv: face.uvs[i],
            color: mesh.corner_color(face, i),
        }
    })
}

/// Projects a view space vertex and maps it to pixel coordinates.
fn to_screen(projection: &Mat4, vertex: &Vertex, width: usize, height: usize) -> Option<ScreenVertex> {
    let ndc = math::project(projection, vertex.position.extend(1.0))?;
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    Some(ScreenVertex {
        position: Vec4::new(ndc.x * half_w + half_w, -ndc.y * half_h + half_h, ndc.z, ndc.w),
        vertex: *vertex,
    })
}
