//! Fragment stage: projected triangles in, depth tested pixels out.

mod bounding_box;
pub mod edge;
pub mod scanline;
pub mod wire;

pub use bounding_box::BoundingBox;

use crate::color;
use crate::config::{RenderConfig, RenderMode};
use crate::framebuffer::RenderTarget;
use crate::interpolate::{self, Interpolate};
use crate::light::{Light, Material};
use crate::math;
use crate::math_prelude::*;
use crate::pipeline::{RenderTriangle, Vertex};
use crate::scene::SceneContext;
use crate::shading::Fragment;
use crate::stats::FrameStats;
use crate::texture::TextureMaps;

pub struct Rasterizer {
    mode: RenderMode,
    wire_color: u32,
    vertex_color: u32,
}

impl Rasterizer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            mode: config.render_mode,
            wire_color: config.wire_color,
            vertex_color: config.vertex_color,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    /// Draws `triangles` into `target` according to the render mode.
    ///
    /// `light` must already be in view space. Fills are depth tested against
    /// the target's depth buffer; edges and vertex markers are drawn on top
    /// without a depth test.
    pub fn draw<T: RenderTarget + ?Sized>(
        &self,
        triangles: &[RenderTriangle],
        scene: &SceneContext,
        light: &Light,
        target: &mut T,
        stats: &mut FrameStats,
    ) {
        let clip = BoundingBox::viewport(target.width(), target.height());
        let no_maps = TextureMaps::default();

        for triangle in triangles {
            if self.mode.fills() {
                let (maps, material) = match scene.meshes.get(triangle.mesh) {
                    Some(mesh) => (&mesh.maps, scene.material_for(mesh)),
                    None => (&no_maps, &scene.material),
                };
                let surface = Surface { maps, material, light };
                if !self.fill(triangle, &surface, &clip, target, stats) {
                    stats.triangles_degenerate += 1;
                }
            }

            if self.mode.draws_edges() {
                let [a, b, c] = triangle.vertices.map(|v| v.xy());
                wire::draw_line(target, a, b, self.wire_color);
                wire::draw_line(target, b, c, self.wire_color);
                wire::draw_line(target, c, a, self.wire_color);
            }

            if self.mode.draws_vertices() {
                for vertex in &triangle.vertices {
                    wire::draw_marker(target, vertex.xy(), self.vertex_color);
                }
            }
        }
    }

    fn fill<T: RenderTarget + ?Sized>(
        &self,
        triangle: &RenderTriangle,
        surface: &Surface,
        clip: &BoundingBox,
        target: &mut T,
        stats: &mut FrameStats,
    ) -> bool {
        let points = triangle.vertices.map(|v| v.xy());
        let inv_w = triangle.vertices.map(|v| 1.0 / v.position.w);
        let attributes = triangle.vertices.map(|v| v.vertex);
        let textured = self.mode.textured();
        let flat_color = color::pack(triangle.flat_color);

        let plot = |x: i32, y: i32, lambda: [f32; 3]| {
            let Some((weights, one_over_w)) = interpolate::perspective_weights(lambda, inv_w) else {
                return;
            };
            if !target.depth_test(x, y, 1.0 - one_over_w) {
                stats.fragments_occluded += 1;
                return;
            }

            let pixel = if textured {
                let [r0, r1, r2] = weights;
                let vertex =
                    Vertex::interpolate(&attributes[0], &attributes[1], &attributes[2], r0, r1, r2);
                color::pack(surface.shade(&vertex))
            } else {
                flat_color
            };
            target.set_pixel(x, y, pixel);
            stats.fragments_written += 1;
        };

        if self.mode.uses_bounding_box() {
            edge::fill_triangle(points, clip, plot)
        } else {
            scanline::fill_triangle(points, clip, plot)
        }
    }
}

/// What a textured fill shades with besides the interpolated vertex.
struct Surface<'a> {
    maps: &'a TextureMaps,
    material: &'a Material,
    light: &'a Light,
}

impl Surface<'_> {
    fn shade(&self, vertex: &Vertex) -> Vec4 {
        let fragment = Fragment {
            position: vertex.position,
            normal: math::normalize_or_zero(vertex.normal),
            tangent: math::normalize_or_zero(vertex.tangent),
            bitangent: math::normalize_or_zero(vertex.bitangent),
            uv: vertex.uv,
            color: vertex.color,
            maps: self.maps,
            material: self.material,
            light: self.light,
        };
        color::saturate(self.material.shading.shader().shade(&fragment))
    }
}
