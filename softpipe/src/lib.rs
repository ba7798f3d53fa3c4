// Lets `#[derive(Interpolate)]` refer to `::softpipe` from inside this crate too.
extern crate self as softpipe;

pub mod camera;
pub mod clipping;
pub mod color;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod interpolate;
pub mod light;
pub mod math;
pub mod mesh;
pub mod pipeline;
pub mod raster;
pub mod renderer;
pub mod scene;
pub mod shading;
pub mod stats;
pub mod texture;

pub use camera::Camera;
pub use clipping::{Frustum, Plane, Polygon};
pub use config::{CullMode, RenderConfig, RenderMode};
pub use error::{ConfigError, Error, MeshError, ParseError, Result, TextureError};
pub use framebuffer::{Framebuffer, RenderTarget};
pub use interpolate::Interpolate;
pub use light::{Light, Material};
pub use mesh::{Face, Mesh, Transform};
pub use pipeline::{Pipeline, RenderTriangle, ScreenVertex, Vertex};
pub use raster::Rasterizer;
pub use renderer::Renderer;
pub use scene::SceneContext;
pub use shading::{ShadingModel, SurfaceShader};
pub use softpipe_macros::Interpolate;
pub use stats::FrameStats;
pub use texture::{Texture, TextureMaps};

pub mod math_prelude {
    pub use glam::{Mat3, Mat4, Vec2, Vec3, Vec3Swizzles, Vec4, Vec4Swizzles};
}
