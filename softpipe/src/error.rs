//! Error types for the rendering core.
//!
//! Errors only surface where data enters the core (mesh, texture and config
//! construction, parsing of mode names). Per-frame work never fails: problems
//! met while rendering are counted in [`crate::FrameStats`] instead.

use thiserror::Error;

/// Result type for fallible core operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid mesh: {0}")]
    Mesh(#[from] MeshError),

    #[error("invalid texture: {0}")]
    Texture(#[from] TextureError),

    #[error("invalid render config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("face {face} references vertex {index} but the mesh has {len} vertices")]
    VertexIndexOutOfRange { face: usize, index: usize, len: usize },

    #[error("face {face} references normal {index} but the mesh has {len} normals")]
    NormalIndexOutOfRange { face: usize, index: usize, len: usize },

    #[error("expected {expected} vertex colors, got {actual}")]
    ColorCountMismatch { expected: usize, actual: usize },

    #[error("mesh has no faces")]
    Empty,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextureError {
    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    ZeroSize { width: usize, height: usize },

    #[error("expected {expected} texels for the given dimensions, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("field of view must be in (0, pi) radians, got {0}")]
    InvalidFov(f32),

    #[error("clip range must satisfy 0 < znear < zfar, got znear={znear} zfar={zfar}")]
    InvalidClipRange { znear: f32, zfar: f32 },

    #[error("viewport must be non-empty, got {width}x{height}")]
    InvalidViewport { width: usize, height: usize },

    #[error("max_triangles must be at least 1")]
    ZeroTriangleBudget,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}
