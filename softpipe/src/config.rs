use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, ParseError};

/// How triangles are turned into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderMode {
    Wireframe,
    WireframeVertices,
    #[default]
    Filled,
    FilledWireframe,
    Textured,
    TexturedWireframe,
    /// Filled with the bounding box rasterizer.
    AabbFilled,
    /// Textured with the bounding box rasterizer.
    AabbTextured,
}

impl RenderMode {
    pub const ALL: [RenderMode; 8] = [
        RenderMode::Wireframe,
        RenderMode::WireframeVertices,
        RenderMode::Filled,
        RenderMode::FilledWireframe,
        RenderMode::Textured,
        RenderMode::TexturedWireframe,
        RenderMode::AabbFilled,
        RenderMode::AabbTextured,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RenderMode::Wireframe => "wireframe",
            RenderMode::WireframeVertices => "wireframe-vertices",
            RenderMode::Filled => "filled",
            RenderMode::FilledWireframe => "filled-wireframe",
            RenderMode::Textured => "textured",
            RenderMode::TexturedWireframe => "textured-wireframe",
            RenderMode::AabbFilled => "aabb-filled",
            RenderMode::AabbTextured => "aabb-textured",
        }
    }

    pub fn fills(self) -> bool {
        !matches!(self, RenderMode::Wireframe | RenderMode::WireframeVertices)
    }

    /// Whether fragments are shaded per pixel with the material model
    /// instead of once per face.
    pub fn textured(self) -> bool {
        matches!(
            self,
            RenderMode::Textured | RenderMode::TexturedWireframe | RenderMode::AabbTextured
        )
    }

    pub fn draws_edges(self) -> bool {
        matches!(
            self,
            RenderMode::Wireframe
                | RenderMode::WireframeVertices
                | RenderMode::FilledWireframe
                | RenderMode::TexturedWireframe
        )
    }

    pub fn draws_vertices(self) -> bool {
        self == RenderMode::WireframeVertices
    }

    /// Bounding box and edge functions instead of scanlines.
    pub fn uses_bounding_box(self) -> bool {
        matches!(self, RenderMode::AabbFilled | RenderMode::AabbTextured)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    None,
    #[default]
    Backface,
}

impl CullMode {
    pub fn name(self) -> &'static str {
        match self {
            CullMode::None => "none",
            CullMode::Backface => "backface",
        }
    }
}

macro_rules! impl_name_conversions {
    ($ty:ty, $kind:literal, $all:expr, $expected:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $all.iter()
                    .copied()
                    .find(|m| m.name().eq_ignore_ascii_case(s))
                    .ok_or_else(|| ParseError {
                        kind: $kind,
                        value: s.to_string(),
                        expected: $expected,
                    })
            }
        }
    };
}

impl_name_conversions!(
    RenderMode,
    "render mode",
    RenderMode::ALL,
    "wireframe, wireframe-vertices, filled, filled-wireframe, textured, textured-wireframe, aabb-filled, aabb-textured"
);
impl_name_conversions!(
    CullMode,
    "cull mode",
    [CullMode::None, CullMode::Backface],
    "none, backface"
);

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub znear: f32,
    pub zfar: f32,
    pub render_mode: RenderMode,
    pub cull_mode: CullMode,
    /// Most triangles kept per frame, the rest is dropped and counted.
    pub max_triangles: usize,
    pub clear_color: u32,
    pub wire_color: u32,
    pub vertex_color: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_y: PI / 3.0,
            znear: 1.0,
            zfar: 100.0,
            render_mode: RenderMode::default(),
            cull_mode: CullMode::default(),
            max_triangles: 10_000,
            clear_color: 0xFF000000,
            wire_color: 0xFFFFFFFF,
            vertex_color: 0xFFFF0000,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_fov(self.fov_y)?;
        if !(self.znear > 0.0 && self.zfar > self.znear && self.zfar.is_finite()) {
            return Err(ConfigError::InvalidClipRange {
                znear: self.znear,
                zfar: self.zfar,
            });
        }
        if self.max_triangles == 0 {
            return Err(ConfigError::ZeroTriangleBudget);
        }
        Ok(())
    }
}

pub(crate) fn validate_fov(fov: f32) -> Result<(), ConfigError> {
    if fov > 0.0 && fov < PI {
        Ok(())
    } else {
        Err(ConfigError::InvalidFov(fov))
    }
}

pub(crate) fn validate_viewport(width: usize, height: usize) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        Err(ConfigError::InvalidViewport { width, height })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(RenderConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_fov() {
        for fov in [0.0, -1.0, PI, 4.0, f32::NAN] {
            let config = RenderConfig {
                fov_y: fov,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::InvalidFov(_))));
        }
    }

    #[test]
    fn rejects_bad_clip_range() {
        for (znear, zfar) in [(0.0, 10.0), (-1.0, 10.0), (5.0, 5.0), (5.0, 1.0), (1.0, f32::INFINITY)] {
            let config = RenderConfig {
                znear,
                zfar,
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::InvalidClipRange { znear, zfar })
            );
        }
    }

    #[test]
    fn rejects_zero_triangle_budget() {
        let config = RenderConfig {
            max_triangles: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTriangleBudget));
    }

    #[test]
    fn render_mode_names_round_trip() {
        for mode in RenderMode::ALL {
            assert_eq!(mode.to_string().parse::<RenderMode>().unwrap(), mode);
        }
        assert_eq!("BACKFACE".parse::<CullMode>().unwrap(), CullMode::Backface);
        let err = "points".parse::<RenderMode>().unwrap_err();
        assert_eq!(err.kind, "render mode");
        assert_eq!(err.value, "points");
    }

    #[test]
    fn render_mode_capabilities() {
        assert!(!RenderMode::Wireframe.fills());
        assert!(RenderMode::WireframeVertices.draws_vertices());
        assert!(RenderMode::TexturedWireframe.textured());
        assert!(RenderMode::TexturedWireframe.draws_edges());
        assert!(RenderMode::AabbTextured.uses_bounding_box());
        assert!(!RenderMode::Textured.uses_bounding_box());
        assert!(!RenderMode::AabbFilled.textured());
    }
}
