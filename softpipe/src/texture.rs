use crate::color;
use crate::error::TextureError;
use crate::math_prelude::*;

/// A decoded texture map, linear RGBA texels in row-major order starting at
/// the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    texels: Vec<Vec4>,
    width: usize,
    height: usize,
}

impl Texture {
    pub fn new(width: usize, height: usize, texels: Vec<Vec4>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::ZeroSize { width, height });
        }
        let expected = width * height;
        if texels.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self {
            texels,
            width,
            height,
        })
    }

    /// From tightly packed 8 bit RGBA bytes.
    pub fn from_rgba8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, TextureError> {
        if bytes.len() != width * height * 4 {
            return Err(TextureError::SizeMismatch {
                expected: width * height * 4,
                actual: bytes.len(),
            });
        }
        let texels = bytes
            .chunks_exact(4)
            .map(|p| color::from_rgba8(p[0], p[1], p[2], p[3]))
            .collect();
        Self::new(width, height, texels)
    }

    /// From packed `0xAARRGGBB` pixels.
    pub fn from_argb(width: usize, height: usize, pixels: &[u32]) -> Result<Self, TextureError> {
        Self::new(width, height, pixels.iter().map(|p| color::unpack(*p)).collect())
    }

    /// A 1x1 texture of a single color.
    pub fn solid(color: Vec4) -> Self {
        Self {
            texels: vec![color],
            width: 1,
            height: 1,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Nearest texel with wrap-around addressing.
    pub fn sample(&self, uv: Vec2) -> Vec4 {
        let x = wrap(uv.x, self.width);
        let y = wrap(uv.y, self.height);
        self.texels[x + y * self.width]
    }

    /// The texel at `(x, y)`, `None` outside the texture.
    pub fn texel(&self, x: usize, y: usize) -> Option<Vec4> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.texels.get(x + y * self.width).copied()
    }
}

fn wrap(coord: f32, size: usize) -> usize {
    if !coord.is_finite() {
        return 0;
    }
    ((coord * size as f32).abs() as usize) % size
}

/// Optional texture maps of a mesh.
#[derive(Debug, Clone, Default)]
pub struct TextureMaps {
    pub albedo: Option<Texture>,
    pub normal: Option<Texture>,
    pub glow: Option<Texture>,
    pub specular: Option<Texture>,
    pub metallic: Option<Texture>,
    pub roughness: Option<Texture>,
    pub ambient_occlusion: Option<Texture>,
    pub glossiness: Option<Texture>,
}

impl TextureMaps {
    pub fn with_albedo(albedo: Texture) -> Self {
        Self {
            albedo: Some(albedo),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Texture {
        // 2x2: red green / blue white
        Texture::from_argb(2, 2, &[0xFFFF0000, 0xFF00FF00, 0xFF0000FF, 0xFFFFFFFF]).unwrap()
    }

    #[test]
    fn rejects_wrong_texel_count() {
        assert_eq!(
            Texture::new(2, 2, vec![Vec4::ONE; 3]),
            Err(TextureError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            Texture::new(0, 2, vec![]),
            Err(TextureError::ZeroSize {
                width: 0,
                height: 2
            })
        );
    }

    #[test]
    fn samples_nearest_texel() {
        let tex = checker();
        assert_eq!(color::pack(tex.sample(Vec2::new(0.1, 0.1))), 0xFFFF0000);
        assert_eq!(color::pack(tex.sample(Vec2::new(0.9, 0.1))), 0xFF00FF00);
        assert_eq!(color::pack(tex.sample(Vec2::new(0.1, 0.9))), 0xFF0000FF);
        assert_eq!(color::pack(tex.sample(Vec2::new(0.6, 0.6))), 0xFFFFFFFF);
    }

    #[test]
    fn sampling_wraps_around() {
        let tex = checker();
        assert_eq!(tex.sample(Vec2::new(1.1, 0.1)), tex.sample(Vec2::new(0.1, 0.1)));
        assert_eq!(tex.sample(Vec2::new(1.0, 1.0)), tex.sample(Vec2::new(0.0, 0.0)));
        assert_eq!(tex.sample(Vec2::new(-0.6, 0.1)), tex.sample(Vec2::new(0.6, 0.1)));
    }

    #[test]
    fn sampling_non_finite_uv_uses_first_texel() {
        let tex = checker();
        assert_eq!(tex.sample(Vec2::new(f32::NAN, f32::INFINITY)), tex.texel(0, 0).unwrap());
    }

    #[test]
    fn texel_outside_the_texture_is_none() {
        let tex = checker();
        assert_eq!(tex.texel(1, 1).map(color::pack), Some(0xFFFFFFFF));
        assert_eq!(tex.texel(2, 0), None);
        assert_eq!(tex.texel(0, 2), None);
    }

    #[test]
    fn rgba8_bytes_are_normalized() {
        let tex = Texture::from_rgba8(1, 1, &[255, 0, 51, 255]).unwrap();
        assert!(tex.texel(0, 0).unwrap().abs_diff_eq(Vec4::new(1.0, 0.0, 0.2, 1.0), 1e-6));
    }
}
