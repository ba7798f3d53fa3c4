//! Linear RGBA colors and conversion to packed `0xAARRGGBB` pixels.
//!
//! Colors travel through the pipeline as `Vec4` (r, g, b, a) in `[0, 1]` and
//! are only packed when written to a render target.

use crate::math_prelude::*;

pub const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
pub const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

/// Clamps every channel to `[0, 1]` and packs as `0xAARRGGBB`.
pub fn pack(color: Vec4) -> u32 {
    let channel = |c: f32| (c.max(0.0).min(1.0) * 255.0).round() as u32;
    (channel(color.w) << 24) | (channel(color.x) << 16) | (channel(color.y) << 8) | channel(color.z)
}

pub fn unpack(packed: u32) -> Vec4 {
    let channel = |shift: u32| ((packed >> shift) & 0xFF) as f32 / 255.0;
    Vec4::new(channel(16), channel(8), channel(0), channel(24))
}

/// Clamps the color channels to `[0, 1]`.
pub fn saturate(color: Vec4) -> Vec4 {
    color.max(Vec4::ZERO).min(Vec4::ONE)
}

pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Vec4 {
    Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_layout_is_argb() {
        assert_eq!(pack(Vec4::new(1.0, 0.0, 0.0, 1.0)), 0xFFFF0000);
        assert_eq!(pack(Vec4::new(0.0, 1.0, 0.0, 1.0)), 0xFF00FF00);
        assert_eq!(pack(Vec4::new(0.0, 0.0, 1.0, 0.0)), 0x000000FF);
    }

    #[test]
    fn pack_clamps_out_of_range_channels() {
        assert_eq!(pack(Vec4::new(2.0, -1.0, 0.5, 7.0)), 0xFFFF0080);
    }

    #[test]
    fn unpack_restores_packed_channels() {
        let c = unpack(0x80FF4000);
        assert!(c.abs_diff_eq(Vec4::new(1.0, 64.0 / 255.0, 0.0, 128.0 / 255.0), 1e-6));
        assert_eq!(pack(c), 0x80FF4000);
    }
}
