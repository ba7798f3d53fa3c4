use itertools::Itertools;

use crate::config;
use crate::error::ConfigError;

/// Depth of an empty pixel, the far end of the depth range.
pub const CLEAR_DEPTH: f32 = 1.0;

/// Color and depth storage the rasterizer draws into.
///
/// Colors are packed `0xAARRGGBB`; depth is `1 - 1/w`, smaller is nearer.
/// Coordinates outside the target are ignored by writes and give `None` on
/// reads, so callers never need to clip their own pixel loops.
pub trait RenderTarget {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn set_pixel(&mut self, x: i32, y: i32, color: u32);
    fn depth(&self, x: i32, y: i32) -> Option<f32>;
    fn set_depth(&mut self, x: i32, y: i32, depth: f32);

    fn clear_color(&mut self, color: u32);
    /// Resets every depth to [`CLEAR_DEPTH`].
    fn clear_depth(&mut self);

    /// Writes `depth` and returns true when it is nearer than what is
    /// stored. Out of bounds pixels always fail.
    fn depth_test(&mut self, x: i32, y: i32, depth: f32) -> bool {
        match self.depth(x, y) {
            Some(stored) if depth < stored => {
                self.set_depth(x, y, depth);
                true
            }
            _ => false,
        }
    }
}

pub struct Framebuffer {
    width: usize,
    height: usize,
    color: Vec<u32>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        config::validate_viewport(width, height)?;
        let size = width * height;
        Ok(Self {
            width,
            height,
            color: vec![0; size],
            depth: vec![CLEAR_DEPTH; size],
        })
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.color[i])
    }

    /// Row-major packed colors, top row first.
    pub fn color_buffer(&self) -> &[u32] {
        &self.color
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth
    }

    /// All pixel coordinates, row by row.
    pub fn coords(&self) -> impl Iterator<Item = (i32, i32)> {
        (0..self.height as i32).cartesian_product(0..self.width as i32).map(|(y, x)| (x, y))
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some(x as usize + y as usize * self.width)
        }
    }
}

impl RenderTarget for Framebuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.color[i] = color;
        }
    }

    fn depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    fn set_depth(&mut self, x: i32, y: i32, depth: f32) {
        if let Some(i) = self.index(x, y) {
            self.depth[i] = depth;
        }
    }

    fn clear_color(&mut self, color: u32) {
        self.color.iter_mut().for_each(|c| *c = color);
    }

    fn clear_depth(&mut self) {
        self.depth.iter_mut().for_each(|d| *d = CLEAR_DEPTH);
    }
}
