//! CPU color and depth targets.

use fxscope_core::{FxscopeError, Result};
use glam::Vec4;

/// A linear RGBA color target with a matching depth buffer.
///
/// Pixels are stored row by row from the top-left corner.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    color: Vec<Vec4>,
    depth: Vec<f32>,
}

impl Framebuffer {
    /// Creates a framebuffer cleared to transparent black and far depth.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FxscopeError::InvalidDimensions { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            color: vec![Vec4::ZERO; len],
            depth: vec![1.0; len],
        })
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns width / height.
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Fills the color target and resets depth to the far plane.
    pub fn clear(&mut self, color: Vec4) {
        self.color.fill(color);
        self.depth.fill(1.0);
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns the color at a pixel, or `None` outside the target.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec4> {
        (x < self.width && y < self.height).then(|| self.color[self.index(x, y)])
    }

    /// Returns the stored depth at a pixel, or `None` outside the target.
    pub fn depth(&self, x: u32, y: u32) -> Option<f32> {
        (x < self.width && y < self.height).then(|| self.depth[self.index(x, y)])
    }

    pub(crate) fn set_pixel(&mut self, x: u32, y: u32, color: Vec4) {
        let index = self.index(x, y);
        self.color[index] = color;
    }

    pub(crate) fn set_depth(&mut self, x: u32, y: u32, depth: f32) {
        let index = self.index(x, y);
        self.depth[index] = depth;
    }

    /// Converts the color target to RGBA8 (4 bytes per pixel).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.color
            .iter()
            .flat_map(|c| {
                let c = c.clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
                [
                    c.x.round() as u8,
                    c.y.round() as u8,
                    c.z.round() as u8,
                    c.w.round() as u8,
                ]
            })
            .collect()
    }
}
