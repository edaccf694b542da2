use anyhow::{Context, Result};

use crate::coords::{ColorRgba, Viewport};

use super::blend::saturate;

/// CPU render target, one straight-alpha float color per pixel.
///
/// One pixel equals one logical pixel; pixel `(x, y)` is sampled at its
/// center `(x + 0.5, y + 0.5)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<ColorRgba>,
}

impl Framebuffer {
    /// Creates a transparent framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![ColorRgba::transparent(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }

    pub fn clear(&mut self, color: ColorRgba) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<ColorRgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Row-major pixels.
    #[inline]
    pub fn pixels(&self) -> &[ColorRgba] {
        &self.pixels
    }

    #[inline]
    pub(super) fn pixels_mut(&mut self) -> &mut [ColorRgba] {
        &mut self.pixels
    }

    /// Quantizes to RGBA8, clamping each channel to `[0, 1]`.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for c in &self.pixels {
            let c = saturate(*c);
            out.extend([c.r, c.g, c.b, c.a].map(|v| (v * 255.0).round() as u8));
        }
        out
    }

    pub fn to_image(&self) -> Result<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_rgba8())
            .context("framebuffer size does not match its pixel data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_is_bounds_checked() {
        let fb = Framebuffer::new(2, 3);
        assert_eq!(fb.get(1, 2), Some(ColorRgba::transparent()));
        assert_eq!(fb.get(2, 0), None);
        assert_eq!(fb.get(0, 3), None);
    }

    #[test]
    fn rgba8_clamps_out_of_range() {
        let mut fb = Framebuffer::new(1, 1);
        fb.clear(ColorRgba::new(-1.0, 0.5, 3.0, 1.0));
        assert_eq!(fb.to_rgba8(), vec![0, 128, 255, 255]);
    }
}
