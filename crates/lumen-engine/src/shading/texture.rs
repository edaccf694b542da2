use std::path::Path;

use anyhow::{Context, Result};

use crate::coords::{ColorRgba, Vec2};

/// Read-only 2D image sampled by texture coordinate.
///
/// Texture contents are owned by whoever created them; programs only read.
pub trait Texture {
    fn sample(&self, uv: Vec2) -> ColorRgba;
}

impl<T: Texture + ?Sized> Texture for &T {
    #[inline]
    fn sample(&self, uv: Vec2) -> ColorRgba {
        (**self).sample(uv)
    }
}

/// Stand-in for a missing texture binding.
///
/// Reads opaque black everywhere, like an unbound GL sampler.
#[derive(Debug, Copy, Clone, Default)]
pub struct Unbound;

impl Texture for Unbound {
    #[inline]
    fn sample(&self, _uv: Vec2) -> ColorRgba {
        ColorRgba::black()
    }
}

/// Texture returning the same color for every coordinate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolidTexture(pub ColorRgba);

impl Texture for SolidTexture {
    #[inline]
    fn sample(&self, _uv: Vec2) -> ColorRgba {
        self.0
    }
}

/// Adapts a closure into a [`Texture`]. Handy for procedural test images.
#[derive(Debug, Copy, Clone)]
pub struct FnTexture<F>(pub F);

impl<F> Texture for FnTexture<F>
where
    F: Fn(Vec2) -> ColorRgba,
{
    #[inline]
    fn sample(&self, uv: Vec2) -> ColorRgba {
        (self.0)(uv)
    }
}

/// CPU-side RGBA8 image.
///
/// Sampling uses nearest filtering with clamp-to-edge addressing; texel bytes are
/// mapped to `[0, 1]` without any color-space conversion. The same bytes are what
/// the GPU path uploads.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTexture {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl ImageTexture {
    /// Wraps tightly packed RGBA8 rows.
    pub fn from_rgba8(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        anyhow::ensure!(width > 0 && height > 0, "texture has zero size ({width}x{height})");
        let expected = width as usize * height as usize * 4;
        anyhow::ensure!(
            rgba.len() == expected,
            "texture data is {} bytes, expected {expected} for {width}x{height} RGBA8",
            rgba.len()
        );
        Ok(Self { width, height, rgba })
    }

    /// A single texel.
    pub fn pixel(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }

    pub fn from_image(image: image::RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::from_rgba8(width, height, image.into_raw())
    }

    /// Decodes an image file (PNG, JPEG, BMP) into RGBA8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .with_context(|| format!("failed to decode texture {}", path.display()))?;
        log::debug!(
            "loaded texture {} ({}x{})",
            path.display(),
            decoded.width(),
            decoded.height()
        );
        Self::from_image(decoded.into_rgba8())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major, no padding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba
    }

    fn texel(&self, x: u32, y: u32) -> ColorRgba {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba[i..i + 4];
        ColorRgba::new(
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
            px[3] as f32 / 255.0,
        )
    }
}

impl Texture for ImageTexture {
    fn sample(&self, uv: Vec2) -> ColorRgba {
        // `as` saturates and maps NaN to 0, so non-finite uvs land on an edge texel.
        let x = ((uv.x * self.width as f32).floor() as i64).clamp(0, self.width as i64 - 1);
        let y = ((uv.y * self.height as f32).floor() as i64).clamp(0, self.height as i64 - 1);
        self.texel(x as u32, y as u32)
    }
}
