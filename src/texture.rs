//! Immutable 2D textures for sampling in pixel shaders.

use std::path::Path;

use crate::color::Color;

/// A row-major, immutable 2D array of colors.
///
/// Textures are bound to a rasterizer as a set; binding precomputes the
/// fixed-point addressing constants the sampler needs, so the texture
/// itself stores only its pixels and dimensions.
pub struct Texture {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Create a texture from a pixel buffer in row-major order.
    ///
    /// # Panics
    /// Panics if the buffer length does not match `width * height`, or if
    /// either dimension is zero.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Self {
        assert!(width > 0 && height > 0, "texture dimensions must be non-zero");
        assert_eq!(
            pixels.len(),
            (width * height) as usize,
            "pixel buffer size doesn't match dimensions"
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Load a texture from an image file (PNG, JPG, etc.), converting to
    /// the pipeline's ARGB layout.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        let pixels: Vec<Color> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                Color::new(a, r, g, b)
            })
            .collect();

        Ok(Self::from_pixels(width, height, pixels))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw pixel buffer in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// The texel at (x, y) without filtering or wrapping.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }
}
