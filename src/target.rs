//! Render targets: the color surface and the depth buffer.
//!
//! Both are plain owned buffers with width/height metadata. A [`Surface`]
//! and a [`ZBuffer`] of equal dimensions combine into a [`RenderTarget`],
//! which is what the rasterizer draws into. The dimension check happens
//! once at bind time so the per-pixel paths can assume matched buffers.

use crate::color::Color;
use crate::error::RasterError;

/// The color buffer the pipeline writes into. Pixel (0, 0) is top-left.
pub struct Surface {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Color::BLACK; (width * height) as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Write a pixel. Out-of-bounds coordinates are silently ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
        }
    }

    /// The color at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.pixels[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    /// The pixel buffer as ARGB8888 bytes, for handing to presentation
    /// code outside the pipeline.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: Color is repr(transparent) over u32; the buffer is a
        // contiguous allocation of len * 4 bytes.
        unsafe {
            std::slice::from_raw_parts(self.pixels.as_ptr() as *const u8, self.pixels.len() * 4)
        }
    }
}

/// Per-pixel depth storage. Smaller values are nearer to the camera.
pub struct ZBuffer {
    depths: Vec<f32>,
    width: u32,
    height: u32,
}

impl ZBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![f32::INFINITY; (width * height) as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset every depth to the far value so any geometry passes the
    /// first test.
    pub fn clear(&mut self) {
        self.depths.fill(f32::INFINITY);
    }

    /// The depth at (x, y). Out-of-bounds reads return the far value.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> f32 {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.depths[(y as u32 * self.width + x as u32) as usize]
        } else {
            f32::INFINITY
        }
    }

    /// Write the depth at (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: f32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.depths[(y as u32 * self.width + x as u32) as usize] = z;
        }
    }
}

/// A bound (surface, depth buffer) pair of matching dimensions.
pub struct RenderTarget {
    pub(crate) surface: Surface,
    pub(crate) depth: ZBuffer,
}

impl RenderTarget {
    /// Combine a surface and a depth buffer, verifying their dimensions
    /// agree.
    pub fn new(surface: Surface, depth: ZBuffer) -> Result<Self, RasterError> {
        if surface.width != depth.width || surface.height != depth.height {
            return Err(RasterError::DimensionMismatch {
                surface_width: surface.width,
                surface_height: surface.height,
                depth_width: depth.width,
                depth_height: depth.height,
            });
        }
        Ok(Self { surface, depth })
    }

    pub fn width(&self) -> u32 {
        self.surface.width
    }

    pub fn height(&self) -> u32 {
        self.surface.height
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn depth(&self) -> &ZBuffer {
        &self.depth
    }

    pub fn depth_mut(&mut self) -> &mut ZBuffer {
        &mut self.depth
    }

    /// Split back into the surface and depth buffer.
    pub fn into_parts(self) -> (Surface, ZBuffer) {
        (self.surface, self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_dimensions_rejected() {
        let result = RenderTarget::new(Surface::new(4, 4), ZBuffer::new(4, 3));
        assert!(matches!(
            result,
            Err(RasterError::DimensionMismatch {
                depth_height: 3,
                ..
            })
        ));
    }

    #[test]
    fn out_of_bounds_writes_ignored() {
        let mut surface = Surface::new(2, 2);
        surface.set_pixel(-1, 0, Color::WHITE);
        surface.set_pixel(2, 2, Color::WHITE);
        assert!(surface.pixel(-1, 0).is_none());
        assert_eq!(surface.pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn zbuffer_clears_to_far() {
        let mut z = ZBuffer::new(2, 2);
        z.set(1, 1, 0.25);
        assert_eq!(z.get(1, 1), 0.25);
        z.clear();
        assert_eq!(z.get(1, 1), f32::INFINITY);
    }

    #[test]
    fn surface_bytes_are_argb8888() {
        let mut surface = Surface::new(1, 1);
        surface.set_pixel(0, 0, Color::from_argb(0xAABBCCDD));
        assert_eq!(surface.as_bytes(), 0xAABBCCDDu32.to_ne_bytes().as_slice());
    }
}
