//! Fixed-point texture sampling.
//!
//! UV coordinates are converted to 24.8 fixed point once per sample; all
//! addressing after that is integer arithmetic. Binding a texture
//! precomputes its dimensions shifted into fixed point, so the per-pixel
//! path does no per-texture multiplies beyond the UV scale.
//!
//! Tiling wraps with a non-negative modulus over the shifted *dimension*;
//! clamping pins to the shifted *limit* `(size - 1) << S`. The split
//! matters: scaling by the full dimension makes `u + 1` land exactly one
//! period away (so tiled sampling is periodic in UV), while scaling by the
//! limit maps `u = 1.0` exactly onto the last texel for clamped reads.

use std::sync::Arc;

use crate::color::Color;
use crate::texture::Texture;

/// Fixed-point fraction bits used for texture addressing.
pub const FIXED_SHIFT: i32 = 8;

const FIXED_ONE: i32 = 1 << FIXED_SHIFT;
const FIXED_MASK: i32 = FIXED_ONE - 1;

/// A texture plus its precomputed fixed-point addressing constants.
struct BoundTexture {
    texture: Arc<Texture>,
    shifted_width: i32,
    shifted_height: i32,
    shifted_x_limit: i32,
    shifted_y_limit: i32,
}

impl BoundTexture {
    fn new(texture: Arc<Texture>) -> Self {
        let width = texture.width() as i32;
        let height = texture.height() as i32;
        Self {
            texture,
            shifted_width: width << FIXED_SHIFT,
            shifted_height: height << FIXED_SHIFT,
            shifted_x_limit: (width - 1) << FIXED_SHIFT,
            shifted_y_limit: (height - 1) << FIXED_SHIFT,
        }
    }
}

/// The set of textures currently readable from shaders.
#[derive(Default)]
pub struct TextureSampler {
    bound: Vec<BoundTexture>,
}

impl TextureSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the bound texture set, recomputing the per-texture shifted
    /// dimensions.
    pub fn bind(&mut self, textures: Vec<Arc<Texture>>) {
        self.bound = textures.into_iter().map(BoundTexture::new).collect();
    }

    pub fn texture_count(&self) -> usize {
        self.bound.len()
    }

    /// Sample texture `index` at `(u, v)` in [0, 1].
    ///
    /// `BILINEAR` selects 2x2 filtering over nearest; `TILE` selects
    /// wrapping over clamping. Both are resolved at compile time so the
    /// inner loop carries no mode branches.
    ///
    /// # Panics
    /// Panics if `index` is out of range for the bound texture set.
    #[inline]
    pub fn read<const BILINEAR: bool, const TILE: bool>(
        &self,
        index: usize,
        u: f32,
        v: f32,
    ) -> Color {
        let bound = &self.bound[index];

        let (u_fx, v_fx) = if TILE {
            let u_fx = (u * bound.shifted_width as f32).round() as i32;
            let v_fx = (v * bound.shifted_height as f32).round() as i32;
            (
                u_fx.rem_euclid(bound.shifted_width),
                v_fx.rem_euclid(bound.shifted_height),
            )
        } else {
            let u_fx = (u * bound.shifted_x_limit as f32).round() as i32;
            let v_fx = (v * bound.shifted_y_limit as f32).round() as i32;
            (
                u_fx.clamp(0, bound.shifted_x_limit),
                v_fx.clamp(0, bound.shifted_y_limit),
            )
        };

        let u0 = (u_fx >> FIXED_SHIFT) as u32;
        let v0 = (v_fx >> FIXED_SHIFT) as u32;

        if !BILINEAR {
            return bound.texture.texel(u0, v0);
        }

        let width = bound.texture.width();
        let height = bound.texture.height();

        let lu = u_fx & FIXED_MASK;
        let lv = v_fx & FIXED_MASK;
        let ilu = FIXED_ONE - lu;
        let ilv = FIXED_ONE - lv;

        // Neighbors wrap so filtering is seamless across the tile border.
        let u1 = (u0 + 1) % width;
        let v1 = (v0 + 1) % height;

        let c00 = bound.texture.texel(u0, v0);
        let c10 = bound.texture.texel(u1, v0);
        let c01 = bound.texture.texel(u0, v1);
        let c11 = bound.texture.texel(u1, v1);

        #[inline]
        fn blend(c00: u8, c10: u8, c01: u8, c11: u8, lu: i32, ilu: i32, lv: i32, ilv: i32) -> u8 {
            let top = c00 as i32 * ilu + c10 as i32 * lu;
            let bottom = c01 as i32 * ilu + c11 as i32 * lu;
            ((top * ilv + bottom * lv) >> (2 * FIXED_SHIFT)) as u8
        }

        // Alpha is carried from the base texel, not filtered.
        Color::new(
            c00.a(),
            blend(c00.r(), c10.r(), c01.r(), c11.r(), lu, ilu, lv, ilv),
            blend(c00.g(), c10.g(), c01.g(), c11.g(), lu, ilu, lv, ilv),
            blend(c00.b(), c10.b(), c01.b(), c11.b(), lu, ilu, lv, ilv),
        )
    }
}
