//! The programmable shader contract.
//!
//! A shader bundles the per-vertex program, the per-pixel program, and the
//! types they exchange. The rasterizer is generic over the bundle, so both
//! programs are monomorphized into the pipeline; nothing in the inner loop
//! dispatches dynamically.
//!
//! Shaders are pure: they must not fail, and they read the pipeline
//! environment only through the [`ShaderContext`] handed to each
//! invocation.

use crate::color::Color;
use crate::math::mat4::Mat4;
use crate::math::vec4::Vec4;
use crate::sampler::TextureSampler;
use crate::varyings::Varyings;

/// The environment a shader invocation may read: the cached matrices, the
/// per-pipeline constants, and the bound textures.
pub struct ShaderContext<'a, C> {
    /// `(W^-1)^T`, for transforming normals into world space.
    pub world_normal_matrix: &'a Mat4,
    /// `P * V * W`, the full object-to-clip transform.
    pub world_view_proj_matrix: &'a Mat4,
    /// The pipeline's shader constants (light positions, tuning factors).
    pub constants: &'a C,
    pub(crate) sampler: &'a TextureSampler,
}

impl<C> ShaderContext<'_, C> {
    /// Sample bound texture `index` at `(u, v)` in [0, 1], OpenGL UV
    /// orientation. Filtering and addressing modes are compile-time
    /// choices.
    ///
    /// # Panics
    /// Panics if `index` is out of range for the bound texture set.
    #[inline]
    pub fn read_texture<const BILINEAR: bool, const TILE: bool>(
        &self,
        index: usize,
        u: f32,
        v: f32,
    ) -> Color {
        self.sampler.read::<BILINEAR, TILE>(index, u, v)
    }
}

/// A vertex/pixel program pair with its associated data layouts.
///
/// `Vertex` is an opaque caller-defined record; the vertex program is the
/// only pipeline stage that interprets it. `Varyings` is the interpolant
/// payload carried to the pixel program. `Constants` is mutable between
/// frames through the rasterizer and read-only during a draw call.
pub trait Shader {
    type Vertex;
    type Varyings: Varyings;
    type Constants: Default;

    /// Transform one input vertex, writing the clip-space position (not
    /// yet divided by w) and the interpolant payload.
    fn vertex(
        &self,
        ctx: &ShaderContext<'_, Self::Constants>,
        input: &Self::Vertex,
        pos: &mut Vec4,
        vars: &mut Self::Varyings,
    );

    /// Compute the color of one pixel from its interpolated payload.
    fn pixel(&self, ctx: &ShaderContext<'_, Self::Constants>, vars: &Self::Varyings) -> Color;
}
