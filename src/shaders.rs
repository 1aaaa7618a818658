//! Ready-made shader bundles for common materials.
//!
//! These cover the basic cases (vertex color, texturing, diffuse
//! lighting) and double as reference implementations of the [`Shader`]
//! contract. Applications with custom materials define their own bundles
//! the same way.

use crate::color::Color;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::shader::{Shader, ShaderContext};
use crate::varyings;

/// The vertex record the stock shaders consume. Custom shaders are free
/// to use any input type; the pipeline never looks inside it.
#[derive(Clone, Copy, Debug)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: Vec3,
    /// Object-space normal.
    pub normal: Vec3,
    /// Texture coordinates in [0, 1].
    pub uv: Vec2,
    pub color: Color,
}

varyings! {
    /// Interpolated vertex color.
    pub struct ColorVaryings[4] {
        color/set_color: color @ 0,
    }
}

/// Transforms positions by the full object-to-clip matrix and passes the
/// vertex color through for interpolation.
#[derive(Default)]
pub struct UnlitColorShader;

impl Shader for UnlitColorShader {
    type Vertex = MeshVertex;
    type Varyings = ColorVaryings;
    type Constants = ();

    fn vertex(
        &self,
        ctx: &ShaderContext<'_, ()>,
        input: &MeshVertex,
        pos: &mut Vec4,
        vars: &mut ColorVaryings,
    ) {
        *pos = *ctx.world_view_proj_matrix * Vec4::from_vec3(input.position, 1.0);
        vars.set_color(input.color);
    }

    fn pixel(&self, _ctx: &ShaderContext<'_, ()>, vars: &ColorVaryings) -> Color {
        vars.color()
    }
}

varyings! {
    /// Interpolated texture coordinates.
    pub struct UvVaryings[2] {
        uv/set_uv: vec2 @ 0,
    }
}

/// Samples the first bound texture at the interpolated UV. Filtering and
/// addressing are baked in through the const parameters, matching the
/// sampler's compile-time modes.
#[derive(Default)]
pub struct TextureShader<const BILINEAR: bool, const TILE: bool>;

impl<const BILINEAR: bool, const TILE: bool> Shader for TextureShader<BILINEAR, TILE> {
    type Vertex = MeshVertex;
    type Varyings = UvVaryings;
    type Constants = ();

    fn vertex(
        &self,
        ctx: &ShaderContext<'_, ()>,
        input: &MeshVertex,
        pos: &mut Vec4,
        vars: &mut UvVaryings,
    ) {
        *pos = *ctx.world_view_proj_matrix * Vec4::from_vec3(input.position, 1.0);
        vars.set_uv(input.uv);
    }

    fn pixel(&self, ctx: &ShaderContext<'_, ()>, vars: &UvVaryings) -> Color {
        let uv = vars.uv();
        ctx.read_texture::<BILINEAR, TILE>(0, uv.x, uv.y)
    }
}

/// Tunable state for [`DiffuseShader`], mutable between frames through
/// the rasterizer's constants handle.
pub struct DiffuseConstants {
    /// Direction the light travels, in world space. Normalized by the
    /// shader per pixel.
    pub light_direction: Vec3,
    /// Floor for the lighting term in [0, 1].
    pub ambient: f32,
    pub base_color: Color,
}

impl Default for DiffuseConstants {
    fn default() -> Self {
        Self {
            light_direction: Vec3::new(0.0, 0.0, 1.0),
            ambient: 0.1,
            base_color: Color::WHITE,
        }
    }
}

varyings! {
    /// World-space normal, interpolated across the triangle.
    pub struct NormalVaryings[3] {
        normal/set_normal: vec3 @ 0,
    }
}

/// Per-pixel diffuse (Lambert) lighting against a single directional
/// light. Normals are taken to world space with the normal matrix in the
/// vertex stage and renormalized per pixel after interpolation.
#[derive(Default)]
pub struct DiffuseShader;

impl Shader for DiffuseShader {
    type Vertex = MeshVertex;
    type Varyings = NormalVaryings;
    type Constants = DiffuseConstants;

    fn vertex(
        &self,
        ctx: &ShaderContext<'_, DiffuseConstants>,
        input: &MeshVertex,
        pos: &mut Vec4,
        vars: &mut NormalVaryings,
    ) {
        *pos = *ctx.world_view_proj_matrix * Vec4::from_vec3(input.position, 1.0);
        vars.set_normal(*ctx.world_normal_matrix * input.normal);
    }

    fn pixel(&self, ctx: &ShaderContext<'_, DiffuseConstants>, vars: &NormalVaryings) -> Color {
        let constants = ctx.constants;
        let normal = vars.normal().normalize();
        let lambert = (-constants.light_direction.normalize()).dot(normal).max(0.0);
        let intensity = constants.ambient + (1.0 - constants.ambient) * lambert;
        constants.base_color * intensity
    }
}
