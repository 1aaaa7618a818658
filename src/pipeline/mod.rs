//! The rasterization pipeline.
//!
//! [`Rasterizer`] owns the full per-triangle path: vertex shading,
//! homogeneous clipping, perspective divide, viewport mapping, backface
//! culling, fan triangulation and the pixel fill. It is generic over the
//! shader bundle, the fill strategy and the perspective-correction flag,
//! so each combination monomorphizes into a specialized pipeline with no
//! dynamic dispatch on the hot path.
//!
//! A rasterizer instance is single-threaded and owns its scratch state;
//! separate instances may run on separate threads as long as their render
//! targets do not alias.

pub mod clip;
pub mod fill;
pub mod wireframe;

use std::sync::Arc;

use log::{debug, trace};

use crate::error::RasterError;
use crate::math::mat4::Mat4;
use crate::math::vec4::Vec4;
use crate::sampler::TextureSampler;
use crate::shader::{Shader, ShaderContext};
use crate::target::{RenderTarget, Surface, ZBuffer};
use crate::texture::Texture;
use crate::varyings::Varyings;

use clip::{TransformedVertex, MAX_POLYGON_VERTICES};
pub use fill::{FlatFill, GouraudFill, TriangleFill};
pub use wireframe::WireframeFill;

/// Which screen-space winding gets discarded before filling.
///
/// The winding of a triangle is the sign of the 2D cross product of its
/// first two edges after viewport mapping (y pointing down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    /// Draw both windings.
    None,
    /// Discard clockwise triangles.
    #[default]
    Clockwise,
    /// Discard counter-clockwise triangles.
    CounterClockwise,
}

/// A specialized rasterization pipeline.
///
/// `PERSPECTIVE_CORRECT` decides at compile time whether varyings are
/// interpolated perspective-correctly (pre-divided by w in the geometry
/// stage, restored per pixel in the fill stage) or affinely in screen
/// space.
pub struct Rasterizer<S: Shader, F: TriangleFill<S>, const PERSPECTIVE_CORRECT: bool> {
    shader: S,
    fill: F,
    constants: S::Constants,

    world: Mat4,
    view: Mat4,
    projection: Mat4,
    world_normal: Mat4,
    world_view: Mat4,
    world_view_proj: Mat4,

    cull_mode: CullMode,
    sampler: TextureSampler,
    target: Option<RenderTarget>,

    // Vertex-stage output, reused across calls.
    transformed: Vec<TransformedVertex<S::Varyings>>,
}

/// Smooth-shaded pipeline with screen-linear interpolation.
pub type GouraudRasterizer<S> = Rasterizer<S, GouraudFill, false>;
/// Smooth-shaded pipeline with perspective-correct interpolation.
pub type PerspectiveRasterizer<S> = Rasterizer<S, GouraudFill, true>;
/// Flat-shaded pipeline; pixels take the first vertex's payload.
pub type FlatRasterizer<S> = Rasterizer<S, FlatFill, false>;
/// Outline-only pipeline sharing the geometry stage.
pub type WireframeRasterizer<S> = Rasterizer<S, WireframeFill, false>;

impl<S: Shader, F: TriangleFill<S>, const PERSPECTIVE_CORRECT: bool>
    Rasterizer<S, F, PERSPECTIVE_CORRECT>
{
    /// Build a pipeline from a shader bundle and a fill strategy.
    ///
    /// Validates the shader's varyings layout: the flat float view must
    /// agree with the declared length, or interpolation would read past
    /// the payload.
    pub fn new(shader: S, fill: F) -> Result<Self, RasterError> {
        let probe = S::Varyings::default();
        if probe.as_slice().len() != S::Varyings::LEN {
            return Err(RasterError::InvalidVaryingsLayout {
                declared: S::Varyings::LEN,
                actual: probe.as_slice().len(),
            });
        }

        Ok(Self {
            shader,
            fill,
            constants: S::Constants::default(),
            world: Mat4::identity(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            world_normal: Mat4::identity(),
            world_view: Mat4::identity(),
            world_view_proj: Mat4::identity(),
            cull_mode: CullMode::default(),
            sampler: TextureSampler::new(),
            target: None,
            transformed: Vec::new(),
        })
    }

    /// Bind the color surface and depth buffer the pipeline draws into.
    /// Fails if their dimensions disagree.
    pub fn set_render_target(
        &mut self,
        surface: Surface,
        depth: ZBuffer,
    ) -> Result<(), RasterError> {
        let target = RenderTarget::new(surface, depth)?;
        debug!(
            "render target bound: {}x{}",
            target.width(),
            target.height()
        );
        self.target = Some(target);
        Ok(())
    }

    pub fn render_target(&self) -> Option<&RenderTarget> {
        self.target.as_ref()
    }

    pub fn render_target_mut(&mut self) -> Option<&mut RenderTarget> {
        self.target.as_mut()
    }

    /// Unbind and return the render target, e.g. to present the surface.
    pub fn take_render_target(&mut self) -> Option<RenderTarget> {
        self.target.take()
    }

    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    /// Set the world matrix, refreshing the normal matrix and the cached
    /// products before returning.
    pub fn set_world_matrix(&mut self, world: Mat4) {
        self.world = world;
        // Normals live in world space, so this only depends on W.
        self.world_normal = world
            .inverse()
            .unwrap_or_else(Mat4::identity)
            .transpose();
        self.refresh_products();
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn set_view_matrix(&mut self, view: Mat4) {
        self.view = view;
        self.refresh_products();
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn set_projection_matrix(&mut self, projection: Mat4) {
        self.projection = projection;
        self.refresh_products();
    }

    pub fn world_normal_matrix(&self) -> Mat4 {
        self.world_normal
    }

    pub fn world_view_matrix(&self) -> Mat4 {
        self.world_view
    }

    pub fn world_view_proj_matrix(&self) -> Mat4 {
        self.world_view_proj
    }

    fn refresh_products(&mut self) {
        self.world_view = self.view * self.world;
        self.world_view_proj = self.projection * self.world_view;
    }

    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    /// Replace the bound texture set readable from shaders. Fixed-point
    /// addressing constants are precomputed here, once per bind.
    pub fn set_textures(&mut self, textures: Vec<Arc<Texture>>) {
        debug!("binding {} textures", textures.len());
        self.sampler.bind(textures);
    }

    pub fn constants(&self) -> &S::Constants {
        &self.constants
    }

    /// Mutable access to the shader constants. Must not be called while a
    /// draw call is in flight, which the borrow rules already enforce.
    pub fn constants_mut(&mut self) -> &mut S::Constants {
        &mut self.constants
    }

    pub fn shader(&self) -> &S {
        &self.shader
    }

    pub fn fill(&self) -> &F {
        &self.fill
    }

    pub fn fill_mut(&mut self) -> &mut F {
        &mut self.fill
    }

    /// Run the full pipeline over an indexed triangle list.
    ///
    /// Every three indices describe one triangle. Triangles are processed
    /// in index order and pixels written in scanline order; the depth
    /// buffer resolves visibility regardless of submission order.
    pub fn render_triangle_list(
        &mut self,
        vertices: &[S::Vertex],
        indices: &[u32],
    ) -> Result<(), RasterError> {
        if indices.len() % 3 != 0 {
            return Err(RasterError::MalformedIndices {
                reason: format!("index count {} is not a multiple of 3", indices.len()),
            });
        }
        if let Some(&max) = indices.iter().max() {
            if max as usize >= vertices.len() {
                return Err(RasterError::MalformedIndices {
                    reason: format!("index {} out of range for {} vertices", max, vertices.len()),
                });
            }
        }

        let Self {
            shader,
            fill,
            constants,
            world_normal,
            world_view_proj,
            cull_mode,
            sampler,
            target,
            transformed,
            ..
        } = self;
        let target = target.as_mut().ok_or(RasterError::NoRenderTarget)?;

        trace!(
            "render_triangle_list: {} vertices, {} triangles",
            vertices.len(),
            indices.len() / 3
        );

        let ctx = ShaderContext {
            world_normal_matrix: world_normal,
            world_view_proj_matrix: world_view_proj,
            constants,
            sampler,
        };

        // Vertex stage: run the vertex shader over the whole array once;
        // the index stream may reference each vertex many times.
        transformed.clear();
        transformed.reserve(vertices.len());
        for vertex in vertices {
            let mut pos = Vec4::ZERO;
            let mut vars = S::Varyings::default();
            shader.vertex(&ctx, vertex, &mut pos, &mut vars);
            transformed.push(TransformedVertex { pos, vars });
        }

        let width = target.width() as f32;
        let height = target.height() as f32;

        for tri in indices.chunks_exact(3) {
            let mut front = [TransformedVertex::default(); MAX_POLYGON_VERTICES];
            let mut back = [TransformedVertex::default(); MAX_POLYGON_VERTICES];
            front[0] = transformed[tri[0] as usize];
            front[1] = transformed[tri[1] as usize];
            front[2] = transformed[tri[2] as usize];

            let count = clip::clip_polygon(&mut front, &mut back, 3);
            if count < 3 {
                continue;
            }
            let polygon = &mut front[..count];

            // Perspective divide and viewport map. In perspective-correct
            // mode the payload is pre-divided as well and pos.w keeps 1/w
            // so the fill stage can reconstruct the original values.
            for v in polygon.iter_mut() {
                let inv_w = 1.0 / v.pos.w;
                v.pos.x *= inv_w;
                v.pos.y *= inv_w;
                v.pos.z *= inv_w;
                if PERSPECTIVE_CORRECT {
                    v.vars.scale(inv_w);
                    v.pos.w = inv_w;
                } else {
                    v.pos.w = 1.0;
                }
                v.pos.x = (v.pos.x + 1.0) * width * 0.5;
                v.pos.y = (1.0 - v.pos.y) * height * 0.5;
            }

            // Backface test on the first two edges of the screen-space
            // polygon; clipping preserves winding, so this matches the
            // source triangle.
            let cross = (polygon[1].pos.x - polygon[0].pos.x)
                * (polygon[2].pos.y - polygon[0].pos.y)
                - (polygon[1].pos.y - polygon[0].pos.y) * (polygon[2].pos.x - polygon[0].pos.x);
            let culled = match *cull_mode {
                CullMode::None => false,
                CullMode::Clockwise => cross > 0.0,
                CullMode::CounterClockwise => cross < 0.0,
            };
            if culled {
                continue;
            }

            // Fan triangulation; safe because clipping keeps the polygon
            // convex.
            for i in 1..count - 1 {
                fill.draw_triangle::<PERSPECTIVE_CORRECT>(
                    shader,
                    &ctx,
                    &polygon[0],
                    &polygon[i],
                    &polygon[i + 1],
                    target,
                );
            }
        }

        Ok(())
    }
}
