//! A CPU-based software 3D rasterization pipeline.
//!
//! This crate implements the geometry and pixel stages of a software
//! renderer: indexed triangle lists run through a programmable vertex
//! shader, homogeneous clipping against the view frustum, perspective
//! divide and viewport mapping, backface culling, and scanline filling
//! with per-pixel programmable shading, depth testing and optionally
//! perspective-correct attribute interpolation.
//!
//! Shaders are composed into the pipeline statically: a [`Rasterizer`] is
//! generic over its shader bundle and fill strategy, so the inner loops
//! monomorphize with no dynamic dispatch.
//!
//! # Quick Start
//!
//! ```
//! use pixelpipe::prelude::*;
//! use pixelpipe::shaders::{MeshVertex, UnlitColorShader};
//!
//! let mut raster = GouraudRasterizer::new(UnlitColorShader, GouraudFill)?;
//! raster.set_render_target(Surface::new(320, 240), ZBuffer::new(320, 240))?;
//!
//! let vertices = [
//!     MeshVertex {
//!         position: Vec3::new(-0.5, -0.5, 0.5),
//!         normal: Vec3::new(0.0, 0.0, -1.0),
//!         uv: Vec2::ZERO,
//!         color: Color::RED,
//!     },
//!     MeshVertex {
//!         position: Vec3::new(0.5, -0.5, 0.5),
//!         normal: Vec3::new(0.0, 0.0, -1.0),
//!         uv: Vec2::ZERO,
//!         color: Color::GREEN,
//!     },
//!     MeshVertex {
//!         position: Vec3::new(0.0, 0.5, 0.5),
//!         normal: Vec3::new(0.0, 0.0, -1.0),
//!         uv: Vec2::ZERO,
//!         color: Color::BLUE,
//!     },
//! ];
//! raster.set_cull_mode(CullMode::None);
//! raster.render_triangle_list(&vertices, &[0, 1, 2])?;
//! # Ok::<(), pixelpipe::RasterError>(())
//! ```
//!
//! Windowing, model loading and scene management are out of scope; the
//! surface exposes its pixels as ARGB8888 bytes for whatever presents
//! them.

pub mod color;
pub mod error;
pub mod math;
pub mod pipeline;
pub mod sampler;
pub mod shader;
pub mod shaders;
pub mod target;
pub mod texture;
pub mod varyings;

pub use color::Color;
pub use error::RasterError;
pub use pipeline::{CullMode, Rasterizer};
pub use shader::{Shader, ShaderContext};
pub use target::{RenderTarget, Surface, ZBuffer};
pub use texture::Texture;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use pixelpipe::prelude::*;
/// ```
pub mod prelude {
    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::plane::Plane;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Pipeline
    pub use crate::pipeline::{
        CullMode, FlatFill, FlatRasterizer, GouraudFill, GouraudRasterizer,
        PerspectiveRasterizer, Rasterizer, TriangleFill, WireframeFill, WireframeRasterizer,
    };

    // Shading
    pub use crate::shader::{Shader, ShaderContext};
    pub use crate::varyings::Varyings;

    // Resources
    pub use crate::color::Color;
    pub use crate::error::RasterError;
    pub use crate::target::{RenderTarget, Surface, ZBuffer};
    pub use crate::texture::Texture;
}
