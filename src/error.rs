//! Error types reported at the pipeline API boundary.

use thiserror::Error;

/// Recoverable errors returned by the rasterizer facade.
///
/// Internal invariant violations (a clipped polygon exceeding its vertex
/// budget) are not represented here; they indicate a bug in the pipeline
/// itself and abort via `assert!`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// The color surface and depth buffer bound as a render target must
    /// have identical dimensions; the viewport mapping assumes it.
    #[error(
        "render target dimension mismatch: surface is {surface_width}x{surface_height}, \
         depth buffer is {depth_width}x{depth_height}"
    )]
    DimensionMismatch {
        surface_width: u32,
        surface_height: u32,
        depth_width: u32,
        depth_height: u32,
    },

    /// The index stream does not describe a whole number of triangles, or
    /// references a vertex past the end of the vertex array.
    #[error("malformed index stream: {reason}")]
    MalformedIndices { reason: String },

    /// A `Varyings` implementation whose flat slice disagrees with its
    /// declared length cannot be interpolated safely.
    #[error("varyings layout declares {declared} floats but exposes {actual}")]
    InvalidVaryingsLayout { declared: usize, actual: usize },

    /// `render_triangle_list` was called before a render target was bound.
    #[error("no render target bound")]
    NoRenderTarget,
}
