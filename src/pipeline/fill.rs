//! Scanline triangle filling with per-pixel shading.
//!
//! The fill stage receives screen-space triangles (x, y in pixels, z in
//! [0, 1], w either 1 or 1/w depending on the perspective-correction
//! mode) and walks them one scanline at a time.
//!
//! # Interpolation
//!
//! Depth and varyings are affine over the triangle in screen space, so
//! their per-pixel increments are the screen-space gradients, computed
//! once per triangle from the plane through the three vertices. The first
//! pixel of each span is evaluated from the plane equation directly and
//! the rest step by the x-gradient.
//!
//! # Fill convention
//!
//! A pixel belongs to a triangle iff its center lies strictly inside, or
//! on a top or left edge. With pixel centers at (x + 0.5, y + 0.5) this
//! falls out of half-open spans: scanlines cover
//! `ceil(y_top - 0.5) .. ceil(y_bottom - 0.5)` and each span covers
//! `ceil(x_left - 0.5) .. ceil(x_right - 0.5)`. Adjacent triangles
//! sharing an edge therefore fill every pixel of their union exactly
//! once: both evaluate the shared edge from the same sorted endpoints, so
//! the spans partition bit-exactly.

use std::mem;

use crate::shader::{Shader, ShaderContext};
use crate::target::RenderTarget;
use crate::varyings::Varyings;

use super::clip::TransformedVertex;

/// How a screen-space triangle is turned into pixels. Implementations are
/// monomorphized into the rasterizer together with the shader.
pub trait TriangleFill<S: Shader> {
    fn draw_triangle<const PERSPECTIVE_CORRECT: bool>(
        &self,
        shader: &S,
        ctx: &ShaderContext<'_, S::Constants>,
        v0: &TransformedVertex<S::Varyings>,
        v1: &TransformedVertex<S::Varyings>,
        v2: &TransformedVertex<S::Varyings>,
        target: &mut RenderTarget,
    );
}

/// Solid fill with per-pixel varyings interpolation (smooth shading).
#[derive(Default)]
pub struct GouraudFill;

impl GouraudFill {
    pub fn new() -> Self {
        Self
    }
}

impl<S: Shader> TriangleFill<S> for GouraudFill {
    fn draw_triangle<const PERSPECTIVE_CORRECT: bool>(
        &self,
        shader: &S,
        ctx: &ShaderContext<'_, S::Constants>,
        v0: &TransformedVertex<S::Varyings>,
        v1: &TransformedVertex<S::Varyings>,
        v2: &TransformedVertex<S::Varyings>,
        target: &mut RenderTarget,
    ) {
        fill_solid::<S, PERSPECTIVE_CORRECT, true>(shader, ctx, v0, v1, v2, target);
    }
}

/// Solid fill interpolating depth only; every pixel is shaded with the
/// first vertex's payload.
#[derive(Default)]
pub struct FlatFill;

impl FlatFill {
    pub fn new() -> Self {
        Self
    }
}

impl<S: Shader> TriangleFill<S> for FlatFill {
    fn draw_triangle<const PERSPECTIVE_CORRECT: bool>(
        &self,
        shader: &S,
        ctx: &ShaderContext<'_, S::Constants>,
        v0: &TransformedVertex<S::Varyings>,
        v1: &TransformedVertex<S::Varyings>,
        v2: &TransformedVertex<S::Varyings>,
        target: &mut RenderTarget,
    ) {
        fill_solid::<S, PERSPECTIVE_CORRECT, false>(shader, ctx, v0, v1, v2, target);
    }
}

/// X coordinate of the edge (p -> q) at scanline center `yc`.
///
/// Callers only select edges whose y-extent spans `yc`, so the division is
/// well defined for non-degenerate triangles.
#[inline]
fn edge_x<V: Varyings>(p: &TransformedVertex<V>, q: &TransformedVertex<V>, yc: f32) -> f32 {
    p.pos.x + (q.pos.x - p.pos.x) * ((yc - p.pos.y) / (q.pos.y - p.pos.y))
}

fn fill_solid<S: Shader, const PERSPECTIVE_CORRECT: bool, const SMOOTH: bool>(
    shader: &S,
    ctx: &ShaderContext<'_, S::Constants>,
    v0: &TransformedVertex<S::Varyings>,
    v1: &TransformedVertex<S::Varyings>,
    v2: &TransformedVertex<S::Varyings>,
    target: &mut RenderTarget,
) {
    // Flat shading reads the designated first vertex's payload, recovered
    // to its pre-division value when the geometry stage prepared it for
    // perspective correction (pos.w then holds 1/w).
    let mut flat_vars = v0.vars;
    if !SMOOTH && PERSPECTIVE_CORRECT {
        flat_vars.scale(1.0 / v0.pos.w);
    }

    // Sort by y, top to bottom.
    let mut a = *v0;
    let mut b = *v1;
    let mut c = *v2;
    if b.pos.y < a.pos.y {
        mem::swap(&mut a, &mut b);
    }
    if c.pos.y < b.pos.y {
        mem::swap(&mut b, &mut c);
    }
    if b.pos.y < a.pos.y {
        mem::swap(&mut a, &mut b);
    }

    // Twice the signed area; zero means a degenerate (or culled-to-line)
    // triangle with nothing to fill.
    let dx1 = b.pos.x - a.pos.x;
    let dx2 = c.pos.x - a.pos.x;
    let dy1 = b.pos.y - a.pos.y;
    let dy2 = c.pos.y - a.pos.y;
    let denom = dx1 * dy2 - dx2 * dy1;
    if denom == 0.0 {
        return;
    }
    let inv_denom = 1.0 / denom;

    // Screen-space gradients of an attribute with values f0, f1, f2 at
    // the sorted vertices.
    let grad = |f0: f32, f1: f32, f2: f32| -> (f32, f32) {
        let g1 = f1 - f0;
        let g2 = f2 - f0;
        (
            (g1 * dy2 - g2 * dy1) * inv_denom,
            (g2 * dx1 - g1 * dx2) * inv_denom,
        )
    };

    let (dz_dx, dz_dy) = grad(a.pos.z, b.pos.z, c.pos.z);
    let (dw_dx, dw_dy) = grad(a.pos.w, b.pos.w, c.pos.w);

    let mut dvars_dx = S::Varyings::default();
    let mut dvars_dy = S::Varyings::default();
    if SMOOTH {
        let fa = a.vars.as_slice();
        let fb = b.vars.as_slice();
        let fc = c.vars.as_slice();
        for i in 0..fa.len() {
            let (gx, gy) = grad(fa[i], fb[i], fc[i]);
            dvars_dx.as_mut_slice()[i] = gx;
            dvars_dy.as_mut_slice()[i] = gy;
        }
    }

    let width = target.width() as i32;
    let height = target.height() as i32;

    let y_start = ((a.pos.y - 0.5).ceil() as i32).max(0);
    let y_end = ((c.pos.y - 0.5).ceil() as i32).min(height);

    for y in y_start..y_end {
        let yc = y as f32 + 0.5;

        // The long edge a->c flanks every scanline; the other side is
        // a->b above the middle vertex and b->c below it.
        let x_long = edge_x(&a, &c, yc);
        let x_short = if yc < b.pos.y {
            edge_x(&a, &b, yc)
        } else {
            edge_x(&b, &c, yc)
        };
        let (x_left, x_right) = if x_short < x_long {
            (x_short, x_long)
        } else {
            (x_long, x_short)
        };

        let x_start = ((x_left - 0.5).ceil() as i32).max(0);
        let x_end = ((x_right - 0.5).ceil() as i32).min(width);
        if x_start >= x_end {
            continue;
        }

        // Evaluate the attribute planes at the first pixel center.
        let px = x_start as f32 + 0.5 - a.pos.x;
        let py = yc - a.pos.y;
        let mut z = a.pos.z + dz_dx * px + dz_dy * py;
        let mut w = a.pos.w + dw_dx * px + dw_dy * py;
        let mut vars = a.vars;
        if SMOOTH {
            let mut step = dvars_dx;
            step.scale(px);
            vars.add_assign(&step);
            let mut step = dvars_dy;
            step.scale(py);
            vars.add_assign(&step);
        }

        for x in x_start..x_end {
            if z < target.depth.get(x, y) {
                let color = if !SMOOTH {
                    shader.pixel(ctx, &flat_vars)
                } else if PERSPECTIVE_CORRECT {
                    // vars and w were both pre-divided by the clip-space
                    // w, so the ratio restores the world-linear value.
                    let mut corrected = vars;
                    corrected.scale(1.0 / w);
                    shader.pixel(ctx, &corrected)
                } else {
                    shader.pixel(ctx, &vars)
                };
                target.surface.set_pixel(x, y, color);
                target.depth.set(x, y, z);
            }

            z += dz_dx;
            w += dw_dx;
            if SMOOTH {
                vars.add_assign(&dvars_dx);
            }
        }
    }
}
