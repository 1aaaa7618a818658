//! Wireframe triangle drawing.
//!
//! An alternative fill that outlines the clipped, screen-space triangle
//! with Bresenham lines instead of filling it. Lines are drawn in a
//! constant color, bypass the depth test, and never invoke the pixel
//! shader; the geometry stage (clipping, culling, triangulation) is
//! shared with the solid fills.

use crate::color::Color;
use crate::shader::{Shader, ShaderContext};
use crate::target::RenderTarget;

use super::clip::TransformedVertex;
use super::fill::TriangleFill;

/// Draws triangle outlines in a fixed color.
pub struct WireframeFill {
    color: Color,
}

impl WireframeFill {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

impl<S: Shader> TriangleFill<S> for WireframeFill {
    fn draw_triangle<const PERSPECTIVE_CORRECT: bool>(
        &self,
        _shader: &S,
        _ctx: &ShaderContext<'_, S::Constants>,
        v0: &TransformedVertex<S::Varyings>,
        v1: &TransformedVertex<S::Varyings>,
        v2: &TransformedVertex<S::Varyings>,
        target: &mut RenderTarget,
    ) {
        let surface = target.surface_mut();
        let points = [
            (v0.pos.x as i32, v0.pos.y as i32),
            (v1.pos.x as i32, v1.pos.y as i32),
            (v2.pos.x as i32, v2.pos.y as i32),
        ];
        draw_line(surface, points[0], points[1], self.color);
        draw_line(surface, points[1], points[2], self.color);
        draw_line(surface, points[2], points[0], self.color);
    }
}

/// Bresenham's line algorithm.
///
/// Integer-only error stepping; both endpoints are written. No clipping is
/// needed here because the geometry stage has already clipped the triangle
/// that produced these endpoints (the surface still bounds-checks writes).
fn draw_line(surface: &mut crate::target::Surface, from: (i32, i32), to: (i32, i32), color: Color) {
    let (x0, y0) = from;
    let (x1, y1) = to;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let step_x = if x0 < x1 { 1 } else { -1 };
    let step_y = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;
    let mut x = x0;
    let mut y = y0;

    loop {
        surface.set_pixel(x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += step_x;
        }
        if e2 < dx {
            err += dx;
            y += step_y;
        }
    }
}
