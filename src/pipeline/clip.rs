//! Homogeneous clipping against the canonical view frustum.
//!
//! Clipping runs in clip space, after the projection matrix but before the
//! perspective divide. The clip volume is:
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//!  0 <= z <= w
//! ```
//!
//! Each plane is expressed homogeneously so the inside test is a single
//! dot product on the undivided position. Sutherland-Hodgman runs one
//! plane at a time over two fixed scratch buffers; the plane count is even
//! so the final polygon lands back in the buffer the triangle was seeded
//! into.

use crate::math::plane::Plane;
use crate::math::vec4::Vec4;
use crate::varyings::Varyings;

/// Capacity of the clipping scratch buffers. A triangle clipped against
/// the six frustum planes never needs more vertices than this.
pub const MAX_POLYGON_VERTICES: usize = 8;

/// The six frustum planes in homogeneous form. Must stay an even count so
/// the ping-pong between scratch buffers ends where it started.
pub(crate) const FRUSTUM_PLANES: [Plane; 6] = [
    Plane::new(1.0, 0.0, 0.0, 1.0),  // left:   x >= -w
    Plane::new(-1.0, 0.0, 0.0, 1.0), // right:  x <=  w
    Plane::new(0.0, -1.0, 0.0, 1.0), // top:    y <=  w
    Plane::new(0.0, 1.0, 0.0, 1.0),  // bottom: y >= -w
    Plane::new(0.0, 0.0, 1.0, 0.0),  // near:   z >=  0
    Plane::new(0.0, 0.0, -1.0, 1.0), // far:    z <=  w
];

/// A vertex after the vertex shader: clip-space position plus the
/// interpolant payload. Mutated in place by clipping, the perspective
/// divide and the viewport map; lives for one triangle in the scratch
/// buffers.
#[derive(Clone, Copy, Debug)]
pub struct TransformedVertex<V: Varyings> {
    pub pos: Vec4,
    pub vars: V,
}

impl<V: Varyings> Default for TransformedVertex<V> {
    fn default() -> Self {
        Self {
            pos: Vec4::ZERO,
            vars: V::default(),
        }
    }
}

impl<V: Varyings> TransformedVertex<V> {
    /// Interpolate position and payload together. Used where a polygon
    /// edge crosses a clipping plane.
    pub(crate) fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            pos: self.pos.lerp(other.pos, t),
            vars: self.vars.lerp(&other.vars, t),
        }
    }
}

#[inline]
fn emit<V: Varyings>(
    output: &mut [TransformedVertex<V>; MAX_POLYGON_VERTICES],
    count: &mut usize,
    vertex: TransformedVertex<V>,
) {
    assert!(
        *count < MAX_POLYGON_VERTICES,
        "clipped polygon exceeded the vertex budget"
    );
    output[*count] = vertex;
    *count += 1;
}

/// Clip a convex polygon against a single plane (Sutherland-Hodgman).
/// Returns the output vertex count.
///
/// The inside test is `>= 0` so edges lying exactly on a plane are kept.
/// Each plane can add at most one vertex to a convex polygon.
pub(crate) fn clip_against_plane<V: Varyings>(
    input: &[TransformedVertex<V>],
    output: &mut [TransformedVertex<V>; MAX_POLYGON_VERTICES],
    plane: &Plane,
) -> usize {
    let mut count = 0;

    for i in 0..input.len() {
        let current = &input[i];
        let next = &input[(i + 1) % input.len()];

        let d1 = plane.classify(current.pos);
        let d2 = plane.classify(next.pos);

        if d1 >= 0.0 {
            emit(output, &mut count, *current);
            if d2 < 0.0 {
                // Leaving the inside half-space: emit the crossing point.
                emit(output, &mut count, current.lerp(next, d1 / (d1 - d2)));
            }
        } else if d2 >= 0.0 {
            // Entering the inside half-space.
            emit(output, &mut count, current.lerp(next, d1 / (d1 - d2)));
        }
        // Both outside: emit nothing.
    }

    count
}

/// Clip the polygon seeded in `a` (first `count` vertices) against all six
/// frustum planes, ping-ponging through `b`.
///
/// Returns the final vertex count; the surviving polygon is back in `a`
/// because the plane count is even. Returns 0 as soon as the polygon
/// degenerates below a triangle.
pub(crate) fn clip_polygon<V: Varyings>(
    a: &mut [TransformedVertex<V>; MAX_POLYGON_VERTICES],
    b: &mut [TransformedVertex<V>; MAX_POLYGON_VERTICES],
    mut count: usize,
) -> usize {
    let mut src = a;
    let mut dst = b;

    for plane in &FRUSTUM_PLANES {
        count = clip_against_plane(&src[..count], dst, plane);
        std::mem::swap(&mut src, &mut dst);
        if count < 3 {
            return 0;
        }
    }

    count
}
