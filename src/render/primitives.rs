//! Scan conversion of points, lines, triangles, and image quads.
//!
//! Every rasterizer writes through [`Framebuffer::blend_pixel`], the
//! Porter-Duff "over" operator stored in 8-bit space. Several loops step
//! with floating-point counters on purpose: the termination conditions and
//! coverage weights depend on the fractional accumulation, so an
//! integer-then-cast rewrite would change the rendered output.
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital
//!   plotter."
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

use crate::color::Color;
use crate::framebuffer::Framebuffer;
use crate::math::Vec2;
use crate::texture::{Sampler2D, Texture};

/// Side length of the blocks used to accelerate triangle fill.
const BLOCK_LEN: f32 = 10.0;

// ============================================================================
// Points and lines
// ============================================================================

/// Blend a single pixel at `(floor(x), floor(y))`.
///
/// Coordinates outside the buffer are silently dropped.
pub fn rasterize_point(fb: &mut Framebuffer, x: f32, y: f32, color: Color) {
    let ix = x.floor();
    let iy = y.floor();
    if ix < 0.0 || ix >= fb.width() as f32 || iy < 0.0 || iy >= fb.height() as f32 {
        return;
    }
    fb.blend_pixel(ix as u32, iy as u32, color);
}

/// Rasterize a line with Bresenham-style integer-error stepping.
///
/// Endpoints are snapped to pixel centers (`floor(c) + 0.5`) and sorted so
/// the reference axis increases; when `|slope| > 1` the walk steps along Y
/// and accumulates fractional X error, otherwise along X accumulating Y. The
/// accumulator triggers a one-pixel step on the complement axis when it
/// crosses ±0.5, wrapping the residual.
///
/// The first pixel that falls outside the buffer aborts the remaining line:
/// this is an input-bounds contract, not a clipping algorithm.
pub fn rasterize_line(fb: &mut Framebuffer, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
    let mut x0 = x0.floor() + 0.5;
    let mut y0 = y0.floor() + 0.5;
    let mut x1 = x1.floor() + 0.5;
    let mut y1 = y1.floor() + 0.5;

    let slope = if x0 == x1 {
        1.0 / f32::MIN_POSITIVE
    } else {
        (y1 - y0) / (x1 - x0)
    };
    let steep = slope > 1.0 || slope < -1.0;

    let (mut r, r_end, mut c, c_inc) = if steep {
        if y0 > y1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }
        (y0, y1, x0, 1.0 / slope)
    } else {
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }
        (x0, x1, y0, slope)
    };

    let width = fb.width() as f32;
    let height = fb.height() as f32;
    let mut c_diff = 0.0f32;

    while r <= r_end {
        let (x, y) = if steep { (c, r) } else { (r, c) };
        let ix = x.floor();
        let iy = y.floor();
        if ix < 0.0 || ix >= width || iy < 0.0 || iy >= height {
            return;
        }
        fb.blend_pixel(ix as u32, iy as u32, color);

        r += 1.0;
        let c_accu = c_diff + c_inc;
        if c_accu >= 0.5 {
            c += 1.0;
            c_diff = c_accu - 1.0;
        } else if c_accu <= -0.5 {
            c -= 1.0;
            c_diff = c_accu + 1.0;
        } else {
            c_diff = c_accu;
        }
    }
}

/// Rasterize a line with Wu-style coverage antialiasing.
///
/// Each step along the major axis splits coverage between the two bracketing
/// pixels on the minor axis, proportional to the fractional distance from the
/// ideal line. Near-axis lines whose sample lands almost exactly between two
/// pixels snap to full coverage on one, so they do not render washed out.
pub fn rasterize_line_aa(fb: &mut Framebuffer, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
    // coincident endpoints would make the gradient 0/0
    if x0 == x1 && y0 == y1 {
        rasterize_point(fb, x0, y0, color);
        return;
    }

    let steep = (y0 - y1).abs() > (x0 - x1).abs();
    let (mut x0, mut y0, mut x1, mut y1) = if steep {
        (y0, x0, y1, x1)
    } else {
        (x0, y0, x1, y1)
    };
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let gradient = (y1 - y0) / (x1 - x0);

    let mut x = x0.floor() + 0.5;
    let x_end = x1.floor() + 0.5;
    let mut y = gradient * (x - x0) + y0;

    while x <= x_end {
        let xs = x;
        let ys = y.floor() + 0.5;
        let mut diff = y - ys;

        if diff >= 0.0 {
            if gradient.abs() < 0.01 && (diff - 0.5).abs() < 0.01 {
                diff = 0.0;
            }
            if steep {
                rasterize_point(fb, ys, xs, color * (1.0 - diff));
                rasterize_point(fb, ys + 1.0, xs, color * diff);
            } else {
                rasterize_point(fb, xs, ys, color * (1.0 - diff));
                rasterize_point(fb, xs, ys + 1.0, color * diff);
            }
        } else {
            if gradient.abs() < 0.01 && (diff + 0.5).abs() < 0.01 {
                diff = 0.0;
            }
            if steep {
                rasterize_point(fb, ys, xs, color * (1.0 + diff));
                rasterize_point(fb, ys - 1.0, xs, color * -diff);
            } else {
                rasterize_point(fb, xs, ys, color * (1.0 + diff));
                rasterize_point(fb, xs, ys - 1.0, color * -diff);
            }
        }

        x += 1.0;
        y += gradient;
    }
}

// ============================================================================
// Triangles
// ============================================================================

/// A half-plane edge function `A*x + B*y + C`, oriented so a designated
/// interior point yields a non-negative value.
#[derive(Debug, Clone, Copy)]
struct EdgeFn {
    a: f32,
    b: f32,
    c: f32,
}

impl EdgeFn {
    fn new(x0: f32, y0: f32, x1: f32, y1: f32, x_in: f32, y_in: f32) -> Self {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let (mut a, mut b, mut c) = (dy, -dx, -dy * x0 + dx * y0);
        if a * x_in + b * y_in + c < 0.0 {
            a = -a;
            b = -b;
            c = -c;
        }
        Self { a, b, c }
    }

    fn contains(&self, x: f32, y: f32) -> bool {
        self.a * x + self.b * y + self.c >= 0.0
    }
}

/// Edge-function inside test for one triangle.
///
/// Ties (`A*x + B*y + C == 0`) count as inside, so adjacent triangles both
/// claim a shared border pixel; this is acceptable because the fill paths
/// that share edges use opaque colors, for which the over blend is
/// idempotent.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    e0: EdgeFn,
    e1: EdgeFn,
    e2: EdgeFn,
    degenerate: bool,
}

impl Triangle {
    /// Build the three oriented half-planes; each edge is oriented toward
    /// the opposite vertex.
    ///
    /// A zero-area (collinear) triangle contains no point at all. Without
    /// the explicit area check, collinear vertices in monotonic order would
    /// orient all three edges to the same half-plane and claim half the
    /// bounding box.
    #[must_use]
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let area2 = (x1 - x0) * (y2 - y0) - (x2 - x0) * (y1 - y0);
        Self {
            e0: EdgeFn::new(x0, y0, x1, y1, x2, y2),
            e1: EdgeFn::new(x0, y0, x2, y2, x1, y1),
            e2: EdgeFn::new(x1, y1, x2, y2, x0, y0),
            degenerate: area2 == 0.0,
        }
    }

    /// True when `(x, y)` lies inside or on the triangle boundary.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        !self.degenerate
            && self.e0.contains(x, y)
            && self.e1.contains(x, y)
            && self.e2.contains(x, y)
    }
}

/// Fill a triangle by block-accelerated point-inside testing.
///
/// The bounding box is divided into 10x10-pixel blocks. The four border
/// scanlines of each block are tested (and drawn) first; if any border pixel
/// is inside, the block crosses the triangle and its interior pixels are
/// tested individually, otherwise the block is skipped. The border test is
/// conservative, not an exact coverage test: blocks wholly interior to the
/// triangle still take the interior loop via their border hits.
pub fn rasterize_triangle(
    fb: &mut Framebuffer,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    color: Color,
) {
    let triangle = Triangle::new(x0, y0, x1, y1, x2, y2);
    if triangle.degenerate {
        return;
    }

    let x_min = x0.min(x1).min(x2);
    let y_min = y0.min(y1).min(y2);
    let x_max = x0.max(x1).max(x2);
    let y_max = y0.max(y1).max(y2);

    let mut xb_min = x_min.floor();
    while xb_min <= x_max.floor() {
        let mut yb_min = y_min.floor();
        while yb_min <= y_max.floor() {
            // sample positions for this block's border ring
            let xsb_min = xb_min + 0.5;
            let xsb_max = xsb_min + BLOCK_LEN - 1.0;
            let ysb_min = yb_min + 0.5;
            let ysb_max = ysb_min + BLOCK_LEN - 1.0;

            let mut crosses = false;

            let mut i = 0.0f32;
            while i < BLOCK_LEN - 1.0 {
                // bottom
                let (x, y) = (xsb_min + i, ysb_min);
                if triangle.contains(x, y) {
                    crosses = true;
                    rasterize_point(fb, x, y, color);
                }
                // right
                let (x, y) = (xsb_max, ysb_min + i);
                if triangle.contains(x, y) {
                    crosses = true;
                    rasterize_point(fb, x, y, color);
                }
                // top
                let (x, y) = (xsb_max - i, ysb_max);
                if triangle.contains(x, y) {
                    crosses = true;
                    rasterize_point(fb, x, y, color);
                }
                // left
                let (x, y) = (xsb_min, ysb_max - i);
                if triangle.contains(x, y) {
                    crosses = true;
                    rasterize_point(fb, x, y, color);
                }
                i += 1.0;
            }

            if crosses {
                let mut x = xsb_min + 1.0;
                while x < xsb_max {
                    let mut y = ysb_min + 1.0;
                    while y < ysb_max {
                        if triangle.contains(x, y) {
                            rasterize_point(fb, x, y, color);
                        }
                        y += 1.0;
                    }
                    x += 1.0;
                }
            }

            yb_min += BLOCK_LEN;
        }
        xb_min += BLOCK_LEN;
    }
}

// ============================================================================
// Image quads
// ============================================================================

/// Composite a texture over the axis-aligned box `(x0, y0)..(x1, y1)`.
///
/// Each destination pixel gets normalized `(u, v)` by linear interpolation
/// across the box extents and a bilinear sample from mip level 0, blended
/// with the over operator.
pub fn rasterize_image(
    fb: &mut Framebuffer,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    texture: &Texture,
) {
    let w = x1 - x0;
    let h = y1 - y0;

    let mut y = y0.floor() + 0.5;
    while y < y1 {
        let v = (y - y0) / h;
        let mut x = x0.floor() + 0.5;
        while x < x1 {
            let u = (x - x0) / w;
            let color = Sampler2D::sample_bilinear(texture, u, v, 0);
            rasterize_point(fb, x, y, color);
            x += 1.0;
        }
        y += 1.0;
    }
}

// ============================================================================
// Polygon triangulation
// ============================================================================

/// Triangulate a polygon into a fan anchored at the first vertex.
///
/// Returns an empty list for fewer than three vertices.
#[must_use]
pub fn triangulate(points: &[Vec2]) -> Vec<[Vec2; 3]> {
    if points.len() < 3 {
        return Vec::new();
    }
    (1..points.len() - 1)
        .map(|i| [points[0], points[i], points[i + 1]])
        .collect()
}
