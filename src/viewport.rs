//! Viewport state and the scene-to-screen transform pipeline.
//!
//! Two matrices map authored geometry to pixels: `scene_to_ndc` translates
//! the viewport center to the origin and scales by `1 / (2 * span)` into the
//! unit square (via the homogeneous `w` row), and `ndc_to_screen` scales by
//! `min(width, height)` and centers the shorter axis. The renderer composes
//! `ndc_to_screen * scene_to_ndc * element_local` once per element.

use crate::math::Mat3;

/// Margin factor applied when fitting a scene into the default viewport.
const FIT_MARGIN: f32 = 1.2;

/// Visible region of the scene: a center and a half-span in scene units.
///
/// Mutated only by explicit pan/zoom operations; persists across redraws.
/// Callers must keep `span > 0` — a degenerate span produces garbage pixels
/// (never a panic).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Center X in scene units.
    pub cx: f32,
    /// Center Y in scene units.
    pub cy: f32,
    /// Half-extent of the visible square in scene units.
    pub span: f32,
}

impl Viewport {
    /// Create a viewport from a center and half-span.
    #[must_use]
    pub const fn new(cx: f32, cy: f32, span: f32) -> Self {
        Self { cx, cy, span }
    }

    /// The default viewport for a scene extent: centered, with a 20% margin
    /// around the larger dimension.
    #[must_use]
    pub fn fit_scene(width: f32, height: f32) -> Self {
        Self::new(
            width / 2.0,
            height / 2.0,
            FIT_MARGIN * width.max(height) / 2.0,
        )
    }

    /// Pan by `(dx, dy)` scene units and multiply the span by `scale`.
    pub fn pan_zoom(&mut self, dx: f32, dy: f32, scale: f32) {
        self.cx += dx;
        self.cy += dy;
        self.span *= scale;
    }

    /// Matrix taking scene coordinates into the `[0, 1]^2` NDC square.
    ///
    /// The `2 * span` scale lives in the `w` row, so applying the matrix to
    /// `(x, y, 1)` and dividing by `w` yields
    /// `((x - cx) / (2 span) + 0.5, (y - cy) / (2 span) + 0.5)`.
    #[must_use]
    pub fn scene_to_ndc(&self) -> Mat3 {
        Mat3::new([
            1.0,
            0.0,
            -self.cx + self.span,
            0.0,
            1.0,
            -self.cy + self.span,
            0.0,
            0.0,
            2.0 * self.span,
        ])
    }

    /// Matrix taking NDC into pixel coordinates: scale by the shorter window
    /// axis and center along the longer one.
    #[must_use]
    pub fn ndc_to_screen(width: u32, height: u32) -> Mat3 {
        let w = width as f32;
        let h = height as f32;
        let s = w.min(h);
        Mat3::new([s, 0.0, (w - s) / 2.0, 0.0, s, (h - s) / 2.0, 0.0, 0.0, 1.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_scene() {
        let vp = Viewport::fit_scene(100.0, 50.0);
        assert_relative_eq!(vp.cx, 50.0);
        assert_relative_eq!(vp.cy, 25.0);
        assert_relative_eq!(vp.span, 60.0);
    }

    #[test]
    fn test_center_maps_to_ndc_half() {
        let vp = Viewport::new(10.0, 20.0, 5.0);
        let p = vp.scene_to_ndc().apply(Vec2::new(10.0, 20.0));
        assert_relative_eq!(p.x, 0.5);
        assert_relative_eq!(p.y, 0.5);
    }

    #[test]
    fn test_span_corners_map_to_unit_square() {
        let vp = Viewport::new(0.0, 0.0, 2.0);
        let ndc = vp.scene_to_ndc();
        let top_left = ndc.apply(Vec2::new(-2.0, -2.0));
        let bottom_right = ndc.apply(Vec2::new(2.0, 2.0));
        assert_relative_eq!(top_left.x, 0.0);
        assert_relative_eq!(top_left.y, 0.0);
        assert_relative_eq!(bottom_right.x, 1.0);
        assert_relative_eq!(bottom_right.y, 1.0);
    }

    #[test]
    fn test_ndc_to_screen_centers_short_axis() {
        // 200x100 window: s = 100, x offset 50, y offset 0
        let m = Viewport::ndc_to_screen(200, 100);
        let p = m.apply(Vec2::new(0.0, 0.0));
        assert_relative_eq!(p.x, 50.0);
        assert_relative_eq!(p.y, 0.0);
        let q = m.apply(Vec2::new(1.0, 1.0));
        assert_relative_eq!(q.x, 150.0);
        assert_relative_eq!(q.y, 100.0);
    }

    #[test]
    fn test_pan_zoom() {
        let mut vp = Viewport::new(0.0, 0.0, 10.0);
        vp.pan_zoom(3.0, -2.0, 0.5);
        assert_relative_eq!(vp.cx, 3.0);
        assert_relative_eq!(vp.cy, -2.0);
        assert_relative_eq!(vp.span, 5.0);
    }
}
