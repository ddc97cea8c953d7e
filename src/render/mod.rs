//! Rendering pipeline orchestration.
//!
//! [`SoftwareRenderer`] owns the framebuffer and viewport and drives one
//! frame as a single synchronous call chain: clear to white, walk the scene
//! tree composing `screen * local` transforms, dispatch each element to the
//! scan converter, then run one morphological antialiasing pass. Nothing in
//! the chain suspends or runs concurrently; the buffer is exclusively owned
//! for the duration of a redraw.

pub mod mlaa;
pub mod primitives;

use tracing::debug;

use crate::color::Color;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::math::Mat3;
use crate::scene::{Element, Scene, Shape};
use crate::viewport::Viewport;

use mlaa::MorphAntialias;
use primitives::{
    rasterize_image, rasterize_line, rasterize_point, rasterize_triangle, triangulate,
};

/// Software rasterizer over an owned RGBA8 framebuffer.
#[derive(Debug)]
pub struct SoftwareRenderer {
    framebuffer: Framebuffer,
    viewport: Viewport,
    scene: Option<Scene>,
}

impl SoftwareRenderer {
    /// Create a renderer with a white framebuffer and no scene.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            framebuffer: Framebuffer::new(width, height)?,
            viewport: Viewport::fit_scene(width as f32, height as f32),
            scene: None,
        })
    }

    /// The rendered pixel buffer, for display or encoding.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Destructively resize the framebuffer and rerender.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.framebuffer.resize(width, height)?;
        self.redraw();
        Ok(())
    }

    /// Install a scene, fit the viewport around it, and render.
    pub fn set_scene(&mut self, scene: Scene) {
        self.viewport = Viewport::fit_scene(scene.width, scene.height);
        self.scene = Some(scene);
        self.redraw();
    }

    /// Replace the viewport without triggering a redraw.
    pub fn set_viewport(&mut self, cx: f32, cy: f32, span: f32) {
        self.viewport = Viewport::new(cx, cy, span);
    }

    /// Pan by `(dx, dy)` scene units, scale the span, and rerender.
    pub fn update_viewport(&mut self, dx: f32, dy: f32, scale: f32) {
        self.viewport.pan_zoom(dx, dy, scale);
        self.redraw();
    }

    /// Clear to white and rerender the current scene.
    ///
    /// One frame is one pass: scene walk, then a single antialiasing
    /// resolve over the finished buffer.
    pub fn redraw(&mut self) {
        self.framebuffer.clear(Color::WHITE);

        let Some(scene) = &self.scene else {
            return;
        };

        debug!(
            elements = scene.elements.len(),
            width = self.framebuffer.width(),
            height = self.framebuffer.height(),
            "redraw"
        );

        let screen = Viewport::ndc_to_screen(self.framebuffer.width(), self.framebuffer.height())
            * self.viewport.scene_to_ndc();
        for element in &scene.elements {
            draw_element(&mut self.framebuffer, element, screen);
        }

        let mlaa = MorphAntialias::new(&self.framebuffer);
        mlaa.resolve(&mut self.framebuffer);
    }
}

/// Rasterize one element under an accumulated transform.
///
/// `trans` carries the screen matrix composed with every ancestor group
/// transform; the element's own local transform is composed here, so group
/// transforms flow down the tree and never back up.
fn draw_element(fb: &mut Framebuffer, element: &Element, trans: Mat3) {
    let m = trans * element.transform;
    let style = element.style;

    match &element.shape {
        Shape::Point { position } => {
            let p = m.apply(*position);
            rasterize_point(fb, p.x, p.y, style.stroke_color);
        }
        Shape::Line { from, to } => {
            let p0 = m.apply(*from);
            let p1 = m.apply(*to);
            rasterize_line(fb, p0.x, p0.y, p1.x, p1.y, style.stroke_color);
        }
        Shape::Rect {
            position,
            dimension,
        } => {
            let p0 = m.apply(*position);
            let p1 = m.apply(*position + *dimension);

            let stroke = style.stroke_color;
            if stroke.a != 0.0 {
                rasterize_line(fb, p0.x, p0.y, p1.x, p0.y, stroke);
                rasterize_line(fb, p0.x, p0.y, p0.x, p1.y, stroke);
                rasterize_line(fb, p1.x, p1.y, p1.x, p0.y, stroke);
                rasterize_line(fb, p1.x, p1.y, p0.x, p1.y, stroke);
            }

            let fill = style.fill_color;
            if fill.a != 0.0 {
                rasterize_triangle(fb, p0.x, p0.y, p0.x, p1.y, p1.x, p1.y, fill);
                rasterize_triangle(fb, p0.x, p0.y, p1.x, p0.y, p1.x, p1.y, fill);
            }
        }
        Shape::Polygon { points } => {
            let fill = style.fill_color;
            if fill.a != 0.0 {
                for tri in triangulate(points) {
                    let a = m.apply(tri[0]);
                    let b = m.apply(tri[1]);
                    let c = m.apply(tri[2]);
                    rasterize_triangle(fb, a.x, a.y, b.x, b.y, c.x, c.y, fill);
                }
            }

            let stroke = style.stroke_color;
            if stroke.a != 0.0 {
                for i in 0..points.len() {
                    let p0 = m.apply(points[i]);
                    let p1 = m.apply(points[(i + 1) % points.len()]);
                    rasterize_line(fb, p0.x, p0.y, p1.x, p1.y, stroke);
                }
            }
        }
        Shape::Group { children } => {
            for child in children {
                draw_element(fb, child, m);
            }
        }
        Shape::Image {
            position,
            dimension,
            texture,
        } => {
            let p0 = m.apply(*position);
            let p1 = m.apply(*position + *dimension);
            rasterize_image(fb, p0.x, p0.y, p1.x, p1.y, texture);
        }
    }
}
