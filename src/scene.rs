//! Scene graph consumed by the renderer.
//!
//! A scene is a single-owner tree: every [`Element`] carries a local affine
//! transform and a [`Style`], plus one [`Shape`] variant. Groups own an
//! ordered sequence of children; transforms compose multiplicatively down
//! the tree (parent then child) and never flow back upward, so there is no
//! cycle risk.
//!
//! The crate consumes this tree read-only; building it (SVG parsing, image
//! decoding) is the job of an external collaborator.

use crate::color::Color;
use crate::math::{Mat3, Vec2};
use crate::texture::Texture;

/// Fill and stroke styling shared by every element kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Interior fill color. A zero alpha suppresses filling.
    pub fill_color: Color,
    /// Outline color. A zero alpha suppresses stroking.
    pub stroke_color: Color,
    /// Outline width in scene units.
    pub stroke_width: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill_color: Color::TRANSPARENT,
            stroke_color: Color::BLACK,
            stroke_width: 1.0,
        }
    }
}

/// The geometry carried by one scene element.
#[derive(Debug, Clone)]
pub enum Shape {
    /// A single point.
    Point {
        /// Position in scene units.
        position: Vec2,
    },
    /// A line segment.
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
    },
    /// An axis-aligned rectangle.
    Rect {
        /// Top-left corner.
        position: Vec2,
        /// Width and height.
        dimension: Vec2,
    },
    /// A closed polygon.
    Polygon {
        /// Vertices in order.
        points: Vec<Vec2>,
    },
    /// A nested group of child elements.
    Group {
        /// Children rendered in order under the group's transform.
        children: Vec<Element>,
    },
    /// A raster image stretched over a rectangle.
    Image {
        /// Top-left corner.
        position: Vec2,
        /// Width and height.
        dimension: Vec2,
        /// Mipmapped source image.
        texture: Texture,
    },
}

/// One node of the scene tree.
#[derive(Debug, Clone)]
pub struct Element {
    /// Local transform, composed under the parent's.
    pub transform: Mat3,
    /// Fill/stroke styling.
    pub style: Style,
    /// The geometry variant.
    pub shape: Shape,
}

impl Element {
    /// Create an element with the identity transform and default style.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            transform: Mat3::identity(),
            style: Style::default(),
            shape,
        }
    }

    /// Replace the style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Replace the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Mat3) -> Self {
        self.transform = transform;
        self
    }
}

/// A complete scene: overall extent in scene units plus the element roots.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Scene width in scene units.
    pub width: f32,
    /// Scene height in scene units.
    pub height: f32,
    /// Root elements, rendered in order.
    pub elements: Vec<Element>,
}

impl Scene {
    /// Create an empty scene with the given extent.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }
}
