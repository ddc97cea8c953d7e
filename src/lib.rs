//! # Trazar
//!
//! Software rasterization of SVG-derived scene graphs, with no hardware
//! rendering of any kind.
//!
//! Trazar renders vector scenes (points, lines, rectangles, polygons, nested
//! groups, raster images) into a packed RGBA8 framebuffer, removes jagged
//! edges with a morphological antialiasing post-process, and composites image
//! content through a mipmapped texture sampler. Scene parsing, windowing, and
//! event handling are external collaborators; this crate is the rasterization
//! core.
//!
//! ## Features
//!
//! - **Pure Rust**: every pixel is produced on the CPU, byte by byte
//! - **Scan conversion**: Bresenham lines, Wu antialiased lines, block-accelerated
//!   triangle fill
//! - **Morphological antialiasing**: edge-span detection plus coverage-ramp
//!   resolve over the finished frame
//! - **Mipmapped sampling**: nearest, bilinear, and trilinear filtering over a
//!   trapezoidal-filtered mip pyramid
//! - **PNG output**: rendered frames encode to PNG with no display dependency
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trazar::prelude::*;
//!
//! let mut scene = Scene::new(100.0, 100.0);
//! scene.elements.push(Element::new(Shape::Line {
//!     from: Vec2::new(10.0, 10.0),
//!     to: Vec2::new(90.0, 90.0),
//! }));
//!
//! let mut renderer = SoftwareRenderer::new(512, 512)?;
//! renderer.set_scene(scene);
//! PngEncoder::write_to_file(renderer.framebuffer(), "frame.png")?;
//! ```
//!
//! ## Academic References
//!
//! This library implements algorithms from peer-reviewed research:
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital
//!   plotter." IBM Systems Journal.
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Reshetov, A. (2009). "Morphological Antialiasing." HPG '09.
//! - Williams, L. (1983). "Pyramidal Parametrics." SIGGRAPH '83.

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color type and blending arithmetic.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Vector and matrix algebra for the transform pipeline.
pub mod math;

/// Scene graph consumed by the renderer.
pub mod scene;

/// Mipmapped textures and samplers.
pub mod texture;

/// Viewport state and scene-to-screen transforms.
pub mod viewport;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rendering pipeline: scan converter, antialiaser, orchestrator.
pub mod render;

/// Output encoders.
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trazar operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust,ignore
/// use trazar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::math::{Mat3, Vec2, Vec3};
    pub use crate::output::PngEncoder;
    pub use crate::render::SoftwareRenderer;
    pub use crate::scene::{Element, Scene, Shape, Style};
    pub use crate::texture::{Sampler2D, Texture};
    pub use crate::viewport::Viewport;
}

// ============================================================================
// Tests
// ============================================================================
