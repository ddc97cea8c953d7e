//! PNG frame dump.
//!
//! The crate's observable output surface: a finished framebuffer encodes
//! straight to PNG via the pure-Rust `png` crate, so frames can be inspected
//! on disk without any windowing collaborator. The buffer layout already
//! matches what the encoder wants (packed RGBA8, row-major, no stride
//! padding), so the pixel slice is handed over as-is.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// PNG encoder for framebuffer output.
pub struct PngEncoder;

impl PngEncoder {
    /// Write a framebuffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);

        let mut encoder = png::Encoder::new(writer, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(fb.pixels())?;

        Ok(())
    }

    /// Encode a framebuffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();

        {
            let mut encoder = png::Encoder::new(&mut buffer, fb.width(), fb.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header()?;
            writer.write_image_data(fb.pixels())?;
        }

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::render::SoftwareRenderer;
    use crate::scene::{Element, Scene, Shape};

    #[test]
    fn test_rendered_frame_encodes_and_decodes() {
        let mut scene = Scene::new(10.0, 10.0);
        scene.elements.push(Element::new(Shape::Line {
            from: Vec2::new(1.0, 5.0),
            to: Vec2::new(9.0, 5.0),
        }));

        let mut renderer = SoftwareRenderer::new(24, 16).unwrap();
        renderer.set_scene(scene);

        let bytes = PngEncoder::to_bytes(renderer.framebuffer()).unwrap();
        assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

        // the header must carry the framebuffer geometry, not a default
        let decoder = png::Decoder::new(&bytes[..]);
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!(info.width, 24);
        assert_eq!(info.height, 16);
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(info.bit_depth, png::BitDepth::Eight);
    }
}
