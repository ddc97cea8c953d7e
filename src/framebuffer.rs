//! Core framebuffer for pixel rendering.
//!
//! A packed RGBA8 byte buffer of exactly `4 * width * height` bytes,
//! row-major with the origin at the top-left (screen/SVG convention: Y grows
//! downward). Resizing is destructive: the buffer is reallocated and cleared
//! to opaque white.

use crate::color::Color;
use crate::error::{Error, Result};

/// Packed RGBA8 pixel buffer.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGBA pixels in row-major order, 4 bytes per pixel.
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Create a new framebuffer cleared to opaque white.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let size = 4 * (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            pixels: vec![255; size],
        })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Get the raw pixel data as a slice.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get the raw pixel data as a mutable slice.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Destructively resize the buffer, discarding any partial frame and
    /// clearing to opaque white. The buffer length is resynchronized to
    /// exactly `4 * width * height`.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        *self = Self::new(width, height)?;
        Ok(())
    }

    /// Clear every pixel to a solid color.
    pub fn clear(&mut self, color: Color) {
        let texel = color.to_rgba8();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&texel);
        }
    }

    /// Get the packed channels at a pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y);
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    /// Overwrite the packed channels at a pixel coordinate.
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, texel: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&texel);
    }

    /// Blend a color onto a pixel with the Porter-Duff "over" operator,
    /// computed and stored in 8-bit space:
    ///
    /// `out_rgb = src_rgb * src_a + dst_rgb * (1 - src_a)`
    /// `out_a   = 1 - (1 - dst_a) * (1 - src_a)`
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        let sa = color.a;
        let da = f32::from(self.pixels[idx + 3]) / 255.0;

        self.pixels[idx] =
            (color.r * 255.0 * sa + (1.0 - sa) * f32::from(self.pixels[idx])).round() as u8;
        self.pixels[idx + 1] =
            (color.g * 255.0 * sa + (1.0 - sa) * f32::from(self.pixels[idx + 1])).round() as u8;
        self.pixels[idx + 2] =
            (color.b * 255.0 * sa + (1.0 - sa) * f32::from(self.pixels[idx + 2])).round() as u8;
        self.pixels[idx + 3] = ((1.0 - (1.0 - da) * (1.0 - sa)) * 255.0).round() as u8;
    }

    /// Calculate the byte index for a pixel coordinate.
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        4 * ((y as usize) * (self.width as usize) + (x as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_framebuffer() {
        let fb = Framebuffer::new(100, 50).unwrap();
        assert_eq!(fb.width(), 100);
        assert_eq!(fb.height(), 50);
        assert_eq!(fb.pixel_count(), 5000);
        assert_eq!(fb.pixels().len(), 4 * 5000);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Framebuffer::new(0, 100).is_err());
        assert!(Framebuffer::new(100, 0).is_err());
        assert!(Framebuffer::new(0, 0).is_err());
    }

    #[test]
    fn test_new_is_white() {
        let fb = Framebuffer::new(4, 4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(fb.get_pixel(x, y), Some([255, 255, 255, 255]));
            }
        }
    }

    #[test]
    fn test_resize_discards_content() {
        let mut fb = Framebuffer::new(8, 8).unwrap();
        fb.set_pixel(2, 2, [0, 0, 0, 255]);
        fb.resize(16, 4).unwrap();
        assert_eq!(fb.width(), 16);
        assert_eq!(fb.height(), 4);
        assert_eq!(fb.pixels().len(), 4 * 16 * 4);
        assert_eq!(fb.get_pixel(2, 2), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_clear() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Color::RED);
        assert_eq!(fb.get_pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(fb.get_pixel(9, 9), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_set_get_pixel() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.set_pixel(5, 5, [0, 0, 255, 255]);
        assert_eq!(fb.get_pixel(5, 5), Some([0, 0, 255, 255]));
        assert_eq!(fb.get_pixel(100, 100), None);
    }

    #[test]
    fn test_blend_opaque_replaces() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.blend_pixel(1, 1, Color::from_rgba8([10, 20, 30, 255]));
        assert_eq!(fb.get_pixel(1, 1), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_blend_transparent_is_noop() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.set_pixel(1, 1, [10, 20, 30, 200]);
        fb.blend_pixel(1, 1, Color::RED.with_alpha(0.0));
        assert_eq!(fb.get_pixel(1, 1), Some([10, 20, 30, 200]));
    }

    #[test]
    fn test_blend_half_alpha() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        // black at 50% over white: channels land halfway
        fb.blend_pixel(0, 0, Color::BLACK.with_alpha(0.5));
        let px = fb.get_pixel(0, 0).unwrap();
        assert_eq!(px[0], 128);
        assert_eq!(px[1], 128);
        assert_eq!(px[2], 128);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_blend_out_of_bounds_ignored() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.blend_pixel(4, 0, Color::BLACK);
        fb.blend_pixel(0, 4, Color::BLACK);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(fb.get_pixel(x, y), Some([255, 255, 255, 255]));
            }
        }
    }
}
