//! Error types for trazar operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trazar operations.
///
/// The rasterization core itself never fails: out-of-range geometry is
/// dropped and degenerate samples fall back to opaque white. These variants
/// cover the constructor and encoder boundaries only.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a framebuffer or texture.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Texel buffer length does not match the declared texture dimensions.
    #[error("Texture data length mismatch: expected {expected} bytes, got {actual}")]
    TextureDataLength {
        /// Expected byte length (`4 * width * height`).
        expected: usize,
        /// Actual byte length supplied.
        actual: usize,
    },
}
