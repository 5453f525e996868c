//! # bmpread
//!
//! Loads Windows BMP files into contiguous RGB or RGBA byte buffers, laid out
//! the way graphics APIs expect texture data.
//!
//! ## Supported Formats
//!
//! - 1, 4 and 8 bits per pixel with a color table
//! - 24 bits per pixel, uncompressed
//! - 16 and 32 bits per pixel with channel bit masks (`BI_BITFIELDS`)
//!
//! Info headers must be at least the 40-byte Windows 3 layout.
//!
//! ## Non-Goals
//!
//! - RLE-compressed bitmaps (rejected, never approximated)
//! - OS/2 1.x core headers
//! - Encoding
//!
//! ## Hardening
//!
//! Every size computed from header fields is overflow-checked, every read
//! can fail on end of input, and buffers are allocated fallibly. Malformed
//! input produces a [`BmpError`], never a panic or a partially filled image.
//!
//! ## Usage
//!
//! ```no_run
//! use bmpread::{DecodeFlags, decode};
//!
//! // Default: bottom-up rows, 4-byte aligned, power-of-two sizes, RGB.
//! let texture = decode("brick.bmp", DecodeFlags::empty())?;
//! assert_eq!(texture.pixels().len(), texture.stride * texture.height as usize);
//!
//! // Top-down, tightly packed RGBA of any size.
//! let sprite = decode(
//!     "sprite.bmp",
//!     DecodeFlags::TOP_DOWN | DecodeFlags::BYTE_ALIGN | DecodeFlags::ANY_SIZE | DecodeFlags::ALPHA,
//! )?;
//! assert_eq!(sprite.pixels().len(), sprite.width as usize * sprite.height as usize * 4);
//! # Ok::<(), bmpread::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod bmp;
mod decode;
mod error;
mod flags;
mod info;
mod limits;
mod pixel;

use std::io::{Read, Seek};
use std::path::Path;

// Re-exports
pub use bmp::BmpCompression;
pub use decode::{DecodeRequest, Image};
pub use error::BmpError;
pub use flags::DecodeFlags;
pub use info::ImageInfo;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;

/// Open and decode the bitmap at `path`.
pub fn decode(path: impl AsRef<Path>, flags: DecodeFlags) -> Result<Image, BmpError> {
    DecodeRequest::new(flags).decode_path(path)
}

/// Decode a bitmap from a readable, seekable stream positioned at its start.
pub fn decode_reader<R: Read + Seek>(reader: R, flags: DecodeFlags) -> Result<Image, BmpError> {
    DecodeRequest::new(flags).decode(reader)
}
