//! BMP decoding internals.
//!
//! Use the top-level [`crate::decode`], [`crate::decode_reader`] or
//! [`crate::DecodeRequest`].

mod bitfield;
mod decode;
mod header;
mod palette;
mod safe;
mod scanline;
mod stream;
mod validate;

use std::io::{Read, Seek};

use crate::decode::Image;
use crate::error::BmpError;
use crate::flags::DecodeFlags;
use crate::limits::Limits;

pub use header::BmpCompression;
pub(crate) use header::{FileHeader, InfoHeader};
pub(crate) use stream::Cursor;

/// Validate the headers of `reader`, then decode its pixel data.
pub(crate) fn decode<R: Read + Seek>(
    reader: R,
    flags: DecodeFlags,
    limits: Option<&Limits>,
) -> Result<Image, BmpError> {
    validate::validate(reader, flags, limits)?.decode()
}
