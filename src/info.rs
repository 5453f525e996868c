use std::io::{Read, Seek};

use crate::bmp::{BmpCompression, Cursor, FileHeader, InfoHeader};
use crate::error::BmpError;

/// Header-level description of a bitmap, read without touching pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: i32,
    /// Height as stored; negative means rows are stored top-down.
    pub stored_height: i32,
    pub bits_per_pixel: u16,
    pub compression: BmpCompression,
    /// Byte offset of the pixel array from the start of the file.
    pub data_offset: u32,
    supported: bool,
}

impl ImageInfo {
    /// Read the file header and info header from the start of `reader`.
    ///
    /// Fails on bad magic, an info header older than Windows 3, or end of
    /// input inside either header. Format support is reported, not enforced.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, BmpError> {
        let mut bytes = Cursor::new(reader);
        let header = FileHeader::read(&mut bytes)?;
        let info = InfoHeader::read(&mut bytes)?;
        Ok(Self {
            width: info.width,
            stored_height: info.height,
            bits_per_pixel: info.bits,
            compression: info.compression,
            data_offset: header.data_offset,
            supported: info.is_supported() && info.width > 0 && info.height != 0,
        })
    }

    /// Number of scan lines, or `None` for a height of `i32::MIN`.
    pub fn lines(&self) -> Option<u32> {
        self.stored_height.checked_abs().map(i32::unsigned_abs)
    }

    /// Whether rows are stored top line first.
    pub fn is_top_down(&self) -> bool {
        self.stored_height < 0
    }

    /// Whether the bit depth and compression pair is decodable and the
    /// dimensions are nonzero.
    pub fn is_supported(&self) -> bool {
        self.supported
    }
}
