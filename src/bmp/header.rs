//! File header and DIB info header parsing.

use std::io::{Read, Seek};

use super::stream::Cursor;
use crate::error::BmpError;

/// Size of the fixed file header.
pub(crate) const FILE_HEADER_SIZE: u32 = 14;

/// Smallest supported info header (BITMAPINFOHEADER, Windows 3 / NT).
pub(crate) const MIN_INFO_SIZE: u32 = 40;

// ── Compression ─────────────────────────────────────────────────────

/// Compression codes found in the info header.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum BmpCompression {
    Rgb,
    Rle8,
    Rle4,
    Bitfields,
    Other(u32),
}

impl BmpCompression {
    pub(crate) fn from_u32(num: u32) -> Self {
        match num {
            0 => Self::Rgb,
            1 => Self::Rle8,
            2 => Self::Rle4,
            3 => Self::Bitfields,
            other => Self::Other(other),
        }
    }
}

// ── File header ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub(crate) struct FileHeader {
    #[allow(dead_code)]
    pub file_size: u32,
    #[allow(dead_code)]
    pub reserved: u32,
    pub data_offset: u32,
}

impl FileHeader {
    /// Read the 14-byte file header, rejecting anything not starting `BM`.
    pub(crate) fn read<R: Read + Seek>(bytes: &mut Cursor<R>) -> Result<Self, BmpError> {
        let magic = bytes.read_fixed_bytes::<2>()?;
        if &magic != b"BM" {
            log::debug!("rejecting stream with magic {magic:02x?}");
            return Err(BmpError::UnrecognizedFormat);
        }
        Ok(Self {
            file_size: bytes.get_u32_le()?,
            reserved: bytes.get_u32_le()?,
            data_offset: bytes.get_u32_le()?,
        })
    }
}

// ── Info header ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub(crate) struct InfoHeader {
    pub info_size: u32,
    pub width: i32,
    /// Negative means rows are stored top-down.
    pub height: i32,
    pub bits: u16,
    pub compression: BmpCompression,
    /// Red, green, blue, alpha masks. Zero when not present in the file.
    pub masks: [u32; 4],
}

impl InfoHeader {
    /// Read the DIB info header that immediately follows the file header.
    ///
    /// The size field is checked before anything else is read, since
    /// pre-Windows 3 layouts do not have the later fields.
    pub(crate) fn read<R: Read + Seek>(bytes: &mut Cursor<R>) -> Result<Self, BmpError> {
        let info_size = bytes.get_u32_le()?;
        if info_size < MIN_INFO_SIZE {
            log::debug!("rejecting info header of {info_size} bytes");
            return Err(BmpError::InvalidHeader(format!(
                "info header size {info_size} is below the {MIN_INFO_SIZE}-byte minimum"
            )));
        }

        let width = bytes.get_i32_le()?;
        let height = bytes.get_i32_le()?;
        // Plane count is always 1 and carries no layout information.
        bytes.get_u16_le()?;
        let bits = bytes.get_u16_le()?;
        let compression = BmpCompression::from_u32(bytes.get_u32_le()?);

        // Image size, resolution x/y, colors used, colors important.
        for _ in 0..5 {
            bytes.get_u32_le()?;
        }

        let mut masks = [0u32; 4];
        if compression == BmpCompression::Bitfields {
            masks[0] = bytes.get_u32_le()?;
            masks[1] = bytes.get_u32_le()?;
            masks[2] = bytes.get_u32_le()?;
            // Windows 3 / NT headers never carry an alpha mask.
            if info_size > MIN_INFO_SIZE {
                masks[3] = bytes.get_u32_le()?;
            }
        }

        Ok(Self {
            info_size,
            width,
            height,
            bits,
            compression,
            masks,
        })
    }

    /// Whether the (bits, compression) pair is one this decoder handles.
    pub(crate) fn is_supported(&self) -> bool {
        matches!(
            (self.compression, self.bits),
            (BmpCompression::Rgb, 1 | 4 | 8 | 24) | (BmpCompression::Bitfields, 16 | 32)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_bytes(info_size: u32, bits: u16, compression: u32) -> Vec<u8> {
        let mut v = Vec::new();
        v.extend_from_slice(&info_size.to_le_bytes());
        v.extend_from_slice(&4i32.to_le_bytes());
        v.extend_from_slice(&(-2i32).to_le_bytes());
        v.extend_from_slice(&1u16.to_le_bytes());
        v.extend_from_slice(&bits.to_le_bytes());
        v.extend_from_slice(&compression.to_le_bytes());
        v.extend_from_slice(&[0u8; 20]);
        v
    }

    #[test]
    fn file_header_requires_bm() {
        let mut data = b"BA".to_vec();
        data.extend_from_slice(&[0u8; 12]);
        let mut c = Cursor::new(std::io::Cursor::new(data));
        assert!(matches!(
            FileHeader::read(&mut c),
            Err(BmpError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn file_header_fields() {
        let mut data = b"BM".to_vec();
        data.extend_from_slice(&70u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&54u32.to_le_bytes());
        let mut c = Cursor::new(std::io::Cursor::new(data));
        let h = FileHeader::read(&mut c).unwrap();
        assert_eq!(h.file_size, 70);
        assert_eq!(h.data_offset, 54);
    }

    #[test]
    fn old_info_header_rejected_before_reading_fields() {
        // A 12-byte OS/2 core header would otherwise run out of data here.
        let data = 12u32.to_le_bytes();
        let mut c = Cursor::new(std::io::Cursor::new(&data[..]));
        assert!(matches!(
            InfoHeader::read(&mut c),
            Err(BmpError::InvalidHeader(_))
        ));
    }

    #[test]
    fn info_header_plain() {
        let data = info_bytes(40, 24, 0);
        let mut c = Cursor::new(std::io::Cursor::new(data));
        let info = InfoHeader::read(&mut c).unwrap();
        assert_eq!(info.width, 4);
        assert_eq!(info.height, -2);
        assert_eq!(info.bits, 24);
        assert_eq!(info.compression, BmpCompression::Rgb);
        assert_eq!(info.masks, [0; 4]);
        assert!(info.is_supported());
    }

    #[test]
    fn three_masks_for_windows3_header() {
        let mut data = info_bytes(40, 16, 3);
        for m in [0xf800u32, 0x07e0, 0x001f, 0xdead_beef] {
            data.extend_from_slice(&m.to_le_bytes());
        }
        let mut c = Cursor::new(std::io::Cursor::new(data));
        let info = InfoHeader::read(&mut c).unwrap();
        assert_eq!(info.masks, [0xf800, 0x07e0, 0x001f, 0]);
    }

    #[test]
    fn four_masks_for_larger_header() {
        let mut data = info_bytes(56, 32, 3);
        for m in [0x00ff_0000u32, 0xff00, 0xff, 0xff00_0000] {
            data.extend_from_slice(&m.to_le_bytes());
        }
        let mut c = Cursor::new(std::io::Cursor::new(data));
        let info = InfoHeader::read(&mut c).unwrap();
        assert_eq!(info.masks, [0x00ff_0000, 0xff00, 0xff, 0xff00_0000]);
    }

    #[test]
    fn missing_mask_is_eof() {
        let mut data = info_bytes(40, 16, 3);
        data.extend_from_slice(&0xf800u32.to_le_bytes());
        let mut c = Cursor::new(std::io::Cursor::new(data));
        assert!(matches!(
            InfoHeader::read(&mut c),
            Err(BmpError::UnexpectedEof)
        ));
    }

    #[test]
    fn format_matrix() {
        let mut info = InfoHeader::read(&mut Cursor::new(std::io::Cursor::new(info_bytes(
            40, 8, 0,
        ))))
        .unwrap();
        for (compression, bits, ok) in [
            (BmpCompression::Rgb, 1, true),
            (BmpCompression::Rgb, 4, true),
            (BmpCompression::Rgb, 8, true),
            (BmpCompression::Rgb, 24, true),
            (BmpCompression::Rgb, 16, false),
            (BmpCompression::Rgb, 32, false),
            (BmpCompression::Rgb, 2, false),
            (BmpCompression::Bitfields, 16, true),
            (BmpCompression::Bitfields, 32, true),
            (BmpCompression::Bitfields, 24, false),
            (BmpCompression::Rle8, 8, false),
            (BmpCompression::Rle4, 4, false),
            (BmpCompression::Other(6), 32, false),
        ] {
            info.compression = compression;
            info.bits = bits;
            assert_eq!(info.is_supported(), ok, "{compression:?} x {bits}");
        }
    }
}
