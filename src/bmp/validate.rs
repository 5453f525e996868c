//! Header validation and decode-context construction.
//!
//! Everything that can be rejected is rejected here, before any pixel data
//! is read. The resulting [`DecodeContext`] owns the stream, the color table,
//! the row scratch buffer and the (still empty) output buffer.

use std::io::{Read, Seek};

use super::bitfield::{BitField, build_fields};
use super::header::{BmpCompression, FILE_HEADER_SIZE, FileHeader, InfoHeader};
use super::palette::{PaletteEntry, read_palette};
use super::safe::{can_negate, is_power_of_two, multiply, padded_row_len, widen};
use super::scanline::PixelDepth;
use super::stream::Cursor;
use crate::error::BmpError;
use crate::flags::DecodeFlags;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

pub(crate) struct DecodeContext<R> {
    pub flags: DecodeFlags,
    pub bytes: Cursor<R>,
    pub header: FileHeader,
    pub info: InfoHeader,
    pub depth: PixelDepth,
    pub layout: PixelLayout,
    pub width: u32,
    /// `|height|`
    pub lines: u32,
    /// Padded length of one row in the file.
    pub file_row_len: usize,
    /// Length of one output row, padding included.
    pub out_row_len: usize,
    /// Pixel bytes of one output row, padding excluded.
    pub pixel_row_len: usize,
    pub fields: [BitField; 4],
    pub palette: Vec<PaletteEntry>,
    pub scratch: Vec<u8>,
    /// Empty, with capacity for every output row.
    pub pixels: Vec<u8>,
}

/// Reserve `bytes` without touching them, reporting allocator failure as an
/// error. Pages are only committed as rows are written.
pub(crate) fn reserve(bytes: usize) -> Result<Vec<u8>, BmpError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes)
        .map_err(|_| BmpError::AllocFailed { bytes })?;
    Ok(buf)
}

/// Fail with [`BmpError::Truncated`] when the stream cannot hold `lines`
/// rows of `file_row_len` bytes starting at `data_offset`.
fn check_pixel_data_len<R: Read + Seek>(
    bytes: &mut Cursor<R>,
    data_offset: u32,
    file_row_len: usize,
    lines: u32,
) -> Result<(), BmpError> {
    let available = bytes
        .stream_len()?
        .saturating_sub(u64::from(data_offset));
    let row = u64::try_from(file_row_len).unwrap_or(u64::MAX);
    let rows_present = available / row;
    if rows_present < u64::from(lines) {
        log::debug!("pixel data holds {rows_present} of {lines} rows ({available} bytes)");
        return Err(BmpError::Truncated {
            // Below `lines`, so it fits.
            rows_read: rows_present as u32,
            rows_expected: lines,
        });
    }
    Ok(())
}

fn unsupported(msg: String) -> BmpError {
    log::debug!("rejecting bitmap: {msg}");
    BmpError::UnsupportedVariant(msg)
}

/// Parse and check both headers, then load the palette or bit-fields and
/// allocate the working buffers.
pub(crate) fn validate<R: Read + Seek>(
    reader: R,
    flags: DecodeFlags,
    limits: Option<&Limits>,
) -> Result<DecodeContext<R>, BmpError> {
    let mut bytes = Cursor::new(reader);
    let header = FileHeader::read(&mut bytes)?;
    let info = InfoHeader::read(&mut bytes)?;

    if info.width <= 0 {
        log::debug!("rejecting width {}", info.width);
        return Err(BmpError::InvalidHeader(format!(
            "width {} is not positive",
            info.width
        )));
    }
    if info.height == 0 {
        log::debug!("rejecting zero height");
        return Err(BmpError::InvalidHeader("height is zero".into()));
    }
    if !info.is_supported() {
        return Err(unsupported(format!(
            "{} bits per pixel with {:?} compression",
            info.bits, info.compression
        )));
    }
    let depth = PixelDepth::from_bits(info.bits)
        .ok_or_else(|| unsupported(format!("{} bits per pixel", info.bits)))?;

    let width = info.width.unsigned_abs();
    let width_px = widen(width, "width")?;
    let file_row_len = padded_row_len(width_px, depth.bits())?;

    let layout = PixelLayout::for_alpha(flags.contains(DecodeFlags::ALPHA));
    let channels = layout.channels();
    let pixel_row_len = multiply(width_px, channels, "output row length")?;
    let out_row_len = if flags.contains(DecodeFlags::BYTE_ALIGN) {
        pixel_row_len
    } else {
        padded_row_len(width_px, channels * 8)?
    };

    if !can_negate(info.height) {
        log::debug!("rejecting height {}", info.height);
        return Err(BmpError::Overflow("line count"));
    }
    let lines = info.height.unsigned_abs();

    if !flags.contains(DecodeFlags::ANY_SIZE)
        && !(is_power_of_two(i64::from(width)) && is_power_of_two(i64::from(lines)))
    {
        return Err(unsupported(format!(
            "{width}x{lines} is not a power-of-two size"
        )));
    }

    if let Some(limits) = limits {
        limits.check_dimensions(width, lines)?;
    }

    let palette = match depth.palette_len() {
        Some(colors) => {
            // The color table follows whatever the declared info size covers.
            let offset = FILE_HEADER_SIZE
                .checked_add(info.info_size)
                .ok_or(BmpError::Overflow("palette offset"))?;
            bytes.set_position(offset)?;
            read_palette(&mut bytes, colors)?
        }
        None => Vec::new(),
    };

    let fields = if info.compression == BmpCompression::Bitfields {
        build_fields(info.masks, info.bits).inspect_err(|e| log::debug!("{e}"))?
    } else {
        [BitField::default(); 4]
    };

    let output_len = multiply(out_row_len, widen(lines, "line count")?, "output buffer size")?;
    if let Some(limits) = limits {
        limits.check_allocation("row buffer", file_row_len)?;
        limits.check_allocation("output buffer", output_len)?;
    }
    let pixels = reserve(output_len)?;
    let mut scratch = reserve(file_row_len)?;

    // A short file is refused before any buffer memory is written.
    check_pixel_data_len(&mut bytes, header.data_offset, file_row_len, lines)?;
    scratch.resize(file_row_len, 0);

    Ok(DecodeContext {
        flags,
        bytes,
        header,
        info,
        depth,
        layout,
        width,
        lines,
        file_row_len,
        out_row_len,
        pixel_row_len,
        fields,
        palette,
        scratch,
        pixels,
    })
}
