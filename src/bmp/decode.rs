//! Row-by-row decode loop.

use std::io::{Read, Seek};

use super::scanline::RowDecoder;
use super::stream::Cursor;
use super::validate::DecodeContext;
use crate::decode::Image;
use crate::error::BmpError;
use crate::flags::DecodeFlags;

impl<R: Read + Seek> DecodeContext<R> {
    /// Rows are copied in file order exactly when the stored order (negative
    /// height means top-down) matches the requested output order.
    pub(crate) fn keeps_file_order(&self) -> bool {
        (self.info.height < 0) == self.flags.contains(DecodeFlags::TOP_DOWN)
    }

    /// Read every scan line and hand the finished buffer to the caller.
    ///
    /// Rows are appended in file order and swapped end for end afterwards
    /// when the output order differs. The stream, palette and scratch row
    /// are dropped on every path; the output buffer only survives on success.
    pub(crate) fn decode(self) -> Result<Image, BmpError> {
        let keep_order = self.keeps_file_order();
        log::trace!(
            "decoding {}x{} at {} bpp: file row {} bytes, output row {} bytes, {}",
            self.width,
            self.lines,
            self.info.bits,
            self.file_row_len,
            self.out_row_len,
            if keep_order { "file order" } else { "reversed" }
        );

        let DecodeContext {
            mut bytes,
            header,
            depth,
            layout,
            width,
            lines,
            out_row_len,
            pixel_row_len,
            fields,
            palette,
            mut scratch,
            mut pixels,
            ..
        } = self;

        bytes.set_position(header.data_offset)?;

        let decoder = RowDecoder {
            depth,
            channels: layout.channels(),
            palette: &palette,
            fields: &fields,
        };
        let mut rows = RowSink {
            bytes: &mut bytes,
            scratch: &mut scratch,
            decoder: &decoder,
            out_row_len,
            pixel_row_len,
            lines,
        };
        rows.fill(&mut pixels)?;
        if !keep_order {
            reverse_rows(&mut pixels, out_row_len);
        }

        Ok(Image::new(pixels, width, lines, layout, out_row_len))
    }
}

struct RowSink<'a, R> {
    bytes: &'a mut Cursor<R>,
    scratch: &'a mut [u8],
    decoder: &'a RowDecoder<'a>,
    out_row_len: usize,
    pixel_row_len: usize,
    lines: u32,
}

impl<R: Read + Seek> RowSink<'_, R> {
    /// Append one output row per file row, in file order. `pixels` only
    /// grows into its reserved capacity as rows actually arrive.
    fn fill(&mut self, pixels: &mut Vec<u8>) -> Result<(), BmpError> {
        let mut rows_read = 0u32;
        while rows_read < self.lines {
            match self.bytes.read_exact_bytes(&mut *self.scratch) {
                Ok(()) => {}
                Err(BmpError::UnexpectedEof) => {
                    log::debug!("pixel data ends after {rows_read} of {} rows", self.lines);
                    return Err(BmpError::Truncated {
                        rows_read,
                        rows_expected: self.lines,
                    });
                }
                Err(e) => return Err(e),
            }
            let start = pixels.len();
            // Padding stays zero.
            pixels.resize(start + self.out_row_len, 0);
            self.decoder
                .decode_row(&*self.scratch, &mut pixels[start..start + self.pixel_row_len]);
            rows_read += 1;
        }
        Ok(())
    }
}

/// Swap rows end for end in place.
fn reverse_rows(pixels: &mut [u8], row_len: usize) {
    let lines = pixels.len() / row_len;
    for top in 0..lines / 2 {
        let bottom = lines - 1 - top;
        let (head, tail) = pixels.split_at_mut(bottom * row_len);
        head[top * row_len..(top + 1) * row_len].swap_with_slice(&mut tail[..row_len]);
    }
}
