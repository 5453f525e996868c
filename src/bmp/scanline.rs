//! Per-row pixel converters, one per supported bit depth.
//!
//! Each converter reads one file-side row and writes exactly
//! `width * channels` bytes of RGB or RGBA.

use super::bitfield::BitField;
use super::palette::PaletteEntry;

/// Supported bits-per-pixel values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PixelDepth {
    /// 1 bpp, 2-entry palette, most significant bit first.
    Mono,
    /// 4 bpp, 16-entry palette, high nibble first.
    Nibble,
    /// 8 bpp, 256-entry palette.
    Byte,
    /// 16 bpp bit-fields.
    Packed16,
    /// 24 bpp, stored blue-green-red.
    Bgr24,
    /// 32 bpp bit-fields.
    Packed32,
}

impl PixelDepth {
    pub(crate) fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            1 => Some(Self::Mono),
            4 => Some(Self::Nibble),
            8 => Some(Self::Byte),
            16 => Some(Self::Packed16),
            24 => Some(Self::Bgr24),
            32 => Some(Self::Packed32),
            _ => None,
        }
    }

    pub(crate) fn bits(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Nibble => 4,
            Self::Byte => 8,
            Self::Packed16 => 16,
            Self::Bgr24 => 24,
            Self::Packed32 => 32,
        }
    }

    /// Color table length for indexed depths.
    pub(crate) fn palette_len(self) -> Option<usize> {
        match self {
            Self::Mono | Self::Nibble | Self::Byte => Some(1 << self.bits()),
            Self::Packed16 | Self::Bgr24 | Self::Packed32 => None,
        }
    }
}

/// Everything a row converter needs besides the row itself.
pub(crate) struct RowDecoder<'a> {
    pub depth: PixelDepth,
    pub channels: usize,
    pub palette: &'a [PaletteEntry],
    pub fields: &'a [BitField; 4],
}

#[inline]
fn put_entry(px: &mut [u8], entry: PaletteEntry) {
    px[0] = entry.red;
    px[1] = entry.green;
    px[2] = entry.blue;
    if let Some(a) = px.get_mut(3) {
        *a = 255;
    }
}

impl RowDecoder<'_> {
    /// Convert `src` into `out`. `out` must hold exactly the pixel bytes of
    /// one output row (no padding); `src` at least one padded file row.
    pub(crate) fn decode_row(&self, src: &[u8], out: &mut [u8]) {
        let pixels = out.chunks_exact_mut(self.channels);
        match self.depth {
            PixelDepth::Mono => {
                for (x, px) in pixels.enumerate() {
                    let idx = (src[x >> 3] >> (7 - (x & 7))) & 1;
                    put_entry(px, self.palette[usize::from(idx)]);
                }
            }
            PixelDepth::Nibble => {
                // Odd widths stop after the high nibble of the last byte.
                for (x, px) in pixels.enumerate() {
                    let byte = src[x >> 1];
                    let idx = if x & 1 == 0 { byte >> 4 } else { byte & 0x0f };
                    put_entry(px, self.palette[usize::from(idx)]);
                }
            }
            PixelDepth::Byte => {
                for (px, &idx) in pixels.zip(src) {
                    put_entry(px, self.palette[usize::from(idx)]);
                }
            }
            PixelDepth::Bgr24 => {
                for (px, bgr) in pixels.zip(src.chunks_exact(3)) {
                    px[0] = bgr[2];
                    px[1] = bgr[1];
                    px[2] = bgr[0];
                    if let Some(a) = px.get_mut(3) {
                        *a = 255;
                    }
                }
            }
            PixelDepth::Packed16 => {
                for (px, raw) in pixels.zip(src.chunks_exact(2)) {
                    let v = u32::from(u16::from_le_bytes([raw[0], raw[1]]));
                    self.put_packed(px, v);
                }
            }
            PixelDepth::Packed32 => {
                for (px, raw) in pixels.zip(src.chunks_exact(4)) {
                    let v = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
                    self.put_packed(px, v);
                }
            }
        }
    }

    #[inline]
    fn put_packed(&self, px: &mut [u8], v: u32) {
        let [r, g, b, a] = self.fields;
        px[0] = r.extract(v);
        px[1] = g.extract(v);
        px[2] = b.extract(v);
        if let Some(out) = px.get_mut(3) {
            *out = if a.is_absent() { 255 } else { a.extract(v) };
        }
    }
}
