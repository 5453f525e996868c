//! Channel bit-field analysis for 16- and 32-bit packed pixels.

use crate::error::BmpError;

/// Where one channel lives inside a pixel word and how to widen it to 8 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct BitField {
    pub shift: u32,
    pub count: u32,
    pub mask: u32,
    /// `255 / (2^count - 1)`, or 0 for an absent channel.
    pub multiplier: f64,
}

impl BitField {
    /// Build a field from a raw mask.
    ///
    /// A zero mask is an absent channel. Any other mask must be one run of
    /// contiguous set bits no longer than 31.
    pub(crate) fn from_mask(mask: u32) -> Result<Self, BmpError> {
        let mut shift = 0;
        let mut count = 0;
        for bit in 0..32 {
            if mask & (1 << bit) == 0 {
                continue;
            }
            if count == 0 {
                shift = bit;
            } else if bit != shift + count {
                return Err(BmpError::InvalidBitfields(format!(
                    "mask {mask:#010x} is not contiguous"
                )));
            }
            count += 1;
        }

        if count == 0 {
            return Ok(Self::default());
        }
        if count > 31 {
            return Err(BmpError::InvalidBitfields(format!(
                "mask {mask:#010x} is wider than 31 bits"
            )));
        }

        Ok(Self {
            shift,
            count,
            mask,
            multiplier: 255.0 / ((1u64 << count) - 1) as f64,
        })
    }

    pub(crate) fn is_absent(&self) -> bool {
        self.mask == 0
    }

    /// Extract this channel from `value` and scale it to 0..=255.
    #[inline]
    pub(crate) fn extract(&self, value: u32) -> u8 {
        let raw = (value & self.mask) >> self.shift;
        // `as` saturates, so rounding error can never wrap past 255.
        (f64::from(raw) * self.multiplier).round() as u8
    }
}

/// Build all four channel fields (R, G, B, A), rejecting overlapping masks
/// and masks with bits above the pixel width.
pub(crate) fn build_fields(masks: [u32; 4], bits: u16) -> Result<[BitField; 4], BmpError> {
    let mut fields = [BitField::default(); 4];
    let mut seen = 0u32;

    for (field, mask) in fields.iter_mut().zip(masks) {
        if seen & mask != 0 {
            return Err(BmpError::InvalidBitfields(format!(
                "mask {mask:#010x} overlaps another channel"
            )));
        }
        seen |= mask;
        // Disjoint masks inside the pixel can never claim more bits than it
        // has. A 16-bit pixel is zero-extended, so higher bits never match.
        if bits < 32 && mask >> bits != 0 {
            return Err(BmpError::InvalidBitfields(format!(
                "mask {mask:#010x} reaches past a {bits}-bit pixel"
            )));
        }

        *field = BitField::from_mask(mask)?;
    }

    Ok(fields)
}
