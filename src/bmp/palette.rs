use std::io::{Read, Seek};

use super::stream::Cursor;
use crate::error::BmpError;

/// One color table entry, in file (BGR) order.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub(crate) struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    #[allow(dead_code)]
    pub unused: u8,
}

/// Read `colors` consecutive 4-byte entries from the current position.
///
/// Entries stay in file order so they are addressed by the raw index values
/// in the pixel data.
pub(crate) fn read_palette<R: Read + Seek>(
    bytes: &mut Cursor<R>,
    colors: usize,
) -> Result<Vec<PaletteEntry>, BmpError> {
    let mut palette = Vec::new();
    palette
        .try_reserve_exact(colors)
        .map_err(|_| BmpError::AllocFailed {
            bytes: colors * core::mem::size_of::<PaletteEntry>(),
        })?;

    for _ in 0..colors {
        let [blue, green, red, unused] = bytes.read_fixed_bytes::<4>()?;
        palette.push(PaletteEntry {
            blue,
            green,
            red,
            unused,
        });
    }
    Ok(palette)
}
