//! In-memory BMP file synthesis for tests.

#![allow(dead_code)]

use std::io::Cursor;

/// Describes a bitmap file to synthesize. Rows are given in file order,
/// unpadded; padding to 4 bytes is added by [`BmpFixture::build`].
#[derive(Clone, Debug)]
pub struct BmpFixture {
    pub width: i32,
    pub height: i32,
    pub bits: u16,
    pub compression: u32,
    pub info_size: u32,
    pub masks: Vec<u32>,
    /// `[blue, green, red, unused]` entries.
    pub palette: Vec<[u8; 4]>,
    pub rows: Vec<Vec<u8>>,
    /// Filler bytes between the color table and the pixel array.
    pub gap: usize,
    /// Bytes chopped off the end of the finished file.
    pub truncate: usize,
}

impl BmpFixture {
    pub fn new(width: i32, height: i32, bits: u16) -> Self {
        Self {
            width,
            height,
            bits,
            compression: 0,
            info_size: 40,
            masks: Vec::new(),
            palette: Vec::new(),
            rows: Vec::new(),
            gap: 0,
            truncate: 0,
        }
    }

    pub fn bitfields(mut self, masks: &[u32]) -> Self {
        self.compression = 3;
        self.masks = masks.to_vec();
        self
    }

    pub fn palette(mut self, palette: Vec<[u8; 4]>) -> Self {
        self.palette = palette;
        self
    }

    pub fn rows(mut self, rows: Vec<Vec<u8>>) -> Self {
        self.rows = rows;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut info = Vec::new();
        info.extend_from_slice(&self.info_size.to_le_bytes());
        info.extend_from_slice(&self.width.to_le_bytes());
        info.extend_from_slice(&self.height.to_le_bytes());
        info.extend_from_slice(&1u16.to_le_bytes());
        info.extend_from_slice(&self.bits.to_le_bytes());
        info.extend_from_slice(&self.compression.to_le_bytes());
        info.extend_from_slice(&[0u8; 20]);
        for m in &self.masks {
            info.extend_from_slice(&m.to_le_bytes());
        }
        while info.len() < self.info_size as usize {
            info.push(0);
        }

        let mut body = info;
        for entry in &self.palette {
            body.extend_from_slice(entry);
        }
        body.extend(std::iter::repeat_n(0xAAu8, self.gap));

        let data_offset = 14 + body.len() as u32;
        let mut pixels = Vec::new();
        for row in &self.rows {
            pixels.extend_from_slice(row);
            let pad = (4 - row.len() % 4) % 4;
            pixels.extend(std::iter::repeat_n(0u8, pad));
        }

        let file_size = data_offset + pixels.len() as u32;
        let mut out = Vec::with_capacity(file_size as usize);
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&file_size.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&data_offset.to_le_bytes());
        out.extend_from_slice(&body);
        out.extend_from_slice(&pixels);
        out.truncate(out.len().saturating_sub(self.truncate));
        out
    }

    pub fn reader(&self) -> Cursor<Vec<u8>> {
        Cursor::new(self.build())
    }
}

/// Palette where entry `i` is `{blue: i, green: i + 1, red: i + 2}`.
pub fn ramp_palette(colors: usize) -> Vec<[u8; 4]> {
    (0..colors)
        .map(|i| {
            let i = i as u8;
            [i, i.wrapping_add(1), i.wrapping_add(2), 0]
        })
        .collect()
}

/// 24-bit rows where each pixel's blue byte is its row index and green its
/// column; red is constant 0x55.
pub fn tagged_bgr_rows(width: usize, lines: usize) -> Vec<Vec<u8>> {
    (0..lines)
        .map(|y| {
            (0..width)
                .flat_map(|x| [y as u8, x as u8, 0x55])
                .collect()
        })
        .collect()
}

/// Peak resident set size of this process in KiB, where the OS reports it.
pub fn peak_rss_kib() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    status
        .lines()
        .find_map(|line| line.strip_prefix("VmHWM:"))?
        .trim()
        .strip_suffix("kB")?
        .trim()
        .parse()
        .ok()
}
