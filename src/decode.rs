use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::BmpError;
use crate::flags::DecodeFlags;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// A decoded bitmap. The caller is the sole owner of the pixel buffer;
/// dropping the image releases it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pixels: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Number of scan lines (`|height|` as stored in the file).
    pub height: u32,
    /// Channel layout, RGB or RGBA.
    pub layout: PixelLayout,
    /// Bytes per output row, alignment padding included.
    pub stride: usize,
}

impl Image {
    pub(crate) fn new(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        layout: PixelLayout,
        stride: usize,
    ) -> Self {
        Self {
            pixels,
            width,
            height,
            layout,
            stride,
        }
    }

    /// Access the pixel data, `stride * height` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Release the pixel buffer. Equivalent to dropping the image.
    pub fn release(self) {}

    /// Number of channels per pixel (3 or 4).
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Whether output rows carry alignment padding after the pixel bytes.
    pub fn is_padded(&self) -> bool {
        self.stride != self.width as usize * self.layout.bytes_per_pixel()
    }

    /// Pixel bytes of row `y` in output order, padding excluded.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        let len = self.width as usize * self.layout.bytes_per_pixel();
        self.pixels.get(start..start + len)
    }

    /// Iterate rows in output order, padding excluded.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let len = self.width as usize * self.layout.bytes_per_pixel();
        self.pixels
            .chunks_exact(self.stride)
            .map(move |row| &row[..len])
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`BmpError::LayoutMismatch`] if the pixel layout doesn't match `P`
    /// and [`BmpError::PaddedRows`] if rows carry alignment padding.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        self.check_layout::<P>()?;
        if self.is_padded() {
            return Err(BmpError::PaddedRows {
                stride: self.stride,
                bytes_per_pixel: self.layout.bytes_per_pixel(),
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Padded rows are accepted when the stride is a whole number of pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(
        &self,
    ) -> Result<imgref::ImgRef<'_, P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        self.check_layout::<P>()?;
        let bpp = self.layout.bytes_per_pixel();
        if self.stride % bpp != 0 {
            return Err(BmpError::PaddedRows {
                stride: self.stride,
                bytes_per_pixel: bpp,
            });
        }
        let pixels: &[P] = self.pixels().as_pixels();
        Ok(imgref::ImgRef::new_stride(
            pixels,
            self.width as usize,
            self.height as usize,
            self.stride / bpp,
        ))
    }

    /// Copy into an [`imgref::ImgVec`] of typed pixels, dropping row padding.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        self.check_layout::<P>()?;
        let pixels: Vec<P> = self
            .rows()
            .flat_map(|row| {
                let row: &[P] = row.as_pixels();
                row.iter().copied()
            })
            .collect();
        Ok(imgref::ImgVec::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    #[cfg(feature = "rgb")]
    fn check_layout<P: crate::DecodePixel>(&self) -> Result<(), BmpError> {
        if self.layout != P::layout() {
            return Err(BmpError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(())
    }
}

/// Decode options: flags plus optional resource limits.
#[derive(Clone, Debug, Default)]
pub struct DecodeRequest<'a> {
    flags: DecodeFlags,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(flags: DecodeFlags) -> Self {
        Self {
            flags,
            limits: None,
        }
    }

    /// Enforce `limits` before any pixel-sized allocation.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode from a readable, seekable stream.
    pub fn decode<R: Read + Seek>(&self, reader: R) -> Result<Image, BmpError> {
        crate::bmp::decode(reader, self.flags, self.limits)
    }

    /// Open `path` and decode it. The file is closed before returning.
    pub fn decode_path(&self, path: impl AsRef<Path>) -> Result<Image, BmpError> {
        let file = File::open(path.as_ref()).map_err(BmpError::Io)?;
        self.decode(BufReader::new(file))
    }
}
