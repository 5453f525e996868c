//! Little-endian field reader over a seekable byte stream.

use std::io::{Read, Seek, SeekFrom};

use super::safe::can_widen_to_offset;
use crate::error::BmpError;

pub(crate) struct Cursor<R> {
    inner: R,
}

impl<R: Read + Seek> Cursor<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Seek to an absolute byte offset from the start of the stream.
    pub(crate) fn set_position(&mut self, pos: u32) -> Result<(), BmpError> {
        if !can_widen_to_offset(pos) {
            return Err(BmpError::Overflow("stream offset"));
        }
        self.inner.seek(SeekFrom::Start(u64::from(pos)))?;
        Ok(())
    }

    /// Total length of the stream. Leaves the position at the end.
    pub(crate) fn stream_len(&mut self) -> Result<u64, BmpError> {
        Ok(self.inner.seek(SeekFrom::End(0))?)
    }

    pub(crate) fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub(crate) fn get_u16_le(&mut self) -> Result<u16, BmpError> {
        Ok(u16::from_le_bytes(self.read_fixed_bytes()?))
    }

    pub(crate) fn get_u32_le(&mut self) -> Result<u32, BmpError> {
        Ok(u32::from_le_bytes(self.read_fixed_bytes()?))
    }

    pub(crate) fn get_i32_le(&mut self) -> Result<i32, BmpError> {
        Ok(i32::from_le_bytes(self.read_fixed_bytes()?))
    }

    /// Fill `buf` completely. A short read is reported as
    /// [`BmpError::UnexpectedEof`].
    pub(crate) fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), BmpError> {
        self.inner.read_exact(buf)?;
        Ok(())
    }
}
