//! Overflow-checked size arithmetic.
//!
//! Every size or offset derived from header fields goes through these guards
//! first. A failed guard is a decode failure, never a wrapped value.

use crate::error::BmpError;

/// Whether `a + b` fits in `usize`.
pub(crate) fn can_add(a: usize, b: usize) -> bool {
    a.checked_add(b).is_some()
}

/// Whether `a * b` fits in `usize`.
pub(crate) fn can_multiply(a: usize, b: usize) -> bool {
    a.checked_mul(b).is_some()
}

/// Whether a 32-bit header value fits the platform size type losslessly.
pub(crate) fn can_widen_to_size(x: u32) -> bool {
    usize::try_from(x).is_ok()
}

/// Whether a 32-bit header value fits a signed stream offset losslessly.
pub(crate) fn can_widen_to_offset(x: u32) -> bool {
    i64::try_from(x).is_ok()
}

/// Whether `-x` is representable; false only for `i32::MIN`.
pub(crate) fn can_negate(x: i32) -> bool {
    x != i32::MIN
}

pub(crate) fn add(a: usize, b: usize, what: &'static str) -> Result<usize, BmpError> {
    if !can_add(a, b) {
        return Err(BmpError::Overflow(what));
    }
    Ok(a + b)
}

pub(crate) fn multiply(a: usize, b: usize, what: &'static str) -> Result<usize, BmpError> {
    if !can_multiply(a, b) {
        return Err(BmpError::Overflow(what));
    }
    Ok(a * b)
}

pub(crate) fn widen(x: u32, what: &'static str) -> Result<usize, BmpError> {
    if !can_widen_to_size(x) {
        return Err(BmpError::Overflow(what));
    }
    Ok(x as usize)
}

/// Byte length of a row of `width` pixels at `bits` per pixel, padded to
/// the next 4-byte boundary.
pub(crate) fn padded_row_len(width: usize, bits: usize) -> Result<usize, BmpError> {
    let row_bits = multiply(width, bits, "row bit length")?;
    let row_bits = add(row_bits, 31, "row bit length")?;
    Ok(row_bits / 32 * 4)
}

/// True iff the magnitude of `x` has exactly one set bit.
pub(crate) fn is_power_of_two(x: i64) -> bool {
    x.unsigned_abs().is_power_of_two()
}
