use crate::BmpError;

/// Caller-imposed resource limits for a decode.
///
/// All fields default to `None` (no limit). Limits are enforced once the
/// geometry is known and before any pixel-sized buffer is allocated.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * line count).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for any single buffer (output image or row scratch).
    pub max_memory_bytes: Option<u64>,
}

fn over(value: u64, limit: Option<u64>) -> Option<u64> {
    limit.filter(|&max| value > max)
}

impl Limits {
    /// Reject a `width` x `lines` image that exceeds the dimension limits.
    pub(crate) fn check_dimensions(&self, width: u32, lines: u32) -> Result<(), BmpError> {
        if let Some(max) = over(u64::from(width), self.max_width) {
            return Err(BmpError::LimitExceeded(format!(
                "width {width} exceeds limit {max}"
            )));
        }
        if let Some(max) = over(u64::from(lines), self.max_height) {
            return Err(BmpError::LimitExceeded(format!(
                "height {lines} exceeds limit {max}"
            )));
        }
        // u32 * u32 always fits in u64.
        let pixels = u64::from(width) * u64::from(lines);
        if let Some(max) = over(pixels, self.max_pixels) {
            return Err(BmpError::LimitExceeded(format!(
                "pixel count {pixels} exceeds limit {max}"
            )));
        }
        Ok(())
    }

    /// Reject an allocation of `bytes` for `what` above the memory limit.
    pub(crate) fn check_allocation(&self, what: &str, bytes: usize) -> Result<(), BmpError> {
        let requested = u64::try_from(bytes).unwrap_or(u64::MAX);
        if let Some(max) = over(requested, self.max_memory_bytes) {
            return Err(BmpError::LimitExceeded(format!(
                "{what} of {bytes} bytes exceeds memory limit {max}"
            )));
        }
        Ok(())
    }
}
