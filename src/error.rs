/// Errors from BMP decoding.
///
/// Every failure is recoverable; a failed decode never exposes a partially
/// populated pixel buffer.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("i/o error: {0}")]
    Io(#[source] std::io::Error),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("arithmetic overflow computing {0}")]
    Overflow(&'static str),

    #[error("failed to allocate {bytes} bytes")]
    AllocFailed { bytes: usize },

    #[error("invalid channel bit masks: {0}")]
    InvalidBitfields(String),

    #[error("truncated pixel data: read {rows_read} of {rows_expected} rows")]
    Truncated { rows_read: u32, rows_expected: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelLayout,
        actual: crate::PixelLayout,
    },

    #[error("rows are padded to {stride} bytes, not a whole number of {bytes_per_pixel}-byte pixels")]
    PaddedRows {
        stride: usize,
        bytes_per_pixel: usize,
    },
}

impl From<std::io::Error> for BmpError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            BmpError::UnexpectedEof
        } else {
            BmpError::Io(e)
        }
    }
}
