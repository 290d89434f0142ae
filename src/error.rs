//! Crate-wide error type.

use std::path::PathBuf;

use crate::limits::LimitExceeded;

/// Boxed error from a codec backend.
///
/// Codecs keep their own error types behind the associated `Error` of
/// [`Decoding`](crate::Decoding) / [`Encoding`](crate::Encoding); the adapter
/// boxes them so callers see a single [`Error`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors from pixel buffer construction, transforms, and codec adaptation.
///
/// Validation failures are reported before any mutation happens. Allocation
/// failures never leave a partially built buffer behind: the operation that
/// failed returns no buffer at all.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Empty input, zero dimensions, mismatched lengths, or bad indices.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Storage for a new buffer or sequence could not be acquired.
    #[error("failed to allocate {bytes} bytes for {what}")]
    Allocation {
        /// What was being allocated.
        what: &'static str,
        /// Requested size in bytes (saturated on overflow).
        bytes: usize,
    },

    /// The codec rejected the input or produced an unusable image.
    #[error("decode failed: {0}")]
    Decode(#[source] BoxError),

    /// The codec rejected the buffer.
    #[error("encode failed: {0}")]
    Encode(#[source] BoxError),

    /// A configured [`ResourceLimits`](crate::ResourceLimits) cap was exceeded.
    #[error(transparent)]
    Limit(#[from] LimitExceeded),

    /// Reading or writing an image file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File that was being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether this error came from storage acquisition.
    pub fn is_allocation(&self) -> bool {
        matches!(self, Self::Allocation { .. })
    }

    /// Whether this error came from argument validation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
