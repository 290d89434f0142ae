//! Fallible allocation.
//!
//! Every buffer this crate hands out is a single `Vec`, so acquiring storage
//! either fully succeeds or fails before anything is written.

use crate::error::{Error, Result};

/// Allocate an empty `Vec` with room for exactly `len` elements.
///
/// Fails with [`Error::Allocation`] instead of aborting when the allocator
/// refuses the request or the byte size overflows.
pub(crate) fn try_vec<T>(len: usize, what: &'static str) -> Result<Vec<T>> {
    let mut v = Vec::new();
    if let Err(err) = v.try_reserve_exact(len) {
        let bytes = len.saturating_mul(size_of::<T>());
        tracing::warn!(what, bytes, %err, "allocation failed");
        return Err(Error::Allocation { what, bytes });
    }
    Ok(v)
}
