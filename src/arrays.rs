//! Linear-scan helpers over fixed-length sequences.
//!
//! These work on borrowed slices, so a sequence always carries its own
//! length. An empty slice stands in for an absent sequence: searches report
//! `false`, and operations that need at least one element fail with
//! [`Error::InvalidArgument`].

use crate::error::{Error, Result};
use crate::reserve::try_vec;

/// Whether any element of `seq` equals `x`.
///
/// An empty sequence contains nothing.
pub fn contains<T: PartialEq>(seq: &[T], x: &T) -> bool {
    seq.iter().any(|v| v == x)
}

/// Whether any element in the closed range `[i, j]` of `seq` equals `x`.
///
/// Returns `false` when the range is invalid (`i > j` or `j >= seq.len()`),
/// including for every range over an empty sequence.
pub fn contains_within<T: PartialEq>(seq: &[T], x: &T, i: usize, j: usize) -> bool {
    if i > j || j >= seq.len() {
        return false;
    }
    contains(&seq[i..=j], x)
}

/// Copy `seq` into a new sequence of `new_len` elements.
///
/// The first `min(seq.len(), new_len)` elements are copied in order; any
/// remaining trailing positions are filled with `T::default()` (zero for
/// integers).
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `seq` is empty or `new_len` is zero, and
/// [`Error::Allocation`] if the new sequence cannot be allocated.
pub fn padded_copy<T: Copy + Default>(seq: &[T], new_len: usize) -> Result<Vec<T>> {
    if seq.is_empty() {
        return Err(Error::InvalidArgument("source sequence is empty"));
    }
    if new_len == 0 {
        return Err(Error::InvalidArgument("padded length must be at least 1"));
    }
    let mut out = try_vec(new_len, "padded copy")?;
    let kept = seq.len().min(new_len);
    out.extend_from_slice(&seq[..kept]);
    out.resize(new_len, T::default());
    Ok(out)
}

/// Reverse `seq` in place by swapping from both ends toward the middle.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `seq` is empty; the slice is left untouched.
pub fn reverse<T>(seq: &mut [T]) -> Result<()> {
    if seq.is_empty() {
        tracing::warn!("reverse called on an empty sequence");
        return Err(Error::InvalidArgument("cannot reverse an empty sequence"));
    }
    let mut left = 0;
    let mut right = seq.len() - 1;
    while left < right {
        seq.swap(left, right);
        left += 1;
        right -= 1;
    }
    Ok(())
}

/// Reversed copy of `seq`. The source is not modified.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `seq` is empty, and [`Error::Allocation`] if
/// the copy cannot be allocated.
pub fn reverse_copy<T: Clone>(seq: &[T]) -> Result<Vec<T>> {
    if seq.is_empty() {
        tracing::warn!("reverse_copy called on an empty sequence");
        return Err(Error::InvalidArgument("cannot reverse an empty sequence"));
    }
    let mut out = try_vec(seq.len(), "reversed copy")?;
    out.extend_from_slice(seq);
    reverse(&mut out)?;
    Ok(out)
}
