//! Owned RGB pixel grids and the transforms that reshape them.
//!
//! - [`PixelBuffer`]: a `height × width` grid of opaque [`Pixel`]s in one
//!   contiguous row-major allocation
//! - [`transform`]: in-place flips and allocating transpose and
//!   rotations
//! - [`Orientation`]: EXIF orientation mapped onto those transforms
//! - [`Decoding`] / [`Encoding`]: the codec capability this crate consumes
//!   but does not implement
//! - [`codec`]: decode/encode/load/save adapters between codec byte layouts
//!   and [`PixelBuffer`]
//! - [`ResourceLimits`]: caps enforced around codec calls
//! - [`arrays`]: small search/pad/reverse helpers over slices
//!
//! With the default `image` feature, [`ImageRsDecoder`] and
//! [`ImageRsEncoder`] provide a JPEG/PNG codec.
//!
//! Every fallible allocation reports [`Error::Allocation`] instead of
//! aborting, and no operation ever hands back a partially built buffer.

#![forbid(unsafe_code)]

pub mod arrays;
mod buffer;
pub mod codec;
mod error;
mod format;
#[cfg(feature = "image")]
mod image_rs;
mod limits;
mod orientation;
mod output;
mod reserve;
mod traits;
pub mod transform;

pub use buffer::{Pixel, PixelBuffer};
pub use error::{BoxError, Error, Result};
pub use format::ImageFormat;
#[cfg(feature = "image")]
pub use image_rs::{ImageRsDecoder, ImageRsEncoder, ImageRsError};
pub use limits::{LimitExceeded, ResourceLimits};
pub use orientation::Orientation;
pub use output::{DecodedRgba, EncodeOutput};
pub use traits::{Decoding, Encoding};

// Re-exports for codec implementors and users.
pub use imgref::{ImgRef, ImgVec};
pub use rgb;
pub use rgb::Rgb;
