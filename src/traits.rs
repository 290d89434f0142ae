//! Codec capability traits.
//!
//! This crate never parses or writes image file formats itself. A codec
//! plugs in by implementing [`Decoding`] (bytes → RGBA8) and/or
//! [`Encoding`] (RGB8 → bytes). Format-specific settings such as JPEG
//! quality live on the codec's concrete config type, not on the traits.
//!
//! The [`codec`](crate::codec) functions sit on top of these traits and
//! translate between the flat byte layouts and [`PixelBuffer`](crate::PixelBuffer).

use crate::{DecodedRgba, EncodeOutput, ImageFormat, ResourceLimits};

/// Decode capability.
///
/// Config types are reusable (`Clone`) and have no lifetimes.
pub trait Decoding: Sized + Clone {
    /// The codec-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Apply resource limits.
    ///
    /// The adapter enforces them around [`decode_rgba8`](Decoding::decode_rgba8);
    /// a codec may also enforce them earlier.
    fn with_limits(self, limits: ResourceLimits) -> Self;

    /// Limits currently in effect.
    fn limits(&self) -> &ResourceLimits;

    /// Decode encoded image bytes to tightly packed RGBA8.
    ///
    /// Codecs that decode to fewer channels expand to RGBA with alpha 255.
    fn decode_rgba8(&self, data: &[u8]) -> Result<DecodedRgba, Self::Error>;
}

/// Encode capability.
pub trait Encoding: Sized + Clone {
    /// The codec-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Apply resource limits.
    fn with_limits(self, limits: ResourceLimits) -> Self;

    /// Limits currently in effect.
    fn limits(&self) -> &ResourceLimits;

    /// Format this encoder produces.
    fn format(&self) -> ImageFormat;

    /// Encode tightly packed RGB8 (`width * height * 3` bytes, row-major,
    /// fully opaque).
    fn encode_rgb8(&self, rgb: &[u8], width: u32, height: u32)
    -> Result<EncodeOutput, Self::Error>;
}
