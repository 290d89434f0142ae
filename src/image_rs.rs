//! JPEG/PNG codec backend built on the [`image`] crate.
//!
//! ```no_run
//! use pixelgrid::{ImageRsDecoder, ImageRsEncoder, codec, transform};
//!
//! let img = codec::load_image(&ImageRsDecoder::new(), "in.jpg")?;
//! let rotated = transform::rotate_clockwise(&img)?;
//! codec::save_image(&ImageRsEncoder::jpeg(90), &rotated, "out.jpg")?;
//! # Ok::<(), pixelgrid::Error>(())
//! ```

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader};

use crate::{
    DecodedRgba, Decoding, EncodeOutput, Encoding, ImageFormat, LimitExceeded, ResourceLimits,
};

/// The decoder produces RGBA8 before the adapter repacks it.
const RGBA8_BYTES: u64 = 4;

/// Errors from the `image` backend.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ImageRsError {
    /// Input does not start with a supported format's magic bytes.
    #[error("unrecognized image format")]
    UnknownFormat,
    /// The header describes an image over the configured limits. Nothing
    /// was decoded.
    #[error("image header rejected: {0}")]
    Limit(#[from] LimitExceeded),
    /// The underlying codec failed.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

fn to_image_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Png => image::ImageFormat::Png,
    }
}

/// The `image` crate's own allocation guard. Its default `max_alloc` stays
/// in place unless a memory cap is configured.
fn to_image_limits(limits: &ResourceLimits) -> image::Limits {
    let mut out = image::Limits::default();
    out.max_image_width = limits.max_width;
    out.max_image_height = limits.max_height;
    if let Some(bytes) = limits.max_memory_bytes {
        out.max_alloc = Some(bytes);
    }
    out
}

// ── Decoder ──────────────────────────────────────────────────────────

/// Decoder for JPEG and PNG input.
#[derive(Clone, Debug, Default)]
pub struct ImageRsDecoder {
    limits: ResourceLimits,
}

impl ImageRsDecoder {
    /// Create a decoder with no limits.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoding for ImageRsDecoder {
    type Error = ImageRsError;

    fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    fn decode_rgba8(&self, data: &[u8]) -> Result<DecodedRgba, ImageRsError> {
        let format = ImageFormat::detect(data).ok_or(ImageRsError::UnknownFormat)?;
        let reader = || ImageReader::with_format(Cursor::new(data), to_image_format(format));

        // Header parsing may reserve the output buffer under the reader's
        // limits, so read it uncapped and apply ours instead.
        let mut header = reader();
        header.no_limits();
        let (width, height) = header.into_dimensions()?;
        if let Err(exceeded) = self.limits.check_image(width, height, RGBA8_BYTES) {
            tracing::warn!(%format, width, height, %exceeded, "rejecting image from header");
            return Err(exceeded.into());
        }

        tracing::debug!(%format, width, height, bytes = data.len(), "decoding with image backend");
        let mut reader = reader();
        reader.limits(to_image_limits(&self.limits));
        let rgba = reader.decode()?.into_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(DecodedRgba::new(rgba.into_raw(), width, height))
    }
}

// ── Encoder ──────────────────────────────────────────────────────────

/// Encoder producing JPEG (at a configurable quality) or PNG.
#[derive(Clone, Debug)]
pub struct ImageRsEncoder {
    format: ImageFormat,
    quality: u8,
    limits: ResourceLimits,
}

impl ImageRsEncoder {
    /// Default JPEG quality.
    pub const DEFAULT_QUALITY: u8 = 100;

    /// Create an encoder for `format` at [`DEFAULT_QUALITY`](Self::DEFAULT_QUALITY).
    pub fn new(format: ImageFormat) -> Self {
        Self {
            format,
            quality: Self::DEFAULT_QUALITY,
            limits: ResourceLimits::none(),
        }
    }

    /// JPEG encoder at the given quality (see [`with_quality`](Self::with_quality)).
    pub fn jpeg(quality: u8) -> Self {
        Self::new(ImageFormat::Jpeg).with_quality(quality)
    }

    /// Lossless PNG encoder.
    pub fn png() -> Self {
        Self::new(ImageFormat::Png)
    }

    /// Set lossy quality, 0-100. The JPEG encoder's floor is 1, so 0 encodes
    /// as 1. Ignored for PNG.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    /// Effective quality.
    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for ImageRsEncoder {
    fn default() -> Self {
        Self::new(ImageFormat::Jpeg)
    }
}

impl Encoding for ImageRsEncoder {
    type Error = ImageRsError;

    fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    fn format(&self) -> ImageFormat {
        self.format
    }

    fn encode_rgb8(
        &self,
        rgb: &[u8],
        width: u32,
        height: u32,
    ) -> Result<EncodeOutput, ImageRsError> {
        let mut out = Vec::new();
        match self.format {
            ImageFormat::Jpeg => JpegEncoder::new_with_quality(&mut out, self.quality)
                .write_image(rgb, width, height, ExtendedColorType::Rgb8)?,
            ImageFormat::Png => {
                PngEncoder::new(&mut out).write_image(rgb, width, height, ExtendedColorType::Rgb8)?
            }
        }
        Ok(EncodeOutput::new(out, self.format))
    }
}
