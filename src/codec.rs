//! Translation between codec byte layouts and [`PixelBuffer`].
//!
//! Decoding repacks the codec's flat RGBA8 output row-major into a buffer,
//! dropping alpha. Encoding hands the buffer's pixels to the codec as flat
//! RGB8 (every pixel opaque). Limits configured on the codec are enforced
//! here, so every backend gets them.

use std::path::Path;

use rgb::ComponentBytes;

use crate::buffer::{Pixel, PixelBuffer};
use crate::error::{Error, Result};
use crate::limits::RGB8_BYTES;
use crate::reserve::try_vec;
use crate::{Decoding, EncodeOutput, Encoding, ImageFormat, LimitExceeded};

/// Decode encoded image bytes into a [`PixelBuffer`].
///
/// # Errors
///
/// - [`Error::Limit`] if the input or the decoded image exceeds the
///   decoder's [`ResourceLimits`](crate::ResourceLimits), including when the
///   codec itself refused with a [`LimitExceeded`] anywhere in its error's
///   source chain.
/// - [`Error::Decode`] if the codec fails, reports a zero dimension, or
///   returns a byte count that does not match its dimensions.
/// - [`Error::Allocation`] if the buffer cannot be allocated.
pub fn decode<D: Decoding>(decoder: &D, data: &[u8]) -> Result<PixelBuffer> {
    let limits = decoder.limits();
    limits.check_file_size(data.len() as u64)?;

    let raw = decoder.decode_rgba8(data).map_err(|e| match limit_in_chain(&e) {
        Some(exceeded) => Error::Limit(exceeded),
        None => Error::Decode(Box::new(e)),
    })?;
    let (width, height) = (raw.width(), raw.height());
    if width == 0 || height == 0 {
        return Err(Error::Decode(
            format!("codec reported non-positive dimensions {width}x{height}").into(),
        ));
    }
    limits.check_image(width, height, RGB8_BYTES)?;
    let pixel_count = u64::from(width) * u64::from(height);

    let expected = pixel_count * 4;
    if raw.bytes().len() as u64 != expected {
        return Err(Error::Decode(
            format!(
                "codec returned {} bytes for a {width}x{height} RGBA image, expected {expected}",
                raw.bytes().len()
            )
            .into(),
        ));
    }

    let mut pixels = try_vec(pixel_count as usize, "decoded buffer")?;
    pixels.extend(
        raw.bytes()
            .chunks_exact(4)
            .map(|rgba| Pixel::new(rgba[0], rgba[1], rgba[2])),
    );
    tracing::debug!(width, height, input_bytes = data.len(), "decoded image");
    PixelBuffer::from_vec(pixels, width as usize, height as usize)
}

/// Encode a [`PixelBuffer`] with the given encoder.
///
/// # Errors
///
/// - [`Error::Encode`] if the buffer dimensions do not fit the codec's
///   `u32` dimensions or the codec rejects the buffer.
/// - [`Error::Limit`] if the encoded output exceeds `max_output_bytes`.
pub fn encode<E: Encoding>(encoder: &E, buffer: &PixelBuffer) -> Result<EncodeOutput> {
    let width = u32::try_from(buffer.width())
        .map_err(|_| Error::Encode("width does not fit in u32".into()))?;
    let height = u32::try_from(buffer.height())
        .map_err(|_| Error::Encode("height does not fit in u32".into()))?;
    let limits = encoder.limits();
    limits.check_dimensions(width, height)?;

    let output = encoder
        .encode_rgb8(buffer.as_slice().as_bytes(), width, height)
        .map_err(|e| Error::Encode(Box::new(e)))?;
    limits.check_output_size(output.len() as u64)?;
    tracing::debug!(
        width,
        height,
        format = %output.format(),
        output_bytes = output.len(),
        "encoded image"
    );
    Ok(output)
}

/// First [`LimitExceeded`] in `err` or its sources.
fn limit_in_chain(err: &(dyn std::error::Error + 'static)) -> Option<LimitExceeded> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(exceeded) = e.downcast_ref::<LimitExceeded>() {
            return Some(exceeded.clone());
        }
        current = e.source();
    }
    None
}

/// Read and decode an image file.
pub fn load_image<D: Decoding>(decoder: &D, path: impl AsRef<Path>) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read image file");
    decode(decoder, &data)
}

/// Encode a buffer and write it to a file.
///
/// The encoder decides the output format; the file extension is not
/// consulted.
pub fn save_image<E: Encoding>(
    encoder: &E,
    buffer: &PixelBuffer,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let extension_format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension);
    if let Some(named) = extension_format
        && named != encoder.format()
    {
        tracing::warn!(
            path = %path.display(),
            extension = %named,
            encoder = %encoder.format(),
            "file extension disagrees with encoder format; writing encoder format"
        );
    }
    let output = encode(encoder, buffer)?;
    std::fs::write(path, output.bytes()).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = output.len(), "wrote image file");
    Ok(())
}
