//! Values exchanged with a codec.

use crate::ImageFormat;

/// Tightly packed RGBA8 pixels as produced by a [`Decoding`](crate::Decoding)
/// codec.
///
/// `data` is row-major with 4 bytes per pixel and no row padding. The
/// adapter validates the length against the dimensions before use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedRgba {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl DecodedRgba {
    /// Wrap codec output.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Borrow the RGBA bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Output from an encode operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOutput {
    data: Vec<u8>,
    format: ImageFormat,
}

impl EncodeOutput {
    /// Create a new encode output.
    pub fn new(data: Vec<u8>, format: ImageFormat) -> Self {
        Self { data, format }
    }

    /// Consume and return the encoded bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Borrow the encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Encoded byte count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the output is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The format that was used for encoding.
    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

impl AsRef<[u8]> for EncodeOutput {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
