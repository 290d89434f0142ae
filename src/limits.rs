//! Caps on what a decode or encode may consume.
//!
//! Decoding is guarded twice: a codec that can read the header checks
//! [`ResourceLimits::check_image`] before it decodes any pixels, and the
//! [`codec`](crate::codec) adapter checks again against the RGB8
//! [`PixelBuffer`](crate::PixelBuffer) it is about to fill. Encoding only
//! has its output size capped.

/// Bytes per pixel of a [`PixelBuffer`](crate::PixelBuffer).
pub(crate) const RGB8_BYTES: u64 = 3;

/// Limits applied around codec calls. `None` leaves a resource uncapped.
///
/// # Example
///
/// ```
/// use pixelgrid::ResourceLimits;
///
/// // Accept at most a 4K frame.
/// let limits = ResourceLimits::none()
///     .with_max_width(3840)
///     .with_max_height(2160)
///     .with_max_memory(3840 * 2160 * 3);
/// assert!(limits.check_image(3840, 2160, 3).is_ok());
/// assert!(limits.check_image(3840, 2161, 3).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ResourceLimits {
    /// Largest accepted `width * height`.
    pub max_pixels: Option<u64>,
    /// Largest decoded image in bytes. The adapter charges 3 bytes per
    /// pixel for the RGB8 buffer; a codec charges whatever its own
    /// intermediate needs.
    pub max_memory_bytes: Option<u64>,
    /// Largest encoded file in bytes.
    pub max_output_bytes: Option<u64>,
    /// Widest accepted image.
    pub max_width: Option<u32>,
    /// Tallest accepted image.
    pub max_height: Option<u32>,
    /// Largest encoded input in bytes.
    pub max_file_size: Option<u64>,
}

impl ResourceLimits {
    /// Everything uncapped.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_max_pixels(mut self, max: u64) -> Self {
        self.max_pixels = Some(max);
        self
    }

    pub fn with_max_memory(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    pub fn with_max_output(mut self, bytes: u64) -> Self {
        self.max_output_bytes = Some(bytes);
        self
    }

    pub fn with_max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_max_height(mut self, height: u32) -> Self {
        self.max_height = Some(height);
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    /// Whether anything is capped.
    pub fn has_any(&self) -> bool {
        *self != Self::none()
    }

    /// Check a `width × height` image against the size caps.
    ///
    /// Width is checked first, then height, then the pixel count.
    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<(), LimitExceeded> {
        if let Some(max) = self.max_width
            && width > max
        {
            return Err(LimitExceeded::Width { actual: width, max });
        }
        if let Some(max) = self.max_height
            && height > max
        {
            return Err(LimitExceeded::Height {
                actual: height,
                max,
            });
        }
        let pixels = u64::from(width) * u64::from(height);
        match self.max_pixels {
            Some(max) if pixels > max => Err(LimitExceeded::Pixels {
                actual: pixels,
                max,
            }),
            _ => Ok(()),
        }
    }

    /// [`check_dimensions`](Self::check_dimensions), then charge
    /// `bytes_per_pixel` for every pixel against `max_memory_bytes`.
    ///
    /// Only needs the image header, so codecs call it before decoding.
    pub fn check_image(
        &self,
        width: u32,
        height: u32,
        bytes_per_pixel: u64,
    ) -> Result<(), LimitExceeded> {
        self.check_dimensions(width, height)?;
        let bytes = (u64::from(width) * u64::from(height)).saturating_mul(bytes_per_pixel);
        self.check_memory(bytes)
    }

    pub fn check_memory(&self, bytes: u64) -> Result<(), LimitExceeded> {
        cap(self.max_memory_bytes, bytes, |actual, max| LimitExceeded::Memory { actual, max })
    }

    pub fn check_file_size(&self, bytes: u64) -> Result<(), LimitExceeded> {
        cap(self.max_file_size, bytes, |actual, max| LimitExceeded::FileSize { actual, max })
    }

    pub fn check_output_size(&self, bytes: u64) -> Result<(), LimitExceeded> {
        cap(self.max_output_bytes, bytes, |actual, max| LimitExceeded::OutputSize { actual, max })
    }
}

fn cap(
    max: Option<u64>,
    actual: u64,
    exceeded: impl FnOnce(u64, u64) -> LimitExceeded,
) -> Result<(), LimitExceeded> {
    match max {
        Some(max) if actual > max => Err(exceeded(actual, max)),
        _ => Ok(()),
    }
}

/// Which cap was hit, with the offending value and the cap.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LimitExceeded {
    #[error("width {actual} exceeds limit {max}")]
    Width { actual: u32, max: u32 },
    #[error("height {actual} exceeds limit {max}")]
    Height { actual: u32, max: u32 },
    /// `width * height`, computed in `u64`.
    #[error("pixel count {actual} exceeds limit {max}")]
    Pixels { actual: u64, max: u64 },
    /// Estimated decoded size, saturating at `u64::MAX`.
    #[error("memory {actual} bytes exceeds limit {max}")]
    Memory { actual: u64, max: u64 },
    #[error("file size {actual} bytes exceeds limit {max}")]
    FileSize { actual: u64, max: u64 },
    #[error("output size {actual} bytes exceeds limit {max}")]
    OutputSize { actual: u64, max: u64 },
}
