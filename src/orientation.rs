//! EXIF orientation support.

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::transform;

/// EXIF orientation tag values.
///
/// Describes how the stored pixels should be transformed for display.
/// Values match the EXIF Orientation tag (TIFF tag 274).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Orientation {
    /// No rotation or flip needed.
    #[default]
    Normal = 1,
    /// Flip horizontally (mirror left-right).
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Flip vertically (mirror top-bottom).
    FlipVertical = 4,
    /// Transpose (rotate 90 CW then flip horizontally).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90 = 6,
    /// Transverse (rotate 90 CCW then flip horizontally).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (= 90 CCW).
    Rotate270 = 8,
}

impl Orientation {
    /// Create from EXIF orientation value (1-8).
    ///
    /// Returns [`Normal`](Orientation::Normal) for out-of-range values.
    pub fn from_exif(value: u16) -> Self {
        match value {
            1 => Self::Normal,
            2 => Self::FlipHorizontal,
            3 => Self::Rotate180,
            4 => Self::FlipVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90,
            7 => Self::Transverse,
            8 => Self::Rotate270,
            _ => Self::Normal,
        }
    }

    /// EXIF tag value (1-8).
    pub fn exif_value(self) -> u16 {
        self as u16
    }

    /// Whether this orientation swaps width and height.
    ///
    /// True for orientations involving a 90 or 270 degree rotation
    /// (values 5-8).
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    /// Compute display `(width, height)` for the given stored dimensions.
    pub fn display_dimensions(self, stored_width: usize, stored_height: usize) -> (usize, usize) {
        if self.swaps_dimensions() {
            (stored_height, stored_width)
        } else {
            (stored_width, stored_height)
        }
    }

    /// Whether any transformation is needed.
    pub fn is_identity(self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Produce the display-oriented image as a new buffer.
    ///
    /// The source is never modified, even for orientations that only need
    /// an in-place flip.
    pub fn apply(self, src: &PixelBuffer) -> Result<PixelBuffer> {
        let out = match self {
            Self::Normal => src.try_clone()?,
            Self::FlipHorizontal => {
                let mut out = src.try_clone()?;
                transform::flip_horizontal(&mut out);
                out
            }
            Self::Rotate180 => transform::rotate_180(src)?,
            Self::FlipVertical => {
                let mut out = src.try_clone()?;
                transform::reverse_row_order(&mut out);
                out
            }
            Self::Transpose => transform::transpose(src)?,
            Self::Rotate90 => transform::rotate_clockwise(src)?,
            Self::Transverse => {
                let mut out = transform::transpose(src)?;
                transform::flip_vertical(&mut out);
                out
            }
            Self::Rotate270 => transform::rotate_counter_clockwise(src)?,
        };
        tracing::debug!(
            orientation = self.exif_value(),
            width = out.width(),
            height = out.height(),
            "applied orientation"
        );
        Ok(out)
    }
}
