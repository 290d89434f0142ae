//! Owned RGB pixel grid.
//!
//! A [`PixelBuffer`] stores `height` rows of `width` pixels in one
//! contiguous, row-major `Vec` (stride == width). A single allocation either
//! fully succeeds or fully fails, so there is never a half-built grid to
//! unwind.

use core::fmt;
use core::slice::{ChunksExact, ChunksExactMut};

use imgref::{ImgRef, ImgVec};
use rgb::Rgb;

use crate::error::{Error, Result};
use crate::reserve::try_vec;

/// One opaque 8-bit RGB pixel.
///
/// Alpha is not stored: decoded alpha is discarded and every pixel is
/// treated as fully opaque.
pub type Pixel = Rgb<u8>;

/// Owned `height × width` grid of [`Pixel`]s.
///
/// Invariants: `width >= 1`, `height >= 1`, and the backing storage holds
/// exactly `width * height` pixels, so every row has length `width`.
///
/// There is no infallible `Clone`; use [`try_clone`](Self::try_clone), which
/// reports allocation failure. Two buffers compare equal when their
/// dimensions match and every pixel matches on all three channels.
#[derive(PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    pixels: Vec<Pixel>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Allocate a black buffer.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if either dimension is zero or the pixel
    /// count overflows, [`Error::Allocation`] if storage cannot be acquired.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, Pixel::default())
    }

    /// Allocate a buffer with every pixel set to `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Result<Self> {
        let len = pixel_count(width, height)?;
        let mut pixels = try_vec(len, "pixel buffer")?;
        pixels.resize(len, pixel);
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel in row-major
    /// order.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Pixel,
    ) -> Result<Self> {
        let len = pixel_count(width, height)?;
        let mut pixels = try_vec(len, "pixel buffer")?;
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Wrap row-major pixels.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if a dimension is zero or
    /// `pixels.len() != width * height`.
    pub fn from_vec(pixels: Vec<Pixel>, width: usize, height: usize) -> Result<Self> {
        let len = pixel_count(width, height)?;
        if pixels.len() != len {
            return Err(Error::InvalidArgument(
                "pixel count does not match width * height",
            ));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Copy a grid given as a list of rows.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if there are no rows, the first row is
    /// empty, or the rows have different lengths.
    pub fn from_rows<R: AsRef<[Pixel]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let len = pixel_count(width, height)?;
        if rows.iter().any(|r| r.as_ref().len() != width) {
            return Err(Error::InvalidArgument("rows have inconsistent lengths"));
        }
        let mut pixels = try_vec(len, "pixel buffer")?;
        for row in rows {
            pixels.extend_from_slice(row.as_ref());
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Assemble a buffer from parts that the caller has already validated.
    pub(crate) fn from_parts(pixels: Vec<Pixel>, width: usize, height: usize) -> Self {
        debug_assert!(width >= 1 && height >= 1);
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Deep copy into newly allocated storage.
    ///
    /// The copy shares nothing with `self`; mutating one never affects the
    /// other.
    ///
    /// # Errors
    ///
    /// [`Error::Allocation`] if storage cannot be acquired. Nothing is
    /// allocated on the failure path.
    pub fn try_clone(&self) -> Result<Self> {
        let mut pixels = try_vec(self.pixels.len(), "pixel buffer copy")?;
        pixels.extend_from_slice(&self.pixels);
        Ok(Self::from_parts(pixels, self.width, self.height))
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels (number of rows).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Pixel at column `x` of row `y`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x)
    }

    /// Mutable pixel at column `x` of row `y`, or `None` if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get_mut(y * self.width + x)
    }

    /// Pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[Pixel] {
        assert!(
            y < self.height,
            "row index {y} out of bounds (height: {})",
            self.height
        );
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Mutable pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [Pixel] {
        assert!(
            y < self.height,
            "row index {y} out of bounds (height: {})",
            self.height
        );
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }

    /// Iterate rows top to bottom.
    #[inline]
    pub fn rows(&self) -> ChunksExact<'_, Pixel> {
        self.pixels.chunks_exact(self.width)
    }

    /// Iterate rows top to bottom, mutably.
    #[inline]
    pub fn rows_mut(&mut self) -> ChunksExactMut<'_, Pixel> {
        self.pixels.chunks_exact_mut(self.width)
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[Pixel] {
        &self.pixels
    }

    /// All pixels in row-major order, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Consume the buffer and return its row-major pixels.
    pub fn into_vec(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Borrow as an [`ImgRef`] for interop with `imgref`-based code.
    pub fn as_imgref(&self) -> ImgRef<'_, Pixel> {
        ImgRef::new(self.pixels.as_slice(), self.width, self.height)
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PixelBuffer({}x{}, RGB8)", self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// imgref interop
// ---------------------------------------------------------------------------

impl From<PixelBuffer> for ImgVec<Pixel> {
    fn from(buf: PixelBuffer) -> Self {
        ImgVec::new(buf.pixels, buf.width, buf.height)
    }
}

impl TryFrom<ImgRef<'_, Pixel>> for PixelBuffer {
    type Error = Error;

    /// Copy an image view, dropping any row padding.
    fn try_from(img: ImgRef<'_, Pixel>) -> Result<Self> {
        let (width, height) = (img.width(), img.height());
        let len = pixel_count(width, height)?;
        let mut pixels = try_vec(len, "pixel buffer")?;
        for row in img.rows() {
            pixels.extend_from_slice(row);
        }
        Ok(Self::from_parts(pixels, width, height))
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Validate dimensions and return `width * height`.
fn pixel_count(width: usize, height: usize) -> Result<usize> {
    if width == 0 {
        return Err(Error::InvalidArgument("width must be at least 1"));
    }
    if height == 0 {
        return Err(Error::InvalidArgument("height must be at least 1"));
    }
    width
        .checked_mul(height)
        .ok_or(Error::InvalidArgument("width * height overflows"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn px(v: u8) -> Pixel {
        Rgb::new(v, v.wrapping_add(1), v.wrapping_add(2))
    }

    #[test]
    fn new_is_black() {
        let buf = PixelBuffer::new(4, 3).unwrap();
        assert_eq!(buf.width(), 4);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.pixel_count(), 12);
        assert!(buf.as_slice().iter().all(|p| *p == Rgb::new(0, 0, 0)));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(PixelBuffer::new(0, 3).unwrap_err().is_invalid_argument());
        assert!(PixelBuffer::new(3, 0).unwrap_err().is_invalid_argument());
        assert!(
            PixelBuffer::from_vec(Vec::new(), 0, 0)
                .unwrap_err()
                .is_invalid_argument()
        );
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        let err = PixelBuffer::new(usize::MAX, 2).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn unallocatable_buffer_is_an_allocation_error() {
        // 3 bytes per pixel pushes the byte size past isize::MAX.
        let err = PixelBuffer::new(usize::MAX / 4, 1).unwrap_err();
        assert!(err.is_allocation());
    }

    #[test]
    fn from_vec_checks_length() {
        let err = PixelBuffer::from_vec(vec![px(0); 5], 2, 3).unwrap_err();
        assert!(err.is_invalid_argument());
        let buf = PixelBuffer::from_vec(vec![px(0); 6], 2, 3).unwrap();
        assert_eq!((buf.width(), buf.height()), (2, 3));
    }

    #[test]
    fn from_rows_keeps_row_major_order() {
        let buf = PixelBuffer::from_rows(&[[px(1), px(2), px(3)], [px(4), px(5), px(6)]]).unwrap();
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.row(0), &[px(1), px(2), px(3)]);
        assert_eq!(buf.row(1), &[px(4), px(5), px(6)]);
        assert_eq!(buf.get(2, 1), Some(&px(6)));
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let rows = vec![vec![px(1), px(2)], vec![px(3)]];
        let err = PixelBuffer::from_rows(&rows).unwrap_err();
        assert!(err.is_invalid_argument());

        let empty: Vec<Vec<Pixel>> = Vec::new();
        assert!(PixelBuffer::from_rows(&empty).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn from_fn_visits_row_major() {
        let buf = PixelBuffer::from_fn(3, 2, |x, y| px((y * 10 + x) as u8)).unwrap();
        assert_eq!(buf.row(0), &[px(0), px(1), px(2)]);
        assert_eq!(buf.row(1), &[px(10), px(11), px(12)]);
    }

    #[test]
    fn get_out_of_bounds_is_none() {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        assert!(buf.get(2, 0).is_none());
        assert!(buf.get(0, 2).is_none());
        assert!(buf.get_mut(5, 5).is_none());
    }

    #[test]
    #[should_panic(expected = "row index 2 out of bounds")]
    fn row_out_of_bounds_panics() {
        let buf = PixelBuffer::new(2, 2).unwrap();
        let _ = buf.row(2);
    }

    #[test]
    fn rows_iterate_with_full_width() {
        let buf = PixelBuffer::from_fn(5, 4, |x, _| px(x as u8)).unwrap();
        assert_eq!(buf.rows().len(), 4);
        assert!(buf.rows().all(|r| r.len() == 5));
    }

    #[test]
    fn try_clone_is_equal_and_independent() {
        let src = PixelBuffer::from_fn(3, 2, |x, y| px((x + y) as u8)).unwrap();
        let mut copy = src.try_clone().unwrap();
        assert_eq!(copy, src);

        *copy.get_mut(0, 0).unwrap() = Rgb::new(255, 255, 255);
        assert_ne!(copy, src);
        assert_eq!(src.get(0, 0), Some(&px(0)));

        for row in copy.rows_mut() {
            row.fill(Rgb::new(9, 9, 9));
        }
        assert_eq!(src.get(2, 1), Some(&px(3)));
    }

    #[test]
    fn equality_requires_matching_dimensions() {
        let wide = PixelBuffer::new(4, 1).unwrap();
        let tall = PixelBuffer::new(1, 4).unwrap();
        assert_eq!(wide.as_slice(), tall.as_slice());
        assert_ne!(wide, tall);
    }

    #[test]
    fn equality_compares_every_channel() {
        let a = PixelBuffer::filled(2, 2, Rgb::new(1, 2, 3)).unwrap();
        let mut b = a.try_clone().unwrap();
        b.row_mut(1)[1].b = 4;
        assert_ne!(a, b);
    }

    #[test]
    fn imgref_roundtrip() {
        let buf = PixelBuffer::from_fn(3, 2, |x, y| px((y * 3 + x) as u8)).unwrap();
        let view = buf.as_imgref();
        assert_eq!(view.width(), 3);
        assert_eq!(view.height(), 2);

        let copy = PixelBuffer::try_from(view).unwrap();
        assert_eq!(copy, buf);

        let img: ImgVec<Pixel> = buf.into();
        assert_eq!(img.buf().len(), 6);
    }

    #[test]
    fn imgref_with_stride_drops_padding() {
        // 2x2 image stored with stride 3; the third column is padding.
        let data = vec![px(1), px(2), px(99), px(3), px(4), px(99)];
        let view = ImgRef::new_stride(&data[..], 2, 2, 3);
        let buf = PixelBuffer::try_from(view).unwrap();
        assert_eq!(buf.as_slice(), &[px(1), px(2), px(3), px(4)]);
    }

    #[test]
    fn debug_format() {
        let buf = PixelBuffer::new(7, 3).unwrap();
        assert_eq!(format!("{buf:?}"), "PixelBuffer(7x3, RGB8)");
    }
}
