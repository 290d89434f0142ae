//! Flips, transpose, and rotations over [`PixelBuffer`]s.
//!
//! In-place operations (`flip_*`, `reverse_*`) mutate the buffer they are
//! given and never change its dimensions. Operations that may change the
//! dimensions return a new, independently owned buffer and leave the source
//! untouched; the result carries its own width and height.
//!
//! None of these keep state between calls. Buffers are not synchronized:
//! to transform in parallel, give each worker its own
//! [`try_clone`](PixelBuffer::try_clone).

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::reserve::try_vec;

/// Reverse the pixel order within every row. Row order is unchanged.
pub fn reverse_rows(buf: &mut PixelBuffer) {
    for row in buf.rows_mut() {
        row.reverse();
    }
}

/// Reverse the order of the rows themselves. Row contents are unchanged.
///
/// This is a pure top-to-bottom mirror. Rows are swapped pairwise from both
/// ends toward the middle.
pub fn reverse_row_order(buf: &mut PixelBuffer) {
    let width = buf.width();
    let height = buf.height();
    let pixels = buf.as_mut_slice();
    let mut top = 0;
    let mut bottom = height - 1;
    while top < bottom {
        let (upper, lower) = pixels.split_at_mut(bottom * width);
        upper[top * width..(top + 1) * width].swap_with_slice(&mut lower[..width]);
        top += 1;
        bottom -= 1;
    }
}

/// Mirror the image left-to-right, in place.
pub fn flip_horizontal(buf: &mut PixelBuffer) {
    reverse_rows(buf);
}

/// Reverse the row order, then reverse every row's contents, in place.
///
/// Note that the combination is a 180° point reflection, not a plain
/// top-to-bottom mirror. Use [`reverse_row_order`] for the mirror alone.
pub fn flip_vertical(buf: &mut PixelBuffer) {
    reverse_row_order(buf);
    reverse_rows(buf);
}

/// Swap rows and columns: an `H × W` buffer becomes `W × H` with
/// `new[j][i] == old[i][j]`.
///
/// # Errors
///
/// [`Error::Allocation`](crate::Error::Allocation) if the new buffer cannot
/// be allocated. No buffer is returned in that case.
pub fn transpose(src: &PixelBuffer) -> Result<PixelBuffer> {
    let (width, height) = (src.width(), src.height());
    let mut pixels = try_vec(src.pixel_count(), "transposed buffer")?;
    for x in 0..width {
        pixels.extend(src.rows().map(|row| row[x]));
    }
    tracing::debug!(width, height, "transposed buffer");
    Ok(PixelBuffer::from_parts(pixels, height, width))
}

/// Rotate 90° clockwise into a new buffer: transpose, then reverse every row.
///
/// An `H × W` source yields a `W × H` result. The source is not modified.
pub fn rotate_clockwise(src: &PixelBuffer) -> Result<PixelBuffer> {
    let mut out = transpose(src)?;
    reverse_rows(&mut out);
    Ok(out)
}

/// Rotate 90° counter-clockwise into a new buffer: transpose, then reverse
/// the row order.
///
/// An `H × W` source yields a `W × H` result. The source is not modified.
pub fn rotate_counter_clockwise(src: &PixelBuffer) -> Result<PixelBuffer> {
    let mut out = transpose(src)?;
    reverse_row_order(&mut out);
    Ok(out)
}

/// Rotate 180° into a new buffer. Dimensions are unchanged.
pub fn rotate_180(src: &PixelBuffer) -> Result<PixelBuffer> {
    let mut out = src.try_clone()?;
    flip_vertical(&mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Pixel;
    use rayon::prelude::*;
    use rgb::Rgb;
    use test_log::test;

    const A: Pixel = Rgb { r: 10, g: 0, b: 0 };
    const B: Pixel = Rgb { r: 20, g: 0, b: 0 };
    const C: Pixel = Rgb { r: 30, g: 0, b: 0 };
    const D: Pixel = Rgb { r: 0, g: 40, b: 0 };
    const E: Pixel = Rgb { r: 0, g: 50, b: 0 };
    const F: Pixel = Rgb { r: 0, g: 60, b: 0 };

    /// `[[A, B, C], [D, E, F]]`
    fn two_by_three() -> PixelBuffer {
        PixelBuffer::from_rows(&[[A, B, C], [D, E, F]]).unwrap()
    }

    fn gradient(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| {
            Rgb::new(x as u8, y as u8, (x * 7 + y * 13) as u8)
        })
        .unwrap()
    }

    #[test]
    fn transpose_scenario() {
        let t = transpose(&two_by_three()).unwrap();
        assert_eq!((t.width(), t.height()), (2, 3));
        assert_eq!(t, PixelBuffer::from_rows(&[[A, D], [B, E], [C, F]]).unwrap());
    }

    #[test]
    fn transpose_maps_every_coordinate() {
        let src = gradient(5, 3);
        let t = transpose(&src).unwrap();
        assert_eq!((t.width(), t.height()), (3, 5));
        for y in 0..src.height() {
            for x in 0..src.width() {
                assert_eq!(t.get(y, x), src.get(x, y));
            }
        }
    }

    #[test]
    fn transpose_is_an_involution() {
        let src = gradient(7, 4);
        let back = transpose(&transpose(&src).unwrap()).unwrap();
        assert_eq!(back, src);
    }

    #[test]
    fn transpose_single_row_becomes_column() {
        let row = PixelBuffer::from_rows(&[[A, B, C]]).unwrap();
        let col = transpose(&row).unwrap();
        assert_eq!((col.width(), col.height()), (1, 3));
        assert_eq!(col.as_slice(), &[A, B, C]);
    }

    #[test]
    fn rotate_clockwise_scenario() {
        let src = two_by_three();
        let r = rotate_clockwise(&src).unwrap();
        assert_eq!(r, PixelBuffer::from_rows(&[[D, A], [E, B], [F, C]]).unwrap());
        // Source untouched.
        assert_eq!(src, two_by_three());
    }

    #[test]
    fn rotate_counter_clockwise_scenario() {
        let r = rotate_counter_clockwise(&two_by_three()).unwrap();
        assert_eq!(r, PixelBuffer::from_rows(&[[C, F], [B, E], [A, D]]).unwrap());
    }

    #[test]
    fn rotate_clockwise_swaps_dimensions() {
        let r = rotate_clockwise(&gradient(6, 2)).unwrap();
        assert_eq!((r.width(), r.height()), (2, 6));
    }

    #[test]
    fn four_clockwise_rotations_close() {
        let src = gradient(5, 3);
        let mut cur = rotate_clockwise(&src).unwrap();
        for _ in 0..3 {
            cur = rotate_clockwise(&cur).unwrap();
        }
        assert_eq!(cur, src);
    }

    #[test]
    fn counter_clockwise_undoes_clockwise() {
        let src = gradient(4, 9);
        let back = rotate_counter_clockwise(&rotate_clockwise(&src).unwrap()).unwrap();
        assert_eq!(back, src);
    }

    #[test]
    fn two_clockwise_rotations_equal_rotate_180() {
        let src = gradient(3, 5);
        let twice = rotate_clockwise(&rotate_clockwise(&src).unwrap()).unwrap();
        assert_eq!(twice, rotate_180(&src).unwrap());
    }

    #[test]
    fn flip_horizontal_reverses_within_rows_only() {
        let mut buf = two_by_three();
        flip_horizontal(&mut buf);
        assert_eq!(buf, PixelBuffer::from_rows(&[[C, B, A], [F, E, D]]).unwrap());
    }

    #[test]
    fn flip_horizontal_twice_is_identity() {
        let src = gradient(4, 4);
        let mut buf = src.try_clone().unwrap();
        flip_horizontal(&mut buf);
        flip_horizontal(&mut buf);
        assert_eq!(buf, src);
    }

    #[test]
    fn flip_vertical_reverses_rows_and_contents() {
        let mut buf = two_by_three();
        flip_vertical(&mut buf);
        assert_eq!(buf, PixelBuffer::from_rows(&[[F, E, D], [C, B, A]]).unwrap());
    }

    #[test]
    fn reverse_row_order_is_a_pure_mirror() {
        let mut buf = PixelBuffer::from_rows(&[[A, B], [C, D], [E, F]]).unwrap();
        reverse_row_order(&mut buf);
        assert_eq!(buf, PixelBuffer::from_rows(&[[E, F], [C, D], [A, B]]).unwrap());
    }

    #[test]
    fn reverse_row_order_even_height() {
        let src = gradient(3, 4);
        let mut buf = src.try_clone().unwrap();
        reverse_row_order(&mut buf);
        for y in 0..4 {
            assert_eq!(buf.row(y), src.row(3 - y));
        }
    }

    #[test]
    fn single_pixel_is_fixed_by_everything() {
        let src = PixelBuffer::filled(1, 1, A).unwrap();
        let mut buf = src.try_clone().unwrap();
        flip_horizontal(&mut buf);
        flip_vertical(&mut buf);
        reverse_row_order(&mut buf);
        assert_eq!(buf, src);
        assert_eq!(transpose(&src).unwrap(), src);
        assert_eq!(rotate_clockwise(&src).unwrap(), src);
        assert_eq!(rotate_counter_clockwise(&src).unwrap(), src);
    }

    #[test]
    fn transformed_buffers_do_not_alias_source() {
        let src = two_by_three();
        let mut rotated = rotate_clockwise(&src).unwrap();
        rotated.as_mut_slice().fill(Rgb::new(1, 1, 1));
        assert_eq!(src, two_by_three());
    }

    #[test]
    fn parallel_workers_use_their_own_copies() {
        let src = gradient(16, 9);
        let expected = rotate_clockwise(&src).unwrap();

        let copies: Vec<PixelBuffer> = (0..8).map(|_| src.try_clone().unwrap()).collect();
        let results: Vec<PixelBuffer> = copies
            .into_par_iter()
            .map(|mut buf| {
                flip_horizontal(&mut buf);
                flip_horizontal(&mut buf);
                rotate_clockwise(&buf)
            })
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(results.len(), 8);
        assert!(results.iter().all(|r| *r == expected));
    }
}
