//! Row strides of 24-bit bitmaps.
//!
//! Uncompressed device independent bitmaps pad every row to a multiple of 32 bits. Buffers that
//! come from other sources may instead pack their rows tightly, at exactly three bytes per pixel.
//! Which one applies is a property of the buffer's format header, not of the pixel data.

/// The number of bytes of a single physical pixel sample.
pub const BYTES_PER_PIXEL: usize = 3;

const BITS_PER_PIXEL: usize = 24;

/// The storage convention of the rows of a bitmap buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RowLayout {
    /// Each row is padded to the next multiple of four bytes.
    #[default]
    Padded,
    /// Rows follow each other without any padding.
    Packed,
}

/// The byte length of a row of `width` pixels, padded to a 32-bit boundary.
///
/// Returns `None` if the computation overflows.
pub fn checked_padded_stride(width: usize) -> Option<usize> {
    let bits = width.checked_mul(BITS_PER_PIXEL)?.checked_add(31)?;
    Some((bits & !31) >> 3)
}

/// The byte length of a row of `width` pixels, padded to a 32-bit boundary.
///
/// # Panics
///
/// If the row length is not representable. Such a width can only come from a corrupt format
/// header and every address derived from it would be wrong.
pub fn padded_stride(width: usize) -> usize {
    match checked_padded_stride(width) {
        Some(stride) => stride,
        None => panic!("a row of {width} pixels does not fit into memory"),
    }
}

impl RowLayout {
    /// The byte length of one stored row, including padding.
    ///
    /// Returns `None` if the computation overflows.
    pub fn checked_stride(self, width: usize) -> Option<usize> {
        match self {
            RowLayout::Padded => checked_padded_stride(width),
            RowLayout::Packed => width.checked_mul(BYTES_PER_PIXEL),
        }
    }

    /// The byte length of one stored row, including padding.
    ///
    /// # Panics
    ///
    /// If the row length is not representable, see [`padded_stride`].
    pub fn stride(self, width: usize) -> usize {
        match self.checked_stride(width) {
            Some(stride) => stride,
            None => panic!("a row of {width} pixels does not fit into memory"),
        }
    }

    /// The number of padding bytes at the end of each row.
    pub fn padding(self, width: usize) -> usize {
        self.stride(width) - width * BYTES_PER_PIXEL
    }
}

#[test]
fn padded_strides() {
    assert_eq!(padded_stride(0), 0);
    assert_eq!(padded_stride(1), 4);
    assert_eq!(padded_stride(2), 8);
    assert_eq!(padded_stride(3), 12);
    assert_eq!(padded_stride(4), 12);
    assert_eq!(padded_stride(5), 16);
    assert_eq!(padded_stride(640), 1920);

    for width in 0..1024 {
        let stride = padded_stride(width);
        assert_eq!(stride % 4, 0, "width {}", width);
        assert!(stride >= width * BYTES_PER_PIXEL, "width {}", width);
        assert!(stride - width * BYTES_PER_PIXEL < 4, "width {}", width);
    }
}

#[test]
fn packed_strides() {
    for width in 0..1024 {
        assert_eq!(RowLayout::Packed.stride(width), width * 3);
        assert_eq!(RowLayout::Packed.padding(width), 0);
    }

    assert_eq!(RowLayout::Padded.padding(1), 1);
    assert_eq!(RowLayout::Padded.padding(4), 0);
}

#[test]
fn stride_overflow() {
    assert_eq!(checked_padded_stride(usize::MAX), None);
    assert_eq!(checked_padded_stride(usize::MAX / 24 + 1), None);
    assert_eq!(RowLayout::Packed.checked_stride(usize::MAX / 2), None);
    assert!(std::panic::catch_unwind(|| padded_stride(usize::MAX)).is_err());
}
