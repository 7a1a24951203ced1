//! Geometry and address arithmetic of bitmap buffers.
//!
//! A [`Geometry`] is what a format header tells us: a width in pixels and a signed height whose
//! sign selects the direction of rows in memory. Together with the [`RowLayout`] of the buffer it
//! is validated into a [`DibLayout`], which answers where each logical pixel is stored.
use core::fmt;

use crate::stride::{RowLayout, BYTES_PER_PIXEL};

/// Dimensions of a bitmap as declared by its header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Geometry {
    /// The number of pixel columns.
    pub width: usize,
    /// The number of rows, positive if rows are stored bottom-to-top.
    pub height: isize,
}

/// Which physical row holds the first logical row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowOrder {
    /// The first logical row is the last row in memory.
    BottomUp,
    /// The first logical row is the first row in memory.
    TopDown,
}

/// A validated layout of a 24-bit bitmap buffer.
///
/// The invariant is that the whole layout fits into memory, and that the stride and every row
/// offset can be expressed as a signed byte offset. All pixel offsets computed from it are therefore in bounds
/// of a buffer of at least [`DibLayout::byte_len`] bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DibLayout {
    width: usize,
    rows: usize,
    stride: usize,
    row_layout: RowLayout,
    order: RowOrder,
    /// The total number of bytes, as proof of calculation basically.
    total: usize,
}

/// Error that occurs when a layout or buffer does not describe a valid bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DibError {
    kind: DibErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DibErrorKind {
    StrideOverflow,
    OutOfMemory,
    BufferTooSmall { required: usize, actual: usize },
}

impl Geometry {
    pub const fn new(width: usize, height: isize) -> Self {
        Geometry { width, height }
    }

    /// The row direction signaled by the sign of the height.
    pub const fn row_order(&self) -> RowOrder {
        if self.height > 0 {
            RowOrder::BottomUp
        } else {
            RowOrder::TopDown
        }
    }

    /// The number of rows, regardless of direction.
    pub const fn rows(&self) -> usize {
        self.height.unsigned_abs()
    }

    /// The number of logical pixels, if representable.
    pub const fn pixel_count(&self) -> Option<usize> {
        self.width.checked_mul(self.rows())
    }
}

impl RowOrder {
    /// The physical row index of a logical row.
    fn physical_row(self, row: usize, rows: usize) -> usize {
        match self {
            RowOrder::BottomUp => rows - 1 - row,
            RowOrder::TopDown => row,
        }
    }
}

impl DibLayout {
    /// Validate a layout, with the row direction taken from the sign of the height.
    pub fn new(geometry: Geometry, row_layout: RowLayout) -> Result<Self, DibError> {
        Self::with_row_order(geometry, row_layout, geometry.row_order())
    }

    /// Validate a layout with an explicit row direction.
    ///
    /// Only the magnitude of the height is used.
    pub fn with_row_order(
        geometry: Geometry,
        row_layout: RowLayout,
        order: RowOrder,
    ) -> Result<Self, DibError> {
        let width = geometry.width;
        let rows = geometry.rows();

        let stride = row_layout
            .checked_stride(width)
            .filter(|&stride| isize::try_from(stride).is_ok())
            .ok_or(DibErrorKind::StrideOverflow)?;
        let total = stride
            .checked_mul(rows)
            .filter(|&total| isize::try_from(total).is_ok())
            .ok_or(DibErrorKind::OutOfMemory)?;

        Ok(DibLayout {
            width,
            rows,
            stride,
            row_layout,
            order,
            total,
        })
    }

    /// A packed, top-down layout as produced by plain `Vec<[u8; 3]>`-like buffers.
    pub fn packed(width: usize, rows: usize) -> Result<Self, DibError> {
        let height = isize::try_from(rows).map_err(|_| DibErrorKind::OutOfMemory)?;
        Self::with_row_order(
            Geometry::new(width, height),
            RowLayout::Packed,
            RowOrder::TopDown,
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The byte length of one stored row, including padding.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row_layout(&self) -> RowLayout {
        self.row_layout
    }

    pub fn row_order(&self) -> RowOrder {
        self.order
    }

    /// The number of bytes a buffer needs for this layout.
    pub fn byte_len(&self) -> usize {
        self.total
    }

    /// The number of logical pixels.
    pub fn pixel_count(&self) -> usize {
        // Can't overflow: a non-empty layout has at least three bytes per pixel in `total`.
        self.width * self.rows
    }

    /// Check that a buffer of `len` bytes can hold this layout.
    pub fn fits(&self, len: usize) -> Result<(), DibError> {
        if len < self.total {
            return Err(DibErrorKind::BufferTooSmall {
                required: self.total,
                actual: len,
            }
            .into());
        }

        Ok(())
    }

    /// The byte offset of the first pixel of a logical row.
    ///
    /// # Panics
    ///
    /// If `row` is not smaller than the number of rows.
    pub fn row_start(&self, row: usize) -> usize {
        assert!(row < self.rows, "row {row} out of {} rows", self.rows);
        self.order.physical_row(row, self.rows) * self.stride
    }

    /// The byte offset of a logical pixel.
    ///
    /// # Panics
    ///
    /// If the position is outside of the bitmap.
    pub fn pixel_offset(&self, row: usize, column: usize) -> usize {
        assert!(column < self.width, "column {column} out of {}", self.width);
        self.row_start(row) + column * BYTES_PER_PIXEL
    }

    /// The signed byte offset between the first pixels of two successive logical rows.
    pub(crate) fn row_step(&self) -> isize {
        // Fits: validated on construction.
        let stride = self.stride as isize;
        match self.order {
            RowOrder::BottomUp => -stride,
            RowOrder::TopDown => stride,
        }
    }
}

impl DibError {
    /// Whether the error is due to a buffer that is shorter than its layout.
    pub fn is_buffer_too_small(&self) -> bool {
        matches!(self.kind, DibErrorKind::BufferTooSmall { .. })
    }
}

impl From<DibErrorKind> for DibError {
    fn from(kind: DibErrorKind) -> Self {
        DibError { kind }
    }
}

impl fmt::Display for DibError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DibErrorKind::StrideOverflow => write!(f, "row stride does not fit into memory"),
            DibErrorKind::OutOfMemory => write!(f, "bitmap does not fit into memory"),
            DibErrorKind::BufferTooSmall { required, actual } => write!(
                f,
                "bitmap requires {required} bytes but the buffer holds {actual}"
            ),
        }
    }
}

impl core::error::Error for DibError {}

#[test]
fn row_direction_from_height() {
    assert_eq!(Geometry::new(4, 3).row_order(), RowOrder::BottomUp);
    assert_eq!(Geometry::new(4, -3).row_order(), RowOrder::TopDown);
    assert_eq!(Geometry::new(4, 0).row_order(), RowOrder::TopDown);
    assert_eq!(Geometry::new(4, -3).rows(), 3);
    assert_eq!(Geometry::new(4, -3).pixel_count(), Some(12));
}

#[test]
fn offsets() {
    let bottom_up = DibLayout::new(Geometry::new(1, 3), RowLayout::Padded).unwrap();
    assert_eq!(bottom_up.stride(), 4);
    assert_eq!(bottom_up.byte_len(), 12);
    assert_eq!(bottom_up.row_start(0), 8);
    assert_eq!(bottom_up.row_start(2), 0);
    assert_eq!(bottom_up.row_step(), -4);

    let top_down = DibLayout::new(Geometry::new(2, -3), RowLayout::Packed).unwrap();
    assert_eq!(top_down.stride(), 6);
    assert_eq!(top_down.row_start(0), 0);
    assert_eq!(top_down.pixel_offset(2, 1), 15);
    assert_eq!(top_down.row_step(), 6);
    assert_eq!(DibLayout::packed(2, 3).unwrap(), top_down);
}

#[test]
fn empty_layouts() {
    for geometry in [Geometry::new(0, 5), Geometry::new(5, 0), Geometry::new(0, 0)] {
        let layout = DibLayout::new(geometry, RowLayout::Padded).unwrap();
        assert_eq!(layout.pixel_count(), 0);
        assert!(layout.fits(0).is_ok());
    }
}

#[test]
fn too_large() {
    let wide = Geometry::new(usize::MAX / 2, 1);
    assert!(DibLayout::new(wide, RowLayout::Padded).is_err());
    assert!(DibLayout::new(wide, RowLayout::Packed).is_err());

    // Even without any rows, the stride must be a valid offset.
    let flat = Geometry::new(usize::MAX / 4, 0);
    assert!(DibLayout::new(flat, RowLayout::Packed).is_err());

    let tall = Geometry::new(1 << 20, isize::MAX);
    assert!(DibLayout::new(tall, RowLayout::Padded).is_err());

    let layout = DibLayout::new(Geometry::new(2, 2), RowLayout::Padded).unwrap();
    let err = layout.fits(15).unwrap_err();
    assert!(err.is_buffer_too_small());
}
