// Distributed under The MIT License (MIT)
//
// Copyright (c) 2026 The `lpvc` developers
#![allow(unsafe_code)]
//! Forward cursors over the pixels of a bitmap buffer.
//!
//! A cursor presents the pixels of a buffer in logical order: left to right, then row by row from
//! the top of the image. Where the rows are in memory, and how much padding they carry, is
//! resolved once from a [`DibLayout`]. Each step then only moves an offset. Pixels are handed out
//! as [`Swapped`] references that do the channel reordering, the bytes are never copied.
//!
//! This is the only module allowed to use `unsafe`. The invariant all access relies on is that
//! the cursor's base pointer is valid for [`DibLayout::byte_len`] bytes, for reads in case of
//! [`DibCursor`] and for reads and writes in case of [`DibCursorMut`], and that the offset of the
//! current pixel is in bounds while `remaining` is not zero.
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::layout::{DibError, DibLayout};
use crate::pixel::Bgr;
use crate::stride::BYTES_PER_PIXEL;
use crate::swap::Swapped;

/// Iteration state shared by both cursors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Walk {
    width: usize,
    column: usize,
    row: usize,
    /// Byte offset of the current pixel.
    offset: usize,
    /// Added to the offset when a row is complete, moving from one past the row's last pixel to
    /// the first pixel of the next logical row.
    wrap: isize,
    /// Pixels left, including the current one.
    remaining: usize,
}

/// A read-only cursor over the pixels of a bitmap.
///
/// This is a small value type. Copies share the underlying buffer and continue independently from
/// the same position.
///
/// # Usage
///
/// ```
/// use lpvc_dib::{DibCursor, DibLayout, Geometry, Rgb, RowLayout};
///
/// // Two rows of one pixel each, padded to four bytes, stored bottom-up.
/// let bytes = [1u8, 2, 3, 0, 4, 5, 6, 0];
/// let layout = DibLayout::new(Geometry::new(1, 2), RowLayout::Padded)?;
/// let cursor = DibCursor::new(layout, &bytes)?;
///
/// let pixels: Vec<Rgb> = cursor.map(Rgb::from).collect();
/// assert_eq!(pixels, [Rgb::new(6, 5, 4), Rgb::new(3, 2, 1)]);
/// # Ok::<(), lpvc_dib::DibError>(())
/// ```
#[derive(Clone, Copy)]
pub struct DibCursor<'data> {
    base: NonNull<u8>,
    layout: DibLayout,
    walk: Walk,
    data: PhantomData<&'data [u8]>,
}

/// A cursor over the pixels of a bitmap that can also assign them.
///
/// Unlike [`DibCursor`] this is not `Copy`, there is only ever one cursor writing to a buffer.
///
/// # Usage
///
/// ```
/// use lpvc_dib::{DibCursorMut, DibLayout, Geometry, Rgb, RowLayout};
///
/// let mut bytes = [0u8; 8];
/// let layout = DibLayout::new(Geometry::new(1, 2), RowLayout::Padded)?;
///
/// let colors = [Rgb::new(6, 5, 4), Rgb::new(3, 2, 1)];
/// for (mut pixel, color) in DibCursorMut::new(layout, &mut bytes)?.zip(colors) {
///     pixel.set(color);
/// }
///
/// assert_eq!(bytes, [1, 2, 3, 0, 4, 5, 6, 0]);
/// # Ok::<(), lpvc_dib::DibError>(())
/// ```
pub struct DibCursorMut<'data> {
    base: NonNull<u8>,
    layout: DibLayout,
    walk: Walk,
    data: PhantomData<&'data mut [u8]>,
}

impl Walk {
    fn new(layout: &DibLayout) -> Self {
        let remaining = layout.pixel_count();
        let offset = if remaining == 0 {
            0
        } else {
            layout.row_start(0)
        };

        // Fits: a row's pixels are at most its stride, which fits `isize`.
        let row_bytes = (layout.width() * BYTES_PER_PIXEL) as isize;
        // Offsets are wrapping, only the resulting offsets of valid pixels matter.
        let wrap = layout.row_step().wrapping_sub(row_bytes);

        Walk {
            width: layout.width(),
            column: 0,
            row: 0,
            offset,
            wrap,
            remaining,
        }
    }

    fn advance(&mut self) {
        debug_assert!(self.remaining > 0, "advanced past the last pixel");
        if self.remaining == 0 {
            return;
        }

        self.remaining -= 1;
        self.column += 1;
        // Past the end the offset is never used, let it wrap.
        self.offset = self.offset.wrapping_add(BYTES_PER_PIXEL);

        if self.column == self.width {
            self.column = 0;
            self.row += 1;
            self.offset = self.offset.wrapping_add_signed(self.wrap);
        }
    }

    /// The offset of the current pixel, checked against the end of iteration.
    fn current(&self) -> usize {
        assert!(self.remaining > 0, "dereferenced past the last pixel");
        self.offset
    }
}

impl<'data> DibCursor<'data> {
    /// Create a cursor at the first logical pixel of a buffer.
    ///
    /// Fails if the buffer is shorter than the layout requires.
    pub fn new(layout: DibLayout, data: &'data [u8]) -> Result<Self, DibError> {
        layout.fits(data.len())?;
        // Safety: validated the length just now, and we borrow it for `'data`.
        Ok(unsafe { Self::from_raw_parts(layout, NonNull::from(data).cast()) })
    }

    /// Create a cursor from a pointer to the first byte of a buffer.
    ///
    /// # Safety
    ///
    /// The pointer must be valid for reads of [`DibLayout::byte_len`] bytes during `'data`, and
    /// the bytes must not be written through another pointer during that time.
    pub unsafe fn from_raw_parts(layout: DibLayout, base: NonNull<u8>) -> Self {
        DibCursor {
            base,
            walk: Walk::new(&layout),
            layout,
            data: PhantomData,
        }
    }

    pub fn layout(&self) -> DibLayout {
        self.layout
    }

    /// The logical `(row, column)` of the current pixel.
    pub fn position(&self) -> (usize, usize) {
        (self.walk.row, self.walk.column)
    }

    /// The number of pixels left, including the current one.
    pub fn remaining(&self) -> usize {
        self.walk.remaining
    }

    /// Move to the next logical pixel.
    ///
    /// Advancing past the last pixel is a logic error. It panics in debug builds and otherwise
    /// leaves the cursor exhausted.
    pub fn advance(&mut self) {
        self.walk.advance();
    }

    /// A reference to the current pixel, without advancing.
    ///
    /// # Panics
    ///
    /// If all pixels have been visited.
    pub fn get(&self) -> Swapped<&'data Bgr> {
        let offset = self.walk.current();
        // Safety: the offset is in bounds while pixels remain, see module invariant.
        Swapped::new(unsafe { self.sample(offset) })
    }

    /// A reference to the current pixel, without checking for the end.
    ///
    /// # Safety
    ///
    /// There must be a pixel left, that is [`Self::remaining`] is not zero.
    pub unsafe fn get_unchecked(&self) -> Swapped<&'data Bgr> {
        debug_assert!(self.walk.remaining > 0, "dereferenced past the last pixel");
        Swapped::new(unsafe { self.sample(self.walk.offset) })
    }

    unsafe fn sample(&self, offset: usize) -> &'data Bgr {
        debug_assert!(offset + BYTES_PER_PIXEL <= self.layout.byte_len());
        // `Bgr` has alignment 1 and every bit pattern is valid.
        unsafe { &*self.base.as_ptr().add(offset).cast::<Bgr>() }
    }
}

impl<'data> DibCursorMut<'data> {
    /// Create a cursor at the first logical pixel of a buffer.
    ///
    /// Fails if the buffer is shorter than the layout requires.
    pub fn new(layout: DibLayout, data: &'data mut [u8]) -> Result<Self, DibError> {
        layout.fits(data.len())?;
        // Safety: validated the length just now, and we borrow it uniquely for `'data`.
        Ok(unsafe { Self::from_raw_parts(layout, NonNull::from(data).cast()) })
    }

    /// Create a cursor from a pointer to the first byte of a buffer.
    ///
    /// # Safety
    ///
    /// The pointer must be valid for reads and writes of [`DibLayout::byte_len`] bytes during
    /// `'data`, and the bytes must not be accessed through another pointer during that time.
    pub unsafe fn from_raw_parts(layout: DibLayout, base: NonNull<u8>) -> Self {
        DibCursorMut {
            base,
            walk: Walk::new(&layout),
            layout,
            data: PhantomData,
        }
    }

    pub fn layout(&self) -> DibLayout {
        self.layout
    }

    /// The logical `(row, column)` of the current pixel.
    pub fn position(&self) -> (usize, usize) {
        (self.walk.row, self.walk.column)
    }

    /// The number of pixels left, including the current one.
    pub fn remaining(&self) -> usize {
        self.walk.remaining
    }

    /// Move to the next logical pixel.
    ///
    /// Advancing past the last pixel is a logic error. It panics in debug builds and otherwise
    /// leaves the cursor exhausted.
    pub fn advance(&mut self) {
        self.walk.advance();
    }

    /// A read-only reference to the current pixel, without advancing.
    ///
    /// # Panics
    ///
    /// If all pixels have been visited.
    pub fn get(&self) -> Swapped<&'_ Bgr> {
        let offset = self.walk.current();
        // Safety: the offset is in bounds while pixels remain, see module invariant.
        Swapped::new(unsafe { &*self.sample(offset) })
    }

    /// An assignable reference to the current pixel, without advancing.
    ///
    /// # Panics
    ///
    /// If all pixels have been visited.
    pub fn get_mut(&mut self) -> Swapped<&'_ mut Bgr> {
        let offset = self.walk.current();
        // Safety: as above, and the reference borrows `self` uniquely.
        Swapped::new(unsafe { &mut *self.sample(offset) })
    }

    /// Borrow a read-only cursor at the same position.
    pub fn as_cursor(&self) -> DibCursor<'_> {
        DibCursor {
            base: self.base,
            layout: self.layout,
            walk: self.walk,
            data: PhantomData,
        }
    }

    unsafe fn sample(&self, offset: usize) -> *mut Bgr {
        debug_assert!(offset + BYTES_PER_PIXEL <= self.layout.byte_len());
        unsafe { self.base.as_ptr().add(offset).cast::<Bgr>() }
    }
}

impl<'data> Iterator for DibCursor<'data> {
    type Item = Swapped<&'data Bgr>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.walk.remaining == 0 {
            return None;
        }

        // Safety: checked that a pixel remains.
        let pixel = unsafe { self.get_unchecked() };
        self.walk.advance();
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.remaining, Some(self.walk.remaining))
    }
}

impl<'data> Iterator for DibCursorMut<'data> {
    type Item = Swapped<&'data mut Bgr>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.walk.remaining == 0 {
            return None;
        }

        // Safety: a pixel remains so the offset is in bounds. Each logical pixel has its own
        // three bytes, rows do not overlap as the stride covers all pixels of a row, and the
        // cursor moves past this pixel before it is handed out. The reference is thus unique for
        // the rest of `'data`.
        let sample = unsafe { &mut *self.sample(self.walk.offset) };
        self.walk.advance();
        Some(Swapped::new(sample))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.remaining, Some(self.walk.remaining))
    }
}

impl ExactSizeIterator for DibCursor<'_> {}
impl ExactSizeIterator for DibCursorMut<'_> {}
impl FusedIterator for DibCursor<'_> {}
impl FusedIterator for DibCursorMut<'_> {}

impl PartialEq for DibCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.layout == other.layout && self.walk == other.walk
    }
}

impl Eq for DibCursor<'_> {}

impl fmt::Debug for DibCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DibCursor")
            .field("layout", &self.layout)
            .field("position", &self.position())
            .field("remaining", &self.walk.remaining)
            .finish()
    }
}

impl fmt::Debug for DibCursorMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DibCursorMut")
            .field("layout", &self.layout)
            .field("position", &self.position())
            .field("remaining", &self.walk.remaining)
            .finish()
    }
}
