// Distributed under The MIT License (MIT)
//
// Copyright (c) 2026 The `lpvc` developers
//! # DIB
//!
//! Pixel access to 24-bit device independent bitmaps, without copying them.
//!
//! Raw bitmap buffers handed out by a host differ in ways a codec should not have to care about:
//!
//! - Rows may be stored top-to-bottom or bottom-to-top, signaled by the sign of the height.
//! - Rows may be padded to a 32-bit boundary, or packed at exactly three bytes per pixel.
//! - Samples are stored as blue, green, red while codecs work with red, green, blue.
//!
//! A [`DibCursor`] or [`DibCursorMut`] resolves all of this once and then walks the buffer in
//! logical order, yielding [`Swapped`] references that reorder the channels on access.
//!
//! ## Usage
//!
//! ```
//! use lpvc_dib::{DibCursor, DibCursorMut, DibLayout, Geometry, Rgb, RowLayout};
//!
//! // A 3×2 bitmap, stored bottom-up with padded rows: 9 bytes of samples and 3 of padding each.
//! let layout = DibLayout::new(Geometry::new(3, 2), RowLayout::Padded)?;
//! assert_eq!(layout.stride(), 12);
//! let mut bitmap = vec![0u8; layout.byte_len()];
//!
//! // Write a gradient in logical order.
//! for (i, mut pixel) in DibCursorMut::new(layout, &mut bitmap)?.enumerate() {
//!     pixel.set(Rgb::new(i as u8, 0, 0xff));
//! }
//!
//! // The first logical row is the last one in memory.
//! assert_eq!(&bitmap[12..15], &[0xff, 0, 0]);
//!
//! let first: Rgb = DibCursor::new(layout, &bitmap)?.get().into();
//! assert_eq!(first, Rgb::new(0, 0, 0xff));
//! # Ok::<(), lpvc_dib::DibError>(())
//! ```
#![cfg_attr(not(test), no_std)]
// The only module allowed to be `unsafe` is `cursor`. It hands out references into a buffer at
// offsets it computes itself, which the borrow checker can not follow for bottom-up rows.
#![deny(unsafe_code)]

mod cursor;
mod layout;
mod pixel;
mod stride;
mod swap;

pub use self::cursor::{DibCursor, DibCursorMut};
pub use self::layout::{DibError, DibLayout, Geometry, RowOrder};
pub use self::pixel::{Bgr, Rgb};
pub use self::stride::{checked_padded_stride, padded_stride, RowLayout, BYTES_PER_PIXEL};
pub use self::swap::Swapped;
