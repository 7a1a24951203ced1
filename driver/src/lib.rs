// Distributed under The MIT License (MIT)
//
// Copyright (c) 2026 The `lpvc` developers
//! # Driver
//!
//! Connects the bitmap buffers of a video host to a frame codec.
//!
//! The host negotiates formats with the functions in [`format`], then opens an [`EncodeSession`]
//! or [`DecodeSession`] and passes raw frame buffers along with their headers. Each call builds a
//! pixel cursor from the header, so the codec always sees pixels in logical order and channel
//! order regardless of the buffer's row direction and padding.
//!
//! The library only emits diagnostics through the `log` facade; installing a logger is up to the
//! host.
//!
//! ## Usage
//!
//! ```
//! use lpvc_driver::{format, BitmapHeader, Decoder, DecodeSession, DibCursorMut, FrameSize, Rgb};
//!
//! /// A decoder that paints every frame in one color.
//! struct Fill(Rgb);
//!
//! impl Decoder for Fill {
//!     type Error = std::io::Error;
//!
//!     fn decode(&mut self, _: &[u8], sink: DibCursorMut<'_>) -> Result<(), Self::Error> {
//!         sink.for_each(|mut pixel| pixel.set(self.0));
//!         Ok(())
//!     }
//! }
//!
//! let output = BitmapHeader::rgb24(2, 2);
//! // The decoder above reads no data, declare that.
//! let input = BitmapHeader { size_image: 0, ..format::compress_get_format(&output) };
//! let mut session = DecodeSession::new(&input, |_: FrameSize| Ok(Fill(Rgb::new(1, 2, 3))))?;
//!
//! let mut pixels = vec![0u8; output.size_image as usize];
//! session.decode(&input, &[], &output, &mut pixels)?;
//! assert_eq!(&pixels[..6], &[3, 2, 1, 3, 2, 1]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
mod codec;
pub mod format;
mod session;
mod settings;

pub use self::codec::{Decoder, EncodedFrame, Encoder, FrameSize};
pub use self::format::{BitmapHeader, Compression, FormatError, FourCc};
pub use self::session::{
    CompressedFrame, DecodeSession, EncodeSession, KeyFramePolicy, SessionError,
};
pub use self::settings::EncoderSettings;

pub use lpvc_dib::{self as dib, Bgr, DibCursor, DibCursorMut, Rgb, Swapped};
