//! The interface of the frame codec.
//!
//! The codec itself is not part of this crate. It consumes and produces pixels through the
//! cursors of `lpvc-dib` and never learns how the host's buffers are laid out.
use core::fmt;

use lpvc_dib::{DibCursor, DibCursorMut};

use crate::format::{BitmapHeader, FormatError};

/// The dimensions a codec is created for.
///
/// Unlike a bitmap header the height is always positive, the row direction of a buffer is
/// resolved by the cursors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameSize {
    pub width: usize,
    pub height: usize,
}

/// The result of encoding one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodedFrame {
    /// The number of bytes written to the front of the output buffer.
    pub bytes_written: usize,
    /// Whether the frame can be decoded without any previous frame.
    pub key_frame: bool,
}

/// A frame encoder.
///
/// The encoder advances the `source` exactly once for every pixel, in logical row-major order.
pub trait Encoder {
    /// The codec-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Compress one frame into `output`.
    ///
    /// With `force_key_frame` the frame must not depend on previous frames. The encoder may still
    /// produce a key frame when it is not requested.
    fn encode(
        &mut self,
        source: DibCursor<'_>,
        output: &mut [u8],
        force_key_frame: bool,
    ) -> Result<EncodedFrame, Self::Error>;
}

/// A frame decoder.
///
/// The decoder assigns every pixel of the `sink` exactly once, in logical row-major order.
pub trait Decoder {
    /// The codec-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Decompress one frame from `input`.
    fn decode(&mut self, input: &[u8], sink: DibCursorMut<'_>) -> Result<(), Self::Error>;
}

impl FrameSize {
    /// The size of the frames described by a bitmap header, regardless of row direction.
    pub fn from_header(header: &BitmapHeader) -> Result<Self, FormatError> {
        let geometry = header.geometry()?;
        Ok(FrameSize {
            width: geometry.width,
            height: geometry.rows(),
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl<E: Encoder + ?Sized> Encoder for &'_ mut E {
    type Error = E::Error;

    fn encode(
        &mut self,
        source: DibCursor<'_>,
        output: &mut [u8],
        force_key_frame: bool,
    ) -> Result<EncodedFrame, Self::Error> {
        (**self).encode(source, output, force_key_frame)
    }
}

impl<D: Decoder + ?Sized> Decoder for &'_ mut D {
    type Error = D::Error;

    fn decode(&mut self, input: &[u8], sink: DibCursorMut<'_>) -> Result<(), Self::Error> {
        (**self).decode(input, sink)
    }
}

impl<E: Encoder + ?Sized> Encoder for Box<E> {
    type Error = E::Error;

    fn encode(
        &mut self,
        source: DibCursor<'_>,
        output: &mut [u8],
        force_key_frame: bool,
    ) -> Result<EncodedFrame, Self::Error> {
        (**self).encode(source, output, force_key_frame)
    }
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    type Error = D::Error;

    fn decode(&mut self, input: &[u8], sink: DibCursorMut<'_>) -> Result<(), Self::Error> {
        (**self).decode(input, sink)
    }
}

#[test]
fn frame_size_ignores_direction() {
    let up = BitmapHeader::rgb24(320, 240);
    let down = BitmapHeader::rgb24(320, -240);
    let expected = FrameSize {
        width: 320,
        height: 240,
    };

    assert_eq!(FrameSize::from_header(&up).unwrap(), expected);
    assert_eq!(FrameSize::from_header(&down).unwrap(), expected);
    assert_eq!(expected.pixel_count(), 76800);
}
