//! Bitmap format headers and the negotiation of supported formats.
//!
//! The host describes every buffer with a header in the style of `BITMAPINFOHEADER`. The codec
//! accepts uncompressed 24-bit true color frames and produces 24-bit frames tagged with its own
//! four character code, and the reverse for decompression. Anything else is rejected up front.
use core::fmt;

use lpvc_dib::{DibLayout, Geometry, RowLayout};

/// A four character code identifying a compression.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc(pub [u8; 4]);

/// The compression of a bitmap buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Uncompressed samples, `BI_RGB`.
    Rgb,
    /// Compressed by the codec with that code.
    FourCc(FourCc),
}

/// The subset of a bitmap header that describes a frame buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitmapHeader {
    /// The number of pixel columns, never negative for a valid header.
    pub width: i32,
    /// The number of rows, positive if the rows are stored bottom-up.
    pub height: i32,
    /// Bits per pixel.
    pub bit_count: u16,
    pub compression: Compression,
    /// The number of bytes of image data. May be zero for uncompressed bitmaps.
    pub size_image: u32,
}

/// Error that occurs when a header describes a format or buffer that can not be handled.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("unsupported format: {bit_count} bits per pixel, compression {compression}")]
    BadFormat {
        bit_count: u16,
        compression: Compression,
    },
    #[error("bitmap width {0} is negative")]
    NegativeWidth(i32),
    #[error(transparent)]
    Layout(#[from] lpvc_dib::DibError),
}

impl FourCc {
    /// The code of our own compressed frames.
    pub const LPVC: FourCc = FourCc(*b"LPVC");

    /// The little-endian numeric value, as stored in headers.
    pub const fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    pub const fn from_u32(code: u32) -> Self {
        FourCc(code.to_le_bytes())
    }
}

impl BitmapHeader {
    /// The bits per pixel of the only supported sample format.
    pub const TRUE_COLOR: u16 = 24;

    /// An uncompressed 24-bit header with padded rows.
    ///
    /// The image size is computed from the padded stride, saturating for absurd dimensions.
    pub fn rgb24(width: i32, height: i32) -> Self {
        let mut header = BitmapHeader {
            width,
            height,
            bit_count: Self::TRUE_COLOR,
            compression: Compression::Rgb,
            size_image: 0,
        };

        header.size_image = header
            .layout()
            .ok()
            .and_then(|layout| u32::try_from(layout.byte_len()).ok())
            .unwrap_or(u32::MAX);
        header
    }

    /// The dimensions of the bitmap.
    pub fn geometry(&self) -> Result<Geometry, FormatError> {
        let width =
            usize::try_from(self.width).map_err(|_| FormatError::NegativeWidth(self.width))?;
        Ok(Geometry::new(width, self.height as isize))
    }

    /// The storage convention of rows in the bitmap's buffer.
    ///
    /// Uncompressed device independent bitmaps always pad their rows to 32 bits.
    pub fn row_layout(&self) -> RowLayout {
        RowLayout::Padded
    }

    /// The layout of the bitmap's buffer, with the row direction from the sign of its height.
    pub fn layout(&self) -> Result<DibLayout, FormatError> {
        Ok(DibLayout::new(self.geometry()?, self.row_layout())?)
    }

    fn is(&self, compression: Compression) -> bool {
        self.bit_count == Self::TRUE_COLOR && self.compression == compression
    }

    fn reject(&self) -> FormatError {
        log::debug!(
            "Rejecting format with {} bits per pixel and compression {}",
            self.bit_count,
            self.compression
        );

        FormatError::BadFormat {
            bit_count: self.bit_count,
            compression: self.compression,
        }
    }
}

/// Check that `input` can be compressed, optionally into the format `output`.
pub fn compress_query(
    input: &BitmapHeader,
    output: Option<&BitmapHeader>,
) -> Result<(), FormatError> {
    if !input.is(Compression::Rgb) {
        return Err(input.reject());
    }

    match output {
        Some(output) if !output.is(Compression::FourCc(FourCc::LPVC)) => Err(output.reject()),
        _ => Ok(()),
    }
}

/// The compressed format for frames of the `input` format.
pub fn compress_get_format(input: &BitmapHeader) -> BitmapHeader {
    BitmapHeader {
        bit_count: BitmapHeader::TRUE_COLOR,
        compression: Compression::FourCc(FourCc::LPVC),
        ..*input
    }
}

/// The largest compressed frame that the `input` format can produce.
///
/// This is the size of the uncompressed image, computed from its layout when the header leaves
/// it unspecified.
pub fn compress_get_size(input: &BitmapHeader) -> Result<usize, FormatError> {
    match input.size_image {
        0 => Ok(input.layout()?.byte_len()),
        size => Ok(size as usize),
    }
}

/// Check that `input` can be decompressed, optionally into the format `output`.
pub fn decompress_query(
    input: &BitmapHeader,
    output: Option<&BitmapHeader>,
) -> Result<(), FormatError> {
    if !input.is(Compression::FourCc(FourCc::LPVC)) {
        return Err(input.reject());
    }

    match output {
        Some(output) if !output.is(Compression::Rgb) => Err(output.reject()),
        _ => Ok(()),
    }
}

/// The uncompressed format for frames of the `input` format.
pub fn decompress_get_format(input: &BitmapHeader) -> BitmapHeader {
    BitmapHeader {
        bit_count: BitmapHeader::TRUE_COLOR,
        compression: Compression::Rgb,
        ..*input
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCc({self})")
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compression::Rgb => f.write_str("RGB"),
            Compression::FourCc(code) => write!(f, "'{code}'"),
        }
    }
}
