use lpvc_driver::{
    format, BitmapHeader, Compression, DecodeSession, Decoder, DibCursor, DibCursorMut,
    EncodeSession, EncodedFrame, Encoder, EncoderSettings, FourCc, FrameSize, Rgb, SessionError,
};

/// Stores a flag byte for key frames followed by the logical pixels as `[r, g, b]`.
struct Raw {
    size: FrameSize,
    frames: usize,
}

#[derive(Debug, thiserror::Error)]
enum RawError {
    #[error("output buffer too small")]
    OutputTooSmall,
    #[error("input buffer too small")]
    InputTooSmall,
}

impl Raw {
    fn new(size: FrameSize) -> Result<Self, RawError> {
        Ok(Raw { size, frames: 0 })
    }

    fn frame_len(&self) -> usize {
        1 + 3 * self.size.pixel_count()
    }
}

impl Encoder for Raw {
    type Error = RawError;

    fn encode(
        &mut self,
        source: DibCursor<'_>,
        output: &mut [u8],
        force_key_frame: bool,
    ) -> Result<EncodedFrame, RawError> {
        assert_eq!(source.len(), self.size.pixel_count());
        let output = output
            .get_mut(..self.frame_len())
            .ok_or(RawError::OutputTooSmall)?;

        let key_frame = force_key_frame || self.frames == 0;
        output[0] = key_frame.into();
        for (bytes, pixel) in output[1..].chunks_exact_mut(3).zip(source) {
            bytes.copy_from_slice(&<[u8; 3]>::from(pixel.get()));
        }

        self.frames += 1;
        Ok(EncodedFrame {
            bytes_written: output.len(),
            key_frame,
        })
    }
}

impl Decoder for Raw {
    type Error = RawError;

    fn decode(&mut self, input: &[u8], sink: DibCursorMut<'_>) -> Result<(), RawError> {
        let input = input.get(1..self.frame_len()).ok_or(RawError::InputTooSmall)?;
        for (mut pixel, bytes) in sink.zip(input.chunks_exact(3)) {
            pixel.set(Rgb::new(bytes[0], bytes[1], bytes[2]));
        }
        Ok(())
    }
}

fn gradient(header: &BitmapHeader) -> Vec<u8> {
    let mut bytes = vec![0xCC; header.size_image as usize];
    let layout = header.layout().unwrap();
    for (i, mut pixel) in DibCursorMut::new(layout, &mut bytes).unwrap().enumerate() {
        pixel.set(Rgb::new(i as u8, (i * 7) as u8, 0x80));
    }
    bytes
}

fn logical(header: &BitmapHeader, bytes: &[u8]) -> Vec<Rgb> {
    DibCursor::new(header.layout().unwrap(), bytes)
        .unwrap()
        .map(Rgb::from)
        .collect()
}

#[test]
fn encoder_sees_logical_pixels() {
    // Two rows of two pixels, bottom-up, each row padded from 6 to 8 bytes.
    let input = BitmapHeader::rgb24(2, 2);
    let pixels = [
        0x20, 0x21, 0x22, 0x30, 0x31, 0x32, 0, 0, // bottom row
        0x00, 0x01, 0x02, 0x10, 0x11, 0x12, 0, 0, // top row
    ];

    let mut session = EncodeSession::new(&input, EncoderSettings::default(), Raw::new).unwrap();
    let mut output = [0u8; 13];
    let frame = session.encode(&input, &pixels, &mut output, false).unwrap();

    assert_eq!(frame.bytes_written, 13);
    assert!(frame.key_frame);
    assert_eq!(
        output[1..],
        [
            0x02, 0x01, 0x00, 0x12, 0x11, 0x10, // top row
            0x22, 0x21, 0x20, 0x32, 0x31, 0x30, // bottom row
        ]
    );

    assert_eq!(frame.header.compression, Compression::FourCc(FourCc::LPVC));
    assert_eq!(frame.header.size_image, 13);
    assert_eq!((frame.header.width, frame.header.height), (2, 2));
}

#[test]
fn round_trip_between_directions() {
    let input = BitmapHeader::rgb24(5, 3);
    let pixels = gradient(&input);

    let mut encoder = EncodeSession::new(&input, EncoderSettings::default(), Raw::new).unwrap();
    let mut compressed = vec![0u8; format::compress_get_size(&input).unwrap()];
    let frame = encoder
        .encode(&input, &pixels, &mut compressed, false)
        .unwrap();

    // Decode into a top-down buffer of the same size.
    let output = BitmapHeader::rgb24(5, -3);
    assert!(format::decompress_query(&frame.header, Some(&output)).is_ok());

    let mut decoder = DecodeSession::new(&frame.header, Raw::new).unwrap();
    let mut decoded = vec![0xCC; output.size_image as usize];
    decoder
        .decode(&frame.header, &compressed, &output, &mut decoded)
        .unwrap();

    assert_eq!(logical(&output, &decoded), logical(&input, &pixels));

    // Physically, the rows are mirrored. Padding is left alone.
    let stride = 16;
    for row in 0..3 {
        let up = &pixels[row * stride..][..15];
        let down = &decoded[(2 - row) * stride..][..15];
        assert_eq!(up, down, "row {}", row);
        assert_eq!(decoded[row * stride + 15], 0xCC);
    }
}

#[test]
fn key_frame_scheduling() {
    let input = BitmapHeader::rgb24(1, 1);
    let pixels = gradient(&input);
    let settings = EncoderSettings::default().with_forced_key_frames(3);

    let mut session = EncodeSession::new(&input, settings, Raw::new).unwrap();
    let mut output = [0u8; 4];
    let mut key_frames = vec![];
    for requested in [false, false, false, false, true, false, false, false] {
        let frame = session
            .encode(&input, &pixels, &mut output, requested)
            .unwrap();
        key_frames.push(frame.key_frame);
    }

    // The first frame is a key frame on the codec's own account, the fifth on request.
    assert_eq!(
        key_frames,
        [true, false, false, true, true, false, false, true]
    );
    assert_eq!(session.policy().frames_since_key_frame(), 0);

    session.set_settings(settings.with_ignore_key_frame_requests(true));
    let frame = session.encode(&input, &pixels, &mut output, true).unwrap();
    assert!(!frame.key_frame);
    assert_eq!(session.encoder().frames, 9);
}

#[test]
fn rejects_other_formats() {
    let paletted = BitmapHeader {
        bit_count: 8,
        ..BitmapHeader::rgb24(4, 4)
    };
    let err = EncodeSession::new(&paletted, EncoderSettings::default(), Raw::new)
        .err()
        .unwrap();
    assert!(matches!(err, SessionError::Format(_)));

    let uncompressed = BitmapHeader::rgb24(4, 4);
    assert!(DecodeSession::new(&uncompressed, Raw::new).is_err());
}

#[test]
fn frame_checks() {
    let input = BitmapHeader::rgb24(4, 4);
    let mut session = EncodeSession::new(&input, EncoderSettings::default(), Raw::new).unwrap();
    let mut output = vec![0u8; 64];

    // Direction may change between frames, the dimensions may not.
    let flipped = BitmapHeader::rgb24(4, -4);
    let pixels = gradient(&flipped);
    assert!(session.encode(&flipped, &pixels, &mut output, false).is_ok());

    let wider = BitmapHeader::rgb24(5, 4);
    let err = session
        .encode(&wider, &gradient(&wider), &mut output, false)
        .unwrap_err();
    assert_eq!(err.to_string(), "frame is 5x4 but the session is for 4x4");

    // Not enough pixel data for the header.
    let err = session
        .encode(&input, &pixels[..40], &mut output, false)
        .unwrap_err();
    assert!(matches!(err, SessionError::Format(_)));

    // Not enough room for the codec.
    let err = session
        .encode(&input, &pixels, &mut output[..10], false)
        .unwrap_err();
    assert!(matches!(err, SessionError::Codec(RawError::OutputTooSmall)));
}

#[test]
fn truncated_input() {
    let output = BitmapHeader::rgb24(2, 2);
    let input = format::compress_get_format(&output);
    let mut session = DecodeSession::new(&input, Raw::new).unwrap();

    let mut pixels = vec![0u8; 16];
    let err = session
        .decode(&input, &[0u8; 4], &output, &mut pixels)
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::TruncatedInput {
            declared: 16,
            actual: 4
        }
    ));

    // The decoder only ever sees the declared bytes.
    let short = BitmapHeader {
        size_image: 4,
        ..input
    };
    let err = session
        .decode(&short, &[0u8; 32], &output, &mut pixels)
        .unwrap_err();
    assert!(matches!(err, SessionError::Codec(RawError::InputTooSmall)));
}
