//! Encode and decode calls of the host.
//!
//! A session owns one codec for the lifetime of a stream. For every frame it validates the
//! headers, creates a cursor over the host's buffer, hands it to the codec and drops it again
//! before returning. No cursor outlives the call it was created for.
use lpvc_dib::{DibCursor, DibCursorMut};

use crate::codec::{Decoder, Encoder, FrameSize};
use crate::format::{self, BitmapHeader, FormatError};
use crate::settings::EncoderSettings;

/// Decides which frames are encoded as key frames.
#[derive(Clone, Debug, Default)]
pub struct KeyFramePolicy {
    settings: EncoderSettings,
    since_key_frame: usize,
}

/// The result of compressing a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressedFrame {
    /// The header describing the compressed data.
    pub header: BitmapHeader,
    /// The number of bytes written to the front of the output buffer.
    pub bytes_written: usize,
    pub key_frame: bool,
}

/// Compresses frames of one input format.
pub struct EncodeSession<E> {
    encoder: E,
    input: BitmapHeader,
    policy: KeyFramePolicy,
}

/// Decompresses frames of one compressed format.
pub struct DecodeSession<D> {
    decoder: D,
    input: BitmapHeader,
}

/// Error that occurs during a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError<E> {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("frame is {actual} but the session is for {expected}")]
    SizeMismatch {
        expected: FrameSize,
        actual: FrameSize,
    },
    #[error("compressed frame of {0} bytes does not fit into a bitmap header")]
    FrameTooLarge(usize),
    #[error("header declares {declared} bytes of input but only {actual} are available")]
    TruncatedInput { declared: usize, actual: usize },
    #[error("codec error: {0}")]
    Codec(#[source] E),
}

impl KeyFramePolicy {
    pub fn new(settings: EncoderSettings) -> Self {
        KeyFramePolicy {
            settings,
            since_key_frame: 0,
        }
    }

    pub fn settings(&self) -> &EncoderSettings {
        &self.settings
    }

    /// Replace the settings, keeping track of the current distance to the last key frame.
    pub fn set_settings(&mut self, settings: EncoderSettings) {
        self.settings = settings;
    }

    /// The number of frames encoded since the last key frame.
    pub fn frames_since_key_frame(&self) -> usize {
        self.since_key_frame
    }

    /// Whether the next frame must be a key frame.
    pub fn wants_key_frame(&self, requested: bool) -> bool {
        let requested = requested && !self.settings.ignore_key_frame_requests;
        let forced = self.settings.force_key_frames
            && self
                .settings
                .key_frame_interval
                .checked_sub(1)
                .is_some_and(|last| self.since_key_frame >= last);

        requested || forced
    }

    /// Account for an encoded frame.
    pub fn record(&mut self, key_frame: bool) {
        if key_frame {
            self.since_key_frame = 0;
        } else {
            self.since_key_frame += 1;
        }
    }
}

impl<E: Encoder> EncodeSession<E> {
    /// Start compressing frames of the `input` format.
    ///
    /// The encoder is created for the size of those frames.
    pub fn new(
        input: &BitmapHeader,
        settings: EncoderSettings,
        create: impl FnOnce(FrameSize) -> Result<E, E::Error>,
    ) -> Result<Self, SessionError<E::Error>> {
        format::compress_query(input, None)?;
        let size = FrameSize::from_header(input)?;
        let encoder = create(size).map_err(SessionError::Codec)?;

        log::debug!("Created encoder for {} frames, {:?}", size, settings);

        Ok(EncodeSession {
            encoder,
            input: *input,
            policy: KeyFramePolicy::new(settings),
        })
    }

    pub fn policy(&self) -> &KeyFramePolicy {
        &self.policy
    }

    pub fn set_settings(&mut self, settings: EncoderSettings) {
        self.policy.set_settings(settings);
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Compress the frame in `pixels`, described by `input`, into `output`.
    ///
    /// The host may request a key frame, which is honored unless configured otherwise.
    pub fn encode(
        &mut self,
        input: &BitmapHeader,
        pixels: &[u8],
        output: &mut [u8],
        key_frame_requested: bool,
    ) -> Result<CompressedFrame, SessionError<E::Error>> {
        format::compress_query(input, None)?;
        check_size(&self.input, input)?;

        let source = DibCursor::new(input.layout()?, pixels).map_err(FormatError::from)?;
        let force = self.policy.wants_key_frame(key_frame_requested);
        let encoded = self
            .encoder
            .encode(source, output, force)
            .map_err(SessionError::Codec)?;

        let size_image = u32::try_from(encoded.bytes_written)
            .map_err(|_| SessionError::FrameTooLarge(encoded.bytes_written))?;
        self.policy.record(encoded.key_frame);

        log::trace!(
            "Encoded frame into {} bytes, key frame: {} (forced: {})",
            encoded.bytes_written,
            encoded.key_frame,
            force
        );

        Ok(CompressedFrame {
            header: BitmapHeader {
                size_image,
                ..format::compress_get_format(input)
            },
            bytes_written: encoded.bytes_written,
            key_frame: encoded.key_frame,
        })
    }

    pub fn into_encoder(self) -> E {
        self.encoder
    }
}

impl<D: Decoder> DecodeSession<D> {
    /// Start decompressing frames of the compressed `input` format.
    pub fn new(
        input: &BitmapHeader,
        create: impl FnOnce(FrameSize) -> Result<D, D::Error>,
    ) -> Result<Self, SessionError<D::Error>> {
        format::decompress_query(input, None)?;
        let size = FrameSize::from_header(input)?;
        let decoder = create(size).map_err(SessionError::Codec)?;

        log::debug!("Created decoder for {} frames", size);

        Ok(DecodeSession {
            decoder,
            input: *input,
        })
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Decompress the frame in `data`, described by `input`, into `pixels`.
    ///
    /// Only the `size_image` bytes declared by the input header are passed to the decoder. The
    /// `output` header decides the row direction of `pixels`.
    pub fn decode(
        &mut self,
        input: &BitmapHeader,
        data: &[u8],
        output: &BitmapHeader,
        pixels: &mut [u8],
    ) -> Result<(), SessionError<D::Error>> {
        format::decompress_query(input, Some(output))?;
        check_size(&self.input, input)?;
        check_size(&self.input, output)?;

        let declared = input.size_image as usize;
        let data = data.get(..declared).ok_or(SessionError::TruncatedInput {
            declared,
            actual: data.len(),
        })?;

        let sink = DibCursorMut::new(output.layout()?, pixels).map_err(FormatError::from)?;
        self.decoder.decode(data, sink).map_err(SessionError::Codec)?;

        log::trace!("Decoded frame from {} bytes", declared);
        Ok(())
    }

    pub fn into_decoder(self) -> D {
        self.decoder
    }
}

/// Frames must keep the dimensions the codec was created for, the direction may differ.
fn check_size<E>(session: &BitmapHeader, frame: &BitmapHeader) -> Result<(), SessionError<E>> {
    let expected = FrameSize::from_header(session)?;
    let actual = FrameSize::from_header(frame)?;

    if expected != actual {
        return Err(SessionError::SizeMismatch { expected, actual });
    }

    Ok(())
}

#[test]
fn forced_key_frames() {
    let mut policy = KeyFramePolicy::new(EncoderSettings::default().with_forced_key_frames(3));

    let mut decisions = vec![];
    for _ in 0..7 {
        let key_frame = policy.wants_key_frame(false);
        decisions.push(key_frame);
        policy.record(key_frame);
    }

    assert_eq!(decisions, [false, false, true, false, false, true, false]);
}

#[test]
fn requested_key_frames() {
    let policy = KeyFramePolicy::new(EncoderSettings::default());
    assert!(policy.wants_key_frame(true));
    assert!(!policy.wants_key_frame(false));

    let settings = EncoderSettings::default().with_ignore_key_frame_requests(true);
    let ignoring = KeyFramePolicy::new(settings);
    assert!(!ignoring.wants_key_frame(true));
}

#[test]
fn interval_edge_cases() {
    let mut every = KeyFramePolicy::new(EncoderSettings::default().with_forced_key_frames(1));
    assert!(every.wants_key_frame(false));
    every.record(true);
    assert!(every.wants_key_frame(false));

    let mut never = KeyFramePolicy::new(EncoderSettings::default().with_forced_key_frames(0));
    for _ in 0..10 {
        assert!(!never.wants_key_frame(false));
        never.record(false);
    }

    let settings = EncoderSettings::default().without_forced_key_frames();
    let mut disabled = KeyFramePolicy::new(settings);
    for _ in 0..2000 {
        assert!(!disabled.wants_key_frame(false));
        disabled.record(false);
    }
    assert_eq!(disabled.frames_since_key_frame(), 2000);
}
