/// How the driver schedules key frames.
///
/// Codec specific options are not part of this, they are applied when the codec is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncoderSettings {
    /// Do not honor key frame requests of the host.
    pub ignore_key_frame_requests: bool,
    /// Insert key frames on our own, every `key_frame_interval` frames.
    pub force_key_frames: bool,
    /// The distance between forced key frames. Zero disables forcing.
    pub key_frame_interval: usize,
}

impl EncoderSettings {
    pub fn with_ignore_key_frame_requests(self, ignore: bool) -> Self {
        EncoderSettings {
            ignore_key_frame_requests: ignore,
            ..self
        }
    }

    pub fn with_forced_key_frames(self, interval: usize) -> Self {
        EncoderSettings {
            force_key_frames: true,
            key_frame_interval: interval,
            ..self
        }
    }

    pub fn without_forced_key_frames(self) -> Self {
        EncoderSettings {
            force_key_frames: false,
            ..self
        }
    }
}

impl Default for EncoderSettings {
    fn default() -> Self {
        EncoderSettings {
            ignore_key_frame_requests: false,
            force_key_frames: true,
            key_frame_interval: 1000,
        }
    }
}

#[test]
fn builders() {
    let settings = EncoderSettings::default()
        .with_ignore_key_frame_requests(true)
        .with_forced_key_frames(30);
    assert!(settings.ignore_key_frame_requests);
    assert!(settings.force_key_frames);
    assert_eq!(settings.key_frame_interval, 30);

    let settings = settings.without_forced_key_frames();
    assert!(!settings.force_key_frames);
    assert_eq!(settings.key_frame_interval, 30);
}

#[cfg(feature = "serde")]
#[test]
fn deserialize_partial() {
    let settings: EncoderSettings =
        serde_json::from_str(r#"{ "key_frame_interval": 250 }"#).unwrap();
    assert_eq!(
        settings,
        EncoderSettings {
            key_frame_interval: 250,
            ..EncoderSettings::default()
        }
    );

    let json = serde_json::to_string(&settings).unwrap();
    assert_eq!(serde_json::from_str::<EncoderSettings>(&json).unwrap(), settings);
}
