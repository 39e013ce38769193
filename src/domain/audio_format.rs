use std::fmt;
use std::str::FromStr;

/// Speech output format in the `codec_samplerate[_bitrate]` notation used by
/// the synthesis provider, e.g. `mp3_44100_128`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioFormat {
    raw: String,
    codec: AudioCodec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCodec {
    Mp3,
    Pcm,
    Opus,
    Ulaw,
    Alaw,
}

impl AudioCodec {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Pcm => "pcm",
            Self::Opus => "opus",
            Self::Ulaw => "ulaw",
            Self::Alaw => "alaw",
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Pcm => "audio/pcm",
            Self::Opus => "audio/ogg",
            Self::Ulaw => "audio/basic",
            Self::Alaw => "audio/x-alaw-basic",
        }
    }
}

impl AudioFormat {
    pub fn codec(&self) -> AudioCodec {
        self.codec
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn extension(&self) -> &'static str {
        self.codec.extension()
    }

    pub fn as_mime(&self) -> &'static str {
        self.codec.as_mime()
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            raw: "mp3_44100_128".to_string(),
            codec: AudioCodec::Mp3,
        }
    }
}

impl FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_lowercase();
        let codec = match raw.split('_').next().unwrap_or_default() {
            "mp3" => AudioCodec::Mp3,
            "pcm" => AudioCodec::Pcm,
            "opus" => AudioCodec::Opus,
            "ulaw" => AudioCodec::Ulaw,
            "alaw" => AudioCodec::Alaw,
            other => return Err(format!("Unsupported audio format: {}", other)),
        };
        Ok(Self { raw, codec })
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
