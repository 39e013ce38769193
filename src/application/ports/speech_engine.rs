use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::Stream;

use crate::domain::AudioFormat;

pub type AudioChunkStream = Pin<Box<dyn Stream<Item = Result<Bytes, SpeechError>> + Send + 'static>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceProfile {
    pub voice_id: String,
    pub model_id: String,
    pub format: AudioFormat,
}

/// Speech-synthesis oracle. Audio arrives as a stream of chunks.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    async fn synthesize_stream(
        &self,
        text: &str,
        voice: &VoiceProfile,
    ) -> Result<AudioChunkStream, SpeechError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("audio stream interrupted: {0}")]
    StreamInterrupted(String),
    #[error("empty audio returned")]
    EmptyAudio,
    #[error("configuration error: {0}")]
    Configuration(String),
}
