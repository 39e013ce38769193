use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;

use crate::application::ports::{SpeechEngine, SpeechError, VoiceProfile};
use crate::domain::AudioFormat;

/// Turns text into one complete audio buffer. Chunks from the engine are
/// accumulated and only a fully drained stream is returned; no retries.
pub struct SpeechSynthesizer {
    engine: Arc<dyn SpeechEngine>,
    voice: VoiceProfile,
}

impl SpeechSynthesizer {
    pub fn new(engine: Arc<dyn SpeechEngine>, voice: VoiceProfile) -> Self {
        Self { engine, voice }
    }

    pub fn voice(&self) -> &VoiceProfile {
        &self.voice
    }

    pub fn format(&self) -> &AudioFormat {
        &self.voice.format
    }

    pub async fn synthesize(&self, text: &str) -> Result<Bytes, SpeechError> {
        self.synthesize_with(text, &self.voice).await
    }

    pub async fn synthesize_with(
        &self,
        text: &str,
        voice: &VoiceProfile,
    ) -> Result<Bytes, SpeechError> {
        let mut stream = self.engine.synthesize_stream(text, voice).await?;

        let mut buffer = BytesMut::new();
        let mut chunks = 0usize;
        while let Some(chunk) = stream.next().await {
            buffer.extend_from_slice(&chunk?);
            chunks += 1;
        }

        if buffer.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        tracing::debug!(
            chunks = chunks,
            bytes = buffer.len(),
            format = %voice.format,
            "Speech synthesized"
        );

        Ok(buffer.freeze())
    }
}
