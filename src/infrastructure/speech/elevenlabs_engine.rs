use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{AudioChunkStream, SpeechEngine, SpeechError, VoiceProfile};

pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// ElevenLabs streaming text-to-speech adapter.
pub struct ElevenLabsEngine {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct TextToSpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

impl ElevenLabsEngine {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_ELEVENLABS_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

#[async_trait]
impl SpeechEngine for ElevenLabsEngine {
    async fn synthesize_stream(
        &self,
        text: &str,
        voice: &VoiceProfile,
    ) -> Result<AudioChunkStream, SpeechError> {
        if self.api_key.is_empty() {
            return Err(SpeechError::Configuration(
                "speech api_key is not set".to_string(),
            ));
        }

        let url = format!("{}/text-to-speech/{}/stream", self.base_url, voice.voice_id);

        tracing::debug!(
            voice_id = %voice.voice_id,
            model_id = %voice.model_id,
            format = %voice.format,
            chars = text.chars().count(),
            "Requesting speech synthesis"
        );

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .query(&[("output_format", voice.format.as_str())])
            .json(&TextToSpeechRequest {
                text,
                model_id: &voice.model_id,
            })
            .send()
            .await
            .map_err(|e| SpeechError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SpeechError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| SpeechError::StreamInterrupted(e.to_string())));

        Ok(Box::pin(stream))
    }
}
