use bytes::Bytes;
use futures::stream;

use crate::application::ports::{AudioChunkStream, SpeechEngine, SpeechError, VoiceProfile};

/// Emits a short fixed byte pattern in two chunks; enough for clients to
/// exercise playback plumbing in scaffold mode.
pub struct MockSpeechEngine;

const SILENT_FRAME: &[u8] = &[0xFF, 0xFB, 0x90, 0x64, 0x00, 0x00, 0x00, 0x00];

#[async_trait::async_trait]
impl SpeechEngine for MockSpeechEngine {
    async fn synthesize_stream(
        &self,
        _text: &str,
        _voice: &VoiceProfile,
    ) -> Result<AudioChunkStream, SpeechError> {
        let chunks = vec![
            Ok(Bytes::from_static(SILENT_FRAME)),
            Ok(Bytes::from_static(SILENT_FRAME)),
        ];
        Ok(Box::pin(stream::iter(chunks)))
    }
}
