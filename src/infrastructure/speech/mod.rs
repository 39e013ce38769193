mod elevenlabs_engine;
mod mock_speech_engine;

pub use elevenlabs_engine::{DEFAULT_ELEVENLABS_BASE_URL, ElevenLabsEngine};
pub use mock_speech_engine::MockSpeechEngine;
