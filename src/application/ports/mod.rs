mod artifact_store;
mod llm_client;
mod places_provider;
mod session_store;
mod speech_engine;

pub use artifact_store::{ArtifactError, ArtifactStore};
pub use llm_client::{LlmClient, LlmClientError};
pub use places_provider::{PlacesProvider, PlacesProviderError};
pub use session_store::{SessionStore, SessionStoreError};
pub use speech_engine::{AudioChunkStream, SpeechEngine, SpeechError, VoiceProfile};
