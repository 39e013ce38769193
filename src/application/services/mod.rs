mod keyed_mutex;
mod narration_cache;
mod narration_request;
mod narration_service;
mod place_finder;
mod prompt_composer;
mod session_tracker;
mod speech_synthesizer;

pub use keyed_mutex::{KeyedGuard, KeyedMutex};
pub use narration_cache::{CachedNarration, GeneratedNarration, NarrationCache};
pub use narration_request::{NarrationRequest, ValidationError};
pub use narration_service::{DEFAULT_KEY_PRECISION, Narration, NarrationError, NarrationService};
pub use place_finder::{PlaceFinder, SearchPolicy, rank_candidates};
pub use prompt_composer::{PromptComposer, PromptMode};
pub use session_tracker::{SessionTracker, Visit};
pub use speech_synthesizer::SpeechSynthesizer;
