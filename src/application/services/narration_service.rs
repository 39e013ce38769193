use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{
    ArtifactError, LlmClient, LlmClientError, SessionStoreError, SpeechError,
};
use crate::domain::{AudioFormat, CacheKey, UserId};

use super::narration_cache::{CachedNarration, GeneratedNarration, NarrationCache};
use super::narration_request::NarrationRequest;
use super::place_finder::PlaceFinder;
use super::prompt_composer::{PromptComposer, PromptMode};
use super::session_tracker::SessionTracker;
use super::speech_synthesizer::SpeechSynthesizer;

pub const DEFAULT_KEY_PRECISION: u32 = 4;

#[derive(Debug, Clone)]
pub struct Narration {
    pub text: String,
    pub audio: Bytes,
    pub format: AudioFormat,
    pub cache_hit: bool,
}

pub struct NarrationService {
    place_finder: PlaceFinder,
    composer: PromptComposer,
    llm_client: Arc<dyn LlmClient>,
    synthesizer: SpeechSynthesizer,
    cache: NarrationCache,
    sessions: SessionTracker,
    key_precision: u32,
}

impl NarrationService {
    pub fn new(
        place_finder: PlaceFinder,
        llm_client: Arc<dyn LlmClient>,
        synthesizer: SpeechSynthesizer,
        cache: NarrationCache,
        sessions: SessionTracker,
        key_precision: u32,
    ) -> Self {
        Self {
            place_finder,
            composer: PromptComposer::new(),
            llm_client,
            synthesizer,
            cache,
            sessions,
            key_precision,
        }
    }

    pub fn audio_format(&self) -> &AudioFormat {
        self.synthesizer.format()
    }

    /// Requests carrying a user id get the session-aware historical
    /// narration; everything else describes the immediate surroundings.
    pub async fn narrate(&self, request: &NarrationRequest) -> Result<Narration, NarrationError> {
        match &request.user_id {
            Some(user_id) => self.narrate_history(user_id, request).await,
            None => self.narrate_surroundings(request).await,
        }
    }

    #[tracing::instrument(skip(self, request), fields(coordinate = %request.coordinate))]
    async fn narrate_surroundings(
        &self,
        request: &NarrationRequest,
    ) -> Result<Narration, NarrationError> {
        let place_name = normalize(request.place_name.as_deref());
        let language = normalize(request.language.as_deref());
        let key = CacheKey::derive(
            request.coordinate,
            self.key_precision,
            &[
                "surroundings",
                place_name.as_str(),
                language.as_str(),
                self.synthesizer.format().as_str(),
            ],
        );

        let cached = self
            .cache
            .get_or_create(&key, move || async move {
                let places = self.place_finder.find_nearby(request.coordinate).await;
                let prompt = self.composer.compose(PromptMode::Stateless {
                    coordinate: request.coordinate,
                    place_name: request.place_name.as_deref(),
                    language: request.language.as_deref(),
                    places: &places,
                });
                self.produce(&prompt).await
            })
            .await?;

        Ok(self.finish(&key, cached))
    }

    #[tracing::instrument(
        skip(self, user_id, request),
        fields(user_id = %user_id, coordinate = %request.coordinate)
    )]
    async fn narrate_history(
        &self,
        user_id: &UserId,
        request: &NarrationRequest,
    ) -> Result<Narration, NarrationError> {
        let visit = self.sessions.begin_visit(user_id, request.coordinate).await?;
        let session = visit.session().clone();

        let language = normalize(request.language.as_deref());
        let visit_marker = format!("visit={}", session.revisit_count());
        let key = CacheKey::derive(
            session.base(),
            self.key_precision,
            &[
                "history",
                user_id.as_str(),
                language.as_str(),
                visit_marker.as_str(),
                self.synthesizer.format().as_str(),
            ],
        );

        let snapshot = &session;
        let cached = self
            .cache
            .get_or_create(&key, move || async move {
                let prompt = self.composer.compose(PromptMode::Historical {
                    session: snapshot,
                    language: request.language.as_deref(),
                });
                self.produce(&prompt).await
            })
            .await?;

        let narration = self.finish(&key, cached);

        let retained = self.sessions.record_answer(visit, &narration.text).await?;
        tracing::info!(
            revisit_count = session.revisit_count(),
            stage = %session.stage(),
            retained = retained,
            cache_hit = narration.cache_hit,
            "Historical narration ready"
        );

        Ok(narration)
    }

    async fn produce(&self, prompt: &str) -> Result<GeneratedNarration, NarrationError> {
        let text = self
            .llm_client
            .complete(prompt)
            .await
            .map_err(NarrationError::Completion)?;
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(NarrationError::Completion(LlmClientError::InvalidResponse(
                "empty completion".to_string(),
            )));
        }

        let audio = self
            .synthesizer
            .synthesize(&text)
            .await
            .map_err(NarrationError::Synthesis)?;

        Ok(GeneratedNarration { text, audio })
    }

    fn finish(&self, key: &CacheKey, cached: CachedNarration) -> Narration {
        let text = cached.text.unwrap_or_else(|| {
            tracing::warn!(key = %key, "Serving cached audio without transcript");
            String::new()
        });

        Narration {
            text,
            audio: cached.audio,
            format: self.synthesizer.format().clone(),
            cache_hit: cached.cache_hit,
        }
    }
}

fn normalize(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_lowercase()).unwrap_or_default()
}

#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    #[error("text generation failed: {0}")]
    Completion(LlmClientError),
    #[error("speech synthesis failed: {0}")]
    Synthesis(SpeechError),
    #[error("cache artifact error: {0}")]
    Artifact(#[from] ArtifactError),
    #[error("session store error: {0}")]
    Session(#[from] SessionStoreError),
}
