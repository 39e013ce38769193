use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{ArtifactError, ArtifactStore};
use crate::domain::CacheKey;

use super::keyed_mutex::KeyedMutex;

/// Freshly produced text and audio for one narration.
#[derive(Debug, Clone)]
pub struct GeneratedNarration {
    pub text: String,
    pub audio: Bytes,
}

#[derive(Debug, Clone)]
pub struct CachedNarration {
    /// Absent on a hit whose text artifact is missing.
    pub text: Option<String>,
    pub audio: Bytes,
    pub cache_hit: bool,
}

/// Compute-if-absent over an [`ArtifactStore`], with at most one producer in
/// flight per key.
pub struct NarrationCache {
    store: Arc<dyn ArtifactStore>,
    in_flight: KeyedMutex<CacheKey>,
}

impl NarrationCache {
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            store,
            in_flight: KeyedMutex::new(),
        }
    }

    /// Returns the stored artifacts for `key`, running `producer` only on a
    /// miss. Text is persisted before audio; a hit is decided by the audio
    /// artifact alone.
    pub async fn get_or_create<F, Fut, E>(
        &self,
        key: &CacheKey,
        producer: F,
    ) -> Result<CachedNarration, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<GeneratedNarration, E>>,
        E: From<ArtifactError>,
    {
        if let Some(hit) = self.lookup(key).await? {
            return Ok(hit);
        }

        let _flight = self.in_flight.lock(key).await;

        // Another request may have populated the key while we waited.
        if let Some(hit) = self.lookup(key).await? {
            return Ok(hit);
        }

        tracing::debug!(key = %key, "Narration cache miss");
        let produced = producer().await?;

        self.store.write_text(key, &produced.text).await?;
        self.store.write_audio(key, &produced.audio).await?;

        Ok(CachedNarration {
            text: Some(produced.text),
            audio: produced.audio,
            cache_hit: false,
        })
    }

    async fn lookup(&self, key: &CacheKey) -> Result<Option<CachedNarration>, ArtifactError> {
        let Some(audio) = self.store.read_audio(key).await? else {
            return Ok(None);
        };

        let text = self.store.read_text(key).await?;
        if text.is_none() {
            tracing::warn!(key = %key, "Cache hit without text artifact");
        }

        tracing::debug!(key = %key, bytes = audio.len(), "Narration cache hit");
        Ok(Some(CachedNarration {
            text,
            audio,
            cache_hit: true,
        }))
    }
}
