use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::CacheKey;

/// Persistent home of narration artifacts (one text and one audio file per key).
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Returns the audio artifact, or `None` when it is absent or past retention.
    async fn read_audio(&self, key: &CacheKey) -> Result<Option<Bytes>, ArtifactError>;

    async fn read_text(&self, key: &CacheKey) -> Result<Option<String>, ArtifactError>;

    async fn write_text(&self, key: &CacheKey, text: &str) -> Result<(), ArtifactError>;

    /// Must never expose a partially written file under the final path.
    async fn write_audio(&self, key: &CacheKey, audio: &[u8]) -> Result<(), ArtifactError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("artifact missing after write: {0}")]
    ArtifactMissing(String),
}
