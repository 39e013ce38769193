use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{ArtifactError, ArtifactStore};
use crate::domain::{AudioFormat, CacheKey};

const AUDIO_DIR: &str = "audio";
const TEXT_DIR: &str = "text";
const TMP_DIR: &str = "tmp";

/// Narration artifacts on local disk:
///
/// ```text
/// <root>/audio/<key>.<ext>
/// <root>/text/<key>.txt
/// <root>/tmp/            staging area, same filesystem as the final paths
/// ```
///
/// Files are staged under `tmp/` and renamed into place, so readers only ever
/// see complete artifacts.
pub struct DiskArtifactStore {
    audio_dir: PathBuf,
    text_dir: PathBuf,
    tmp_dir: PathBuf,
    extension: &'static str,
    ttl: Option<Duration>,
}

impl DiskArtifactStore {
    pub fn new(
        root: impl Into<PathBuf>,
        format: &AudioFormat,
        ttl: Option<Duration>,
    ) -> Result<Self, ArtifactError> {
        let root = root.into();
        let store = Self {
            audio_dir: root.join(AUDIO_DIR),
            text_dir: root.join(TEXT_DIR),
            tmp_dir: root.join(TMP_DIR),
            extension: format.extension(),
            ttl,
        };

        for dir in [&store.audio_dir, &store.text_dir, &store.tmp_dir] {
            std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
        }

        Ok(store)
    }

    pub fn audio_path(&self, key: &CacheKey) -> PathBuf {
        self.audio_dir
            .join(format!("{}.{}", key.as_str(), self.extension))
    }

    pub fn text_path(&self, key: &CacheKey) -> PathBuf {
        self.text_dir.join(format!("{}.txt", key.as_str()))
    }

    pub fn tmp_dir(&self) -> &Path {
        &self.tmp_dir
    }

    fn is_expired(&self, modified: SystemTime) -> bool {
        match self.ttl {
            Some(ttl) => modified.elapsed().map(|age| age > ttl).unwrap_or(false),
            None => false,
        }
    }

    async fn write_atomic(&self, final_path: &Path, data: &[u8]) -> Result<(), ArtifactError> {
        let staged = self.tmp_dir.join(format!("{}.part", Uuid::new_v4()));

        if let Err(e) = fs::write(&staged, data).await {
            discard(&staged).await;
            return Err(io_error(&staged, e));
        }

        if let Err(e) = fs::rename(&staged, final_path).await {
            discard(&staged).await;
            return Err(io_error(final_path, e));
        }

        Ok(())
    }
}

#[async_trait]
impl ArtifactStore for DiskArtifactStore {
    async fn read_audio(&self, key: &CacheKey) -> Result<Option<Bytes>, ArtifactError> {
        let path = self.audio_path(key);

        let metadata = match fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path, e)),
        };

        if let Ok(modified) = metadata.modified() {
            if self.is_expired(modified) {
                tracing::debug!(path = %path.display(), "Cached audio past retention");
                return Ok(None);
            }
        }

        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    async fn read_text(&self, key: &CacheKey) -> Result<Option<String>, ArtifactError> {
        let path = self.text_path(key);
        match fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    async fn write_text(&self, key: &CacheKey, text: &str) -> Result<(), ArtifactError> {
        let path = self.text_path(key);
        self.write_atomic(&path, text.as_bytes()).await
    }

    async fn write_audio(&self, key: &CacheKey, audio: &[u8]) -> Result<(), ArtifactError> {
        let path = self.audio_path(key);
        self.write_atomic(&path, audio).await.inspect_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to persist audio artifact");
        })?;

        let present = fs::try_exists(&path).await.unwrap_or(false);
        if !present {
            tracing::error!(path = %path.display(), "Audio artifact missing after move");
            return Err(ArtifactError::ArtifactMissing(path.display().to_string()));
        }

        tracing::debug!(path = %path.display(), bytes = audio.len(), "Audio artifact stored");
        Ok(())
    }
}

async fn discard(staged: &Path) {
    match fs::remove_file(staged).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %staged.display(), error = %e, "Failed to remove staged artifact");
        }
    }
}

fn io_error(path: &Path, source: io::Error) -> ArtifactError {
    ArtifactError::Io {
        path: path.display().to_string(),
        source,
    }
}
