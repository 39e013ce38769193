use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bytes::Bytes;
use futures::stream;

use hereabouts::application::ports::{
    ArtifactError, ArtifactStore, AudioChunkStream, LlmClient, LlmClientError, PlacesProvider,
    PlacesProviderError, SpeechEngine, SpeechError, VoiceProfile,
};
use hereabouts::application::services::{
    NarrationCache, NarrationService, PlaceFinder, SearchPolicy, SessionTracker,
    SpeechSynthesizer,
};
use hereabouts::domain::{
    AudioFormat, CacheKey, Coordinate, DEFAULT_RELOCATION_THRESHOLD_KM, Place,
};
use hereabouts::infrastructure::session::InMemorySessionStore;

pub const TEST_KEY_PRECISION: u32 = 4;

pub fn coordinate(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).expect("valid test coordinate")
}

pub fn test_voice() -> VoiceProfile {
    VoiceProfile {
        voice_id: "test-voice".to_string(),
        model_id: "test-model".to_string(),
        format: AudioFormat::default(),
    }
}

/// Places oracle returning a fixed answer per radius call and counting calls.
pub struct CountingPlaces {
    pub calls: AtomicUsize,
    pub radii: Mutex<Vec<u32>>,
    responses: Mutex<Vec<Result<Vec<Place>, PlacesProviderError>>>,
    fallback: Vec<Place>,
}

impl CountingPlaces {
    pub fn returning(places: Vec<Place>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            radii: Mutex::new(Vec::new()),
            responses: Mutex::new(Vec::new()),
            fallback: places,
        }
    }

    /// Answers successive calls from `responses`, then falls back to empty.
    pub fn scripted(responses: Vec<Result<Vec<Place>, PlacesProviderError>>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            radii: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into_iter().rev().collect()),
            fallback: Vec::new(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PlacesProvider for CountingPlaces {
    async fn search_nearby(
        &self,
        _center: Coordinate,
        radius_m: u32,
        _category: &str,
    ) -> Result<Vec<Place>, PlacesProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.radii.lock().unwrap().push(radius_m);
        let scripted = self.responses.lock().unwrap().pop();
        match scripted {
            Some(response) => response,
            None => Ok(self.fallback.clone()),
        }
    }
}

/// Text oracle that echoes a numbered answer and remembers every prompt.
pub struct CountingLlm {
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
    delay: Duration,
}

impl CountingLlm {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            delay,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompt(&self, index: usize) -> String {
        self.prompts.lock().unwrap()[index].clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for CountingLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.prompts.lock().unwrap().push(prompt.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(format!("answer number {}", n))
    }
}

pub struct FailingLlm;

#[async_trait::async_trait]
impl LlmClient for FailingLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Err(LlmClientError::RateLimited)
    }
}

/// Speech oracle emitting the text bytes in two chunks.
pub struct CountingSpeech {
    pub calls: AtomicUsize,
}

impl CountingSpeech {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SpeechEngine for CountingSpeech {
    async fn synthesize_stream(
        &self,
        text: &str,
        _voice: &VoiceProfile,
    ) -> Result<AudioChunkStream, SpeechError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let bytes = Bytes::copy_from_slice(text.as_bytes());
        let mid = bytes.len() / 2;
        let chunks = vec![Ok(bytes.slice(..mid)), Ok(bytes.slice(mid..))];
        Ok(Box::pin(stream::iter(chunks)))
    }
}

/// Artifact store backed by a map, with optional write failures.
#[derive(Default)]
pub struct MemoryArtifactStore {
    pub audio: Mutex<HashMap<String, Bytes>>,
    pub text: Mutex<HashMap<String, String>>,
    pub fail_audio_writes: bool,
}

impl MemoryArtifactStore {
    pub fn failing_audio_writes() -> Self {
        Self {
            fail_audio_writes: true,
            ..Self::default()
        }
    }

    pub fn audio_count(&self) -> usize {
        self.audio.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn read_audio(&self, key: &CacheKey) -> Result<Option<Bytes>, ArtifactError> {
        Ok(self.audio.lock().unwrap().get(key.as_str()).cloned())
    }

    async fn read_text(&self, key: &CacheKey) -> Result<Option<String>, ArtifactError> {
        Ok(self.text.lock().unwrap().get(key.as_str()).cloned())
    }

    async fn write_text(&self, key: &CacheKey, text: &str) -> Result<(), ArtifactError> {
        self.text
            .lock()
            .unwrap()
            .insert(key.to_string(), text.to_string());
        Ok(())
    }

    async fn write_audio(&self, key: &CacheKey, audio: &[u8]) -> Result<(), ArtifactError> {
        if self.fail_audio_writes {
            return Err(ArtifactError::ArtifactMissing(key.to_string()));
        }
        self.audio
            .lock()
            .unwrap()
            .insert(key.to_string(), Bytes::copy_from_slice(audio));
        Ok(())
    }
}

pub struct Harness {
    pub places: Arc<CountingPlaces>,
    pub llm: Arc<CountingLlm>,
    pub speech: Arc<CountingSpeech>,
    pub store: Arc<MemoryArtifactStore>,
    pub service: NarrationService,
}

impl Harness {
    pub fn new(places: Vec<Place>) -> Self {
        Self::with_llm(places, CountingLlm::new())
    }

    pub fn with_llm(places: Vec<Place>, llm: CountingLlm) -> Self {
        let places = Arc::new(CountingPlaces::returning(places));
        let llm = Arc::new(llm);
        let speech = Arc::new(CountingSpeech::new());
        let store = Arc::new(MemoryArtifactStore::default());

        let service = NarrationService::new(
            PlaceFinder::new(places.clone(), SearchPolicy::default()),
            llm.clone(),
            SpeechSynthesizer::new(speech.clone(), test_voice()),
            NarrationCache::new(store.clone()),
            SessionTracker::new(
                Arc::new(InMemorySessionStore::default()),
                DEFAULT_RELOCATION_THRESHOLD_KM,
            ),
            TEST_KEY_PRECISION,
        );

        Self {
            places,
            llm,
            speech,
            store,
            service,
        }
    }
}
