use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use hereabouts::application::ports::{LlmClient, PlacesProvider, SpeechEngine};
use hereabouts::application::services::{
    NarrationCache, NarrationService, PlaceFinder, SessionTracker, SpeechSynthesizer,
};
use hereabouts::infrastructure::llm::{LlmClientFactory, MockLlmClient};
use hereabouts::infrastructure::observability::init_tracing;
use hereabouts::infrastructure::places::{GooglePlacesClient, MockPlacesProvider};
use hereabouts::infrastructure::session::InMemorySessionStore;
use hereabouts::infrastructure::speech::{ElevenLabsEngine, MockSpeechEngine};
use hereabouts::infrastructure::storage::DiskArtifactStore;
use hereabouts::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load configuration")?;

    init_tracing(&settings.logging, environment.as_str());

    tracing::info!(
        environment = %environment,
        llm_provider = ?settings.llm.provider,
        scaffold = settings.scaffold.enabled,
        "Starting narration service"
    );

    let voice = settings
        .speech
        .voice_profile()
        .map_err(anyhow::Error::msg)?;

    let (places, llm_client, speech_engine): (
        Arc<dyn PlacesProvider>,
        Arc<dyn LlmClient>,
        Arc<dyn SpeechEngine>,
    ) = if settings.scaffold.enabled {
        tracing::warn!("Scaffold mode enabled, using mock oracles");
        (
            Arc::new(MockPlacesProvider),
            Arc::new(MockLlmClient::new(settings.scaffold.response_delay())),
            Arc::new(MockSpeechEngine),
        )
    } else {
        (
            Arc::new(GooglePlacesClient::new(
                settings.places.api_key.clone(),
                settings.places.base_url.clone(),
            )),
            LlmClientFactory::create(&settings.llm)?,
            Arc::new(ElevenLabsEngine::new(
                settings.speech.api_key.clone(),
                settings.speech.base_url.clone(),
            )),
        )
    };

    let artifact_store = Arc::new(
        DiskArtifactStore::new(&settings.cache.root, &voice.format, settings.cache.ttl())
            .with_context(|| format!("Failed to prepare cache at {}", settings.cache.root))?,
    );
    let session_store = Arc::new(InMemorySessionStore::new(
        settings.session.idle_ttl(),
        settings.session.max_sessions,
    ));

    let narration_service = NarrationService::new(
        PlaceFinder::new(places, settings.places.search_policy()),
        llm_client,
        SpeechSynthesizer::new(speech_engine, voice),
        NarrationCache::new(artifact_store),
        SessionTracker::new(session_store, settings.session.relocation_threshold_km),
        settings.cache.coordinate_precision,
    );

    let router = create_router(AppState::new(narration_service));

    let host: std::net::IpAddr = settings
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid server host {}", settings.server.host))?;
    let addr = SocketAddr::from((host, settings.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
