use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use config::Environment as EnvironmentSource;
use serde::Deserialize;

use crate::application::ports::VoiceProfile;
use crate::application::services::SearchPolicy;
use crate::domain::{AudioFormat, DEFAULT_RELOCATION_THRESHOLD_KM};

use super::{Environment, ScaffoldConfig};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub places: PlacesSettings,
    pub speech: SpeechSettings,
    pub cache: CacheSettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
    #[serde(default)]
    pub scaffold: ScaffoldConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "lmstudio")]
    LmStudio,
    Azure,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub azure_endpoint: Option<String>,
    pub max_tokens: usize,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacesSettings {
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    pub start_radius_m: u32,
    pub max_radius_m: u32,
    pub radius_step_m: u32,
    pub cutoff_m: f64,
    pub max_results: usize,
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechSettings {
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    pub voice_id: String,
    pub model_id: String,
    pub output_format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub root: String,
    pub coordinate_precision: u32,
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub relocation_threshold_km: f64,
    #[serde(default)]
    pub idle_ttl_secs: Option<u64>,
    #[serde(default)]
    pub max_sessions: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Layers, lowest precedence first: built-in defaults, the optional
    /// `appsettings.<env>` file, then `APP__SECTION__KEY` variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = defaults()?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(EnvironmentSource::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            scaffold: settings.scaffold.clone().with_env_overrides(),
            ..settings
        })
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let legacy = |name: &str| std::env::var(name).unwrap_or_default();

    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default(
            "server.port",
            std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse::<i64>().ok())
                .unwrap_or(8080_i64),
        )?
        .set_default("llm.provider", "gemini")?
        .set_default("llm.api_key", legacy("GENAI_API_KEY"))?
        .set_default("llm.model", "gemini-2.5-flash")?
        .set_default("llm.max_tokens", 2048_i64)?
        .set_default("llm.temperature", 0.4_f64)?
        .set_default("places.api_key", legacy("MAPS_API_KEY"))?
        .set_default("places.start_radius_m", 20_i64)?
        .set_default("places.max_radius_m", 100_i64)?
        .set_default("places.radius_step_m", 20_i64)?
        .set_default("places.cutoff_m", 50.0_f64)?
        .set_default("places.max_results", 3_i64)?
        .set_default("places.category", "point_of_interest")?
        .set_default("speech.api_key", legacy("ELEVEN_API_KEY"))?
        .set_default("speech.voice_id", "JBFqnCBsd6RMkjVDRZzb")?
        .set_default("speech.model_id", "eleven_flash_v2_5")?
        .set_default("speech.output_format", "mp3_44100_128")?
        .set_default("cache.root", "cache")?
        .set_default("cache.coordinate_precision", 4_i64)?
        .set_default(
            "session.relocation_threshold_km",
            DEFAULT_RELOCATION_THRESHOLD_KM,
        )?
        .set_default("logging.level", "info")?
        .set_default("logging.enable_json", false)
}

impl PlacesSettings {
    pub fn search_policy(&self) -> SearchPolicy {
        SearchPolicy {
            start_radius_m: self.start_radius_m,
            max_radius_m: self.max_radius_m,
            radius_step_m: self.radius_step_m,
            cutoff_m: self.cutoff_m,
            max_results: self.max_results,
            category: self.category.clone(),
        }
    }
}

impl SpeechSettings {
    pub fn voice_profile(&self) -> Result<VoiceProfile, String> {
        Ok(VoiceProfile {
            voice_id: self.voice_id.clone(),
            model_id: self.model_id.clone(),
            format: self.output_format.parse::<AudioFormat>()?,
        })
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}

impl SessionSettings {
    pub fn idle_ttl(&self) -> Option<Duration> {
        self.idle_ttl_secs.map(Duration::from_secs)
    }
}
