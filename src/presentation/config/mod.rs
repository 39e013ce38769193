mod environment;
mod scaffold_config;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use scaffold_config::ScaffoldConfig;
pub use settings::{
    CacheSettings, LlmProvider, LlmSettings, LoggingSettings, PlacesSettings, ServerSettings,
    SessionSettings, Settings, SpeechSettings,
};
