use std::time::Duration;

use serde::Deserialize;

/// Offline mode: mock oracles stand in for the places, text and speech
/// providers so clients can be built without API keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScaffoldConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub mock_response_delay_ms: u64,
}

impl ScaffoldConfig {
    /// Legacy switches `SCAFFOLD_MODE` and `MOCK_RESPONSE_DELAY` win over the
    /// configured values when present.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("SCAFFOLD_MODE") {
            self.enabled = v.eq_ignore_ascii_case("true") || v == "1";
        }
        if let Some(delay) = std::env::var("MOCK_RESPONSE_DELAY")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.mock_response_delay_ms = delay;
        }
        self
    }

    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.mock_response_delay_ms)
    }
}
