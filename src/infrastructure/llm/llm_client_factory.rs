use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::presentation::config::{LlmProvider, LlmSettings};

use super::gemini_client::GeminiClient;
use super::openai_client::{AuthScheme, OpenAiClient};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub struct LlmClientFactory;

impl LlmClientFactory {
    pub fn create(settings: &LlmSettings) -> Result<Arc<dyn LlmClient>, LlmClientError> {
        match settings.provider {
            LlmProvider::Gemini => Ok(Arc::new(GeminiClient::new(
                settings.api_key.clone(),
                settings.model.clone(),
                settings.base_url.clone(),
                settings.max_tokens,
                settings.temperature,
            ))),
            LlmProvider::OpenAi => Ok(Arc::new(OpenAiClient::new(
                settings
                    .base_url
                    .clone()
                    .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
                AuthScheme::Bearer,
                settings.api_key.clone(),
                settings.model.clone(),
                settings.max_tokens,
                settings.temperature,
            ))),
            LlmProvider::LmStudio => {
                let base_url = settings.base_url.clone().ok_or_else(|| {
                    LlmClientError::Configuration(
                        "base_url required for lmstudio provider".to_string(),
                    )
                })?;
                Ok(Arc::new(OpenAiClient::new(
                    base_url,
                    AuthScheme::Bearer,
                    settings.api_key.clone(),
                    settings.model.clone(),
                    settings.max_tokens,
                    settings.temperature,
                )))
            }
            LlmProvider::Azure => {
                let endpoint = settings.azure_endpoint.as_ref().ok_or_else(|| {
                    LlmClientError::Configuration(
                        "azure_endpoint required for azure provider".to_string(),
                    )
                })?;
                let base_url = format!(
                    "{}/openai/deployments/{}",
                    endpoint.trim_end_matches('/'),
                    settings.model
                );
                Ok(Arc::new(OpenAiClient::new(
                    base_url,
                    AuthScheme::AzureApiKey,
                    settings.api_key.clone(),
                    settings.model.clone(),
                    settings.max_tokens,
                    settings.temperature,
                )))
            }
        }
    }
}
