use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};

/// Canned narration for scaffold mode.
pub struct MockLlmClient {
    delay: Duration,
}

impl MockLlmClient {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(format!(
            "Directly in front of you is a placeholder landmark. This narration was generated offline from a {} character prompt.",
            prompt.chars().count()
        ))
    }
}
