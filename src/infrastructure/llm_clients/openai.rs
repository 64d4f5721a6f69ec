use super::LLMClient;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use serde_json::json;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Chat-completions client for OpenAI and API-compatible providers.
pub struct OpenAIClient {
    client: reqwest::Client,
}

impl OpenAIClient {
    /// The timeout is a hard ceiling for the whole exchange, connect included.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }

    pub fn from_config(config: &LLMConfig) -> Result<Self> {
        Self::new(Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String> {
        let url = config.chat_completions_url();

        let body = json!({
            "model": config.model,
            "messages": [
                {
                    "role": "system",
                    "content": system
                },
                {
                    "role": "user",
                    "content": user
                }
            ],
            "temperature": config.temperature,
            "max_tokens": config.max_tokens,
        });

        debug!(model = %config.model, url = %url, "Sending chat completion request");
        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::UpstreamError(format!("Request timed out: {}", e))
                } else {
                    AppError::UpstreamError(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamError(format!("Failed to parse JSON: {}", e)))?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                AppError::UpstreamError(
                    "Invalid response from provider: missing choices[0].message.content"
                        .to_string(),
                )
            })?;

        info!(
            model = %config.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = content.len(),
            "Chat completion received"
        );
        Ok(content)
    }
}
