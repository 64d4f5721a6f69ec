use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::Settings;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LLMConfig {
    pub base_url: String,
    pub model: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl LLMConfig {
    /// Builds the provider configuration once at startup. A missing
    /// credential is fatal.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings
            .openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                AppError::ConfigurationError(
                    "OPENAI_API_KEY is not set in environment variables".to_string(),
                )
            })?
            .to_string();

        let model = match settings.openai_model.trim() {
            "" => DEFAULT_MODEL.to_string(),
            model => model.to_string(),
        };

        let base_url = match settings.openai_base_url.trim() {
            "" => DEFAULT_BASE_URL.to_string(),
            url => url.to_string(),
        };

        Ok(Self {
            base_url,
            model,
            api_key,
            timeout_secs: settings.request_timeout_secs,
            ..Self::default()
        })
    }

    pub fn chat_completions_url(&self) -> String {
        if self.base_url.ends_with('/') {
            format!("{}chat/completions", self.base_url)
        } else {
            format!("{}/chat/completions", self.base_url)
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            max_tokens: 4000,
            temperature: 0.7,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
