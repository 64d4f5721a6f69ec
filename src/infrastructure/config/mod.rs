use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "testgen.toml";
pub const ENV_PREFIX: &str = "TESTGEN_";

/// Process configuration. Provider variables keep their conventional
/// unprefixed names; everything else is read from `TESTGEN_*`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub request_timeout_secs: u64,
    pub session_ttl_minutes: i64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_ttl_minutes: 60,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::raw().only(&["OPENAI_API_KEY", "OPENAI_MODEL", "OPENAI_BASE_URL"]))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self> {
        Self::figment()
            .extract()
            .map_err(|e| AppError::ConfigurationError(format!("Invalid settings: {}", e)))
    }
}
