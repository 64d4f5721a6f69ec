use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::application::TestCaseGenerationUseCase;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::config::Settings;
use crate::infrastructure::llm_clients::OpenAIClient;
use crate::infrastructure::session_store::SessionStore;
use crate::interfaces::http::{start_server, HttpState};

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn into_io(err: AppError) -> std::io::Error {
    error!("Startup failed: {}", err);
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

fn build_state(settings: &Settings) -> Result<HttpState> {
    let llm_config = LLMConfig::from_settings(settings)?;
    let llm_client = OpenAIClient::from_config(&llm_config)?;
    info!(model = %llm_config.model, base_url = %llm_config.base_url, "LLM provider configured");

    let generator = TestCaseGenerationUseCase::new(Arc::new(llm_client), llm_config);
    Ok(HttpState {
        generator: Arc::new(generator),
        sessions: Arc::new(SessionStore::new(settings.session_ttl_minutes)),
    })
}

pub async fn run() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();

    let settings = Settings::load();
    let filter = settings
        .as_ref()
        .map(|s| s.log_filter.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(&filter);

    let settings = settings.map_err(into_io)?;
    let state = build_state(&settings).map_err(into_io)?;

    info!(host = %settings.host, port = settings.port, "Starting API test case generator");
    start_server(state, &settings.host, settings.port)?.await
}
