mod llm_output;
mod prompts;

use crate::domain::api_config::ApiConfig;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::domain::test_case::TestCase;
use crate::infrastructure::llm_clients::LLMClient;
use std::sync::Arc;
use tracing::{debug, info, warn};

use llm_output::{parse_test_cases, preview_text};
use prompts::{build_system_prompt, build_user_prompt};

const OUTPUT_PREVIEW_CHARS: usize = 600;

pub struct TestCaseGenerationUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    config: LLMConfig,
}

impl TestCaseGenerationUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>, config: LLMConfig) -> Self {
        Self { llm_client, config }
    }

    /// Makes exactly one completion call for the endpoint and returns the
    /// parsed batch.
    pub async fn execute(&self, api_config: &ApiConfig) -> Result<Vec<TestCase>> {
        info!(
            method = %api_config.method,
            endpoint = %api_config.endpoint,
            model = %self.config.model,
            "Generating test cases"
        );

        let user_prompt = build_user_prompt(api_config);
        let raw_output = self
            .llm_client
            .generate(&self.config, build_system_prompt(), &user_prompt)
            .await?;

        let test_cases = parse_test_cases(&raw_output).map_err(|err| {
            if let AppError::ParseError(failure) = &err {
                warn!(reason = failure.code(), "Model output rejected: {}", failure);
            }
            debug!(
                output_snippet = %preview_text(&raw_output, OUTPUT_PREVIEW_CHARS),
                "Rejected model output"
            );
            err
        })?;

        for test_case in &test_cases {
            let unrecognized = test_case.unrecognized_fields();
            if !unrecognized.is_empty() {
                warn!(
                    id = test_case.id(),
                    fields = ?unrecognized,
                    "Test case uses values outside the documented vocabulary"
                );
            }
        }

        info!(count = test_cases.len(), "Generated test cases");
        Ok(test_cases)
    }
}
