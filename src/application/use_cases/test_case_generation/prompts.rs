use crate::domain::api_config::ApiConfig;
use crate::domain::test_case::{Priority, Severity, TestCaseLabel, REQUEST_BODY_PLACEHOLDER};

pub(crate) const SYSTEM_PROMPT: &str = "You are an expert QA engineer specializing in API testing. Generate comprehensive test cases in valid JSON format only. Do not include any markdown formatting or code blocks.";

pub(crate) fn build_system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() {
        REQUEST_BODY_PLACEHOLDER
    } else {
        value
    }
}

fn vocabulary(values: &[&str]) -> String {
    values.join(", ")
}

pub(crate) fn build_user_prompt(config: &ApiConfig) -> String {
    let labels: Vec<_> = TestCaseLabel::ALL.iter().map(|v| v.as_str()).collect();
    let severities: Vec<_> = Severity::ALL.iter().map(|v| v.as_str()).collect();
    let priorities: Vec<_> = Priority::ALL.iter().map(|v| v.as_str()).collect();

    let mut body = String::new();
    body.push_str("Generate comprehensive test cases for the following API endpoint:\n\n");

    body.push_str("**API Details:**\n");
    body.push_str(&format!("- HTTP Method: {}\n", config.method));
    body.push_str(&format!("- Endpoint: {}\n", config.endpoint));
    body.push_str(&format!(
        "- Authentication Required: {}\n",
        if config.auth_required { "Yes" } else { "No" }
    ));
    body.push_str(&format!(
        "- Authentication: {}\n",
        or_placeholder(&config.auth_value)
    ));
    body.push_str(&format!(
        "- Request Body: {}\n",
        or_placeholder(&config.request_body)
    ));

    body.push_str("\n**Requirements:**\n");
    body.push_str("1. Generate test cases covering:\n");
    body.push_str("   - Positive scenarios (happy path)\n");
    body.push_str("   - Negative scenarios (error cases)\n");
    body.push_str("   - Edge cases (boundary conditions)\n");
    body.push_str("   - Security scenarios (authentication, authorization, injection attacks)\n");
    body.push_str("   - Performance scenarios (if applicable)\n\n");

    body.push_str("2. Each test case must include:\n");
    body.push_str("   - id: Unique identifier (e.g., TC001, TC002)\n");
    body.push_str("   - scenario: Brief description of what is being tested\n");
    body.push_str(&format!("   - label: One of ({})\n", vocabulary(&labels)));
    body.push_str("   - steps: Step-by-step instructions to execute the test\n");
    body.push_str(
        "   - requestBody: The request body to use (use \"N/A\" for GET/DELETE methods)\n",
    );
    body.push_str(&format!("   - severity: One of ({})\n", vocabulary(&severities)));
    body.push_str(&format!("   - priority: One of ({})\n\n", vocabulary(&priorities)));

    body.push_str(
        "3. Return ONLY valid JSON in this exact format (no markdown, no code blocks):\n",
    );
    body.push_str(
        r#"{
  "testCases": [
    {
      "id": "TC001",
      "scenario": "Test scenario description",
      "label": "Positive",
      "steps": "1. Step one\n2. Step two\n3. Step three",
      "requestBody": "N/A",
      "severity": "High",
      "priority": "P0"
    }
  ]
}
"#,
    );

    body.push_str("\nGenerate at least 10-15 comprehensive test cases covering all scenarios.");
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_config::{ApiConfigInput, AuthFlag};

    fn get_users() -> ApiConfig {
        ApiConfigInput {
            method: Some("GET".into()),
            endpoint: Some("https://api.example.com/users".into()),
            auth_required: Some(AuthFlag::Bool(false)),
            request_body: Some(String::new()),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let config = get_users();
        assert_eq!(build_user_prompt(&config), build_user_prompt(&config));
    }

    #[test]
    fn test_prompt_embeds_endpoint_details() {
        let prompt = build_user_prompt(&get_users());
        assert!(prompt.contains("GET"));
        assert!(prompt.contains("https://api.example.com/users"));
        assert!(prompt.contains("- Authentication Required: No\n"));
        assert!(prompt.contains("- Authentication: N/A\n"));
        assert!(prompt.contains("- Request Body: N/A\n"));
    }

    #[test]
    fn test_prompt_embeds_auth_and_body() {
        let config = ApiConfigInput {
            method: Some("POST".into()),
            endpoint: Some("https://api.example.com/users".into()),
            auth_required: Some(AuthFlag::Text("yes".into())),
            auth_value: Some("Bearer abc".into()),
            request_body: Some(r#"{"name": "John Doe"}"#.into()),
        }
        .validate()
        .unwrap();
        let prompt = build_user_prompt(&config);
        assert!(prompt.contains("- HTTP Method: POST\n"));
        assert!(prompt.contains("- Authentication Required: Yes\n"));
        assert!(prompt.contains("- Authentication: Bearer abc\n"));
        assert!(prompt.contains(r#"- Request Body: {"name": "John Doe"}"#));
    }

    #[test]
    fn test_prompt_lists_schema_and_vocabularies() {
        let prompt = build_user_prompt(&get_users());
        for field in ["id:", "scenario:", "label:", "steps:", "requestBody:", "severity:", "priority:"] {
            assert!(prompt.contains(field), "missing field {}", field);
        }
        assert!(prompt.contains("One of (Positive, Negative, Edge, Security, Performance)"));
        assert!(prompt.contains("One of (Critical, High, Medium, Low)"));
        assert!(prompt.contains("One of (P0, P1, P2, P3)"));
        assert!(prompt.contains("\"testCases\": ["));
        assert!(prompt.contains("10-15"));
    }

    #[test]
    fn test_example_envelope_is_valid_json() {
        let prompt = build_user_prompt(&get_users());
        let start = prompt.find("{\n  \"testCases\"").unwrap();
        let end = prompt.rfind('}').unwrap();
        let example: serde_json::Value = serde_json::from_str(&prompt[start..=end]).unwrap();
        assert_eq!(example["testCases"][0]["id"], "TC001");
    }

    #[test]
    fn test_system_prompt_sets_persona() {
        let system = build_system_prompt();
        assert!(system.contains("expert QA engineer"));
        assert!(system.contains("JSON"));
        assert!(system.contains("markdown"));
    }
}
