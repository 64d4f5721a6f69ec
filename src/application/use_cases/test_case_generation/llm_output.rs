use crate::domain::error::{ParseFailure, Result};
use crate::domain::test_case::TestCase;
use crate::infrastructure::response::strip_code_fences;
use serde_json::Value;

const TEST_CASES_FIELD: &str = "testCases";

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Turns the model's reply into test cases. Only the envelope is checked;
/// individual records are passed through as sent.
pub(crate) fn parse_test_cases(output: &str) -> Result<Vec<TestCase>> {
    let normalized = strip_code_fences(output);
    if normalized.is_empty() {
        return Err(ParseFailure::EmptyContent.into());
    }

    let envelope: Value = serde_json::from_str(&normalized).map_err(|e| {
        ParseFailure::MalformedJson {
            detail: e.to_string(),
        }
    })?;

    let mut envelope = match envelope {
        Value::Object(map) => map,
        other => {
            return Err(ParseFailure::EnvelopeNotObject {
                found: json_kind(&other).to_string(),
            }
            .into())
        }
    };

    let records = match envelope.remove(TEST_CASES_FIELD) {
        None => return Err(ParseFailure::MissingTestCases.into()),
        Some(Value::Array(records)) => records,
        Some(other) => {
            return Err(ParseFailure::TestCasesNotArray {
                found: json_kind(&other).to_string(),
            }
            .into())
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| -> Result<TestCase> {
            if !record.is_object() {
                return Err(ParseFailure::RecordNotObject {
                    index,
                    found: json_kind(&record).to_string(),
                }
                .into());
            }
            // Every field is optional and lenient, so only a non-object can fail.
            serde_json::from_value::<TestCase>(record).map_err(|e| {
                ParseFailure::MalformedJson {
                    detail: format!("test case #{}: {}", index + 1, e),
                }
                .into()
            })
        })
        .collect()
}

/// Shortened copy of model output for logs.
pub(crate) fn preview_text(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let truncated: String = value.chars().take(max_chars).collect();
    format!("{}...", truncated)
}
