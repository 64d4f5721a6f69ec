use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

pub const REQUEST_BODY_PLACEHOLDER: &str = "N/A";

/// One generated test case. Every field is kept exactly as the model sent it;
/// absent values only turn into empty strings when rendered or exported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub steps: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// Accepts any JSON value for a text field. Models regularly emit request
/// bodies as objects and steps as arrays.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Array(items) if items.iter().all(Value::is_string) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        other => Some(other.to_string()),
    }))
}

impl TestCase {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn scenario(&self) -> &str {
        self.scenario.as_deref().unwrap_or("")
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }

    pub fn steps(&self) -> &str {
        self.steps.as_deref().unwrap_or("")
    }

    pub fn request_body(&self) -> &str {
        self.request_body
            .as_deref()
            .unwrap_or(REQUEST_BODY_PLACEHOLDER)
    }

    pub fn severity(&self) -> &str {
        self.severity.as_deref().unwrap_or("")
    }

    pub fn priority(&self) -> &str {
        self.priority.as_deref().unwrap_or("")
    }

    /// True when there is a concrete body worth showing as code.
    pub fn has_request_body(&self) -> bool {
        matches!(self.request_body.as_deref(), Some(body) if body != REQUEST_BODY_PLACEHOLDER)
    }

    /// Names of the classification fields whose values fall outside the
    /// documented vocabulary. Nothing is rejected; callers decide what to do.
    pub fn unrecognized_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.label.as_deref().and_then(|v| v.parse::<TestCaseLabel>().ok()).is_none() {
            fields.push("label");
        }
        if self.severity.as_deref().and_then(|v| v.parse::<Severity>().ok()).is_none() {
            fields.push("severity");
        }
        if self.priority.as_deref().and_then(|v| v.parse::<Priority>().ok()).is_none() {
            fields.push("priority");
        }
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestCaseLabel {
    Positive,
    Negative,
    Edge,
    Security,
    Performance,
}

impl TestCaseLabel {
    pub const ALL: [TestCaseLabel; 5] = [
        TestCaseLabel::Positive,
        TestCaseLabel::Negative,
        TestCaseLabel::Edge,
        TestCaseLabel::Security,
        TestCaseLabel::Performance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestCaseLabel::Positive => "Positive",
            TestCaseLabel::Negative => "Negative",
            TestCaseLabel::Edge => "Edge",
            TestCaseLabel::Security => "Security",
            TestCaseLabel::Performance => "Performance",
        }
    }
}

impl FromStr for TestCaseLabel {
    type Err = ();

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl FromStr for Severity {
    type Err = ();

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::P0, Priority::P1, Priority::P2, Priority::P3];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        }
    }
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_render_as_defaults() {
        let case = TestCase::default();
        assert_eq!(case.id(), "");
        assert_eq!(case.request_body(), "N/A");
        assert!(!case.has_request_body());
    }

    #[test]
    fn test_non_string_values_are_kept_as_text() {
        let case: TestCase = serde_json::from_value(serde_json::json!({
            "id": 7,
            "steps": ["1. Send request", "2. Check status"],
            "requestBody": {"name": "John"},
            "severity": null
        }))
        .unwrap();
        assert_eq!(case.id(), "7");
        assert_eq!(case.steps(), "1. Send request\n2. Check status");
        assert_eq!(case.request_body(), r#"{"name":"John"}"#);
        assert_eq!(case.severity, None);
    }

    #[test]
    fn test_unrecognized_fields_are_reported() {
        let case = TestCase {
            label: Some("positive".into()),
            severity: Some("Blocker".into()),
            priority: Some("P1".into()),
            ..Default::default()
        };
        assert_eq!(case.unrecognized_fields(), vec!["severity"]);
    }

    #[test]
    fn test_missing_classification_is_unrecognized() {
        assert_eq!(
            TestCase::default().unrecognized_fields(),
            vec!["label", "severity", "priority"]
        );
    }

    #[test]
    fn test_vocabulary_parsing() {
        assert_eq!("Security".parse::<TestCaseLabel>(), Ok(TestCaseLabel::Security));
        assert_eq!(" low ".parse::<Severity>(), Ok(Severity::Low));
        assert_eq!("p3".parse::<Priority>(), Ok(Priority::P3));
        assert!("P4".parse::<Priority>().is_err());
    }
}
