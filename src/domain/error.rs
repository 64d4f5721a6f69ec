use serde::Serialize;
use std::fmt;

/// Structural problems found while reading the model's test case envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ParseFailure {
    EmptyContent,
    MalformedJson { detail: String },
    EnvelopeNotObject { found: String },
    MissingTestCases,
    TestCasesNotArray { found: String },
    RecordNotObject { index: usize, found: String },
}

impl ParseFailure {
    pub fn code(&self) -> &'static str {
        match self {
            ParseFailure::EmptyContent => "empty_content",
            ParseFailure::MalformedJson { .. } => "malformed_json",
            ParseFailure::EnvelopeNotObject { .. } => "envelope_not_object",
            ParseFailure::MissingTestCases => "missing_test_cases",
            ParseFailure::TestCasesNotArray { .. } => "test_cases_not_array",
            ParseFailure::RecordNotObject { .. } => "record_not_object",
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::EmptyContent => write!(f, "model returned no content"),
            ParseFailure::MalformedJson { detail } => write!(f, "content is not valid JSON: {}", detail),
            ParseFailure::EnvelopeNotObject { found } => {
                write!(f, "expected a JSON object envelope, found {}", found)
            }
            ParseFailure::MissingTestCases => write!(f, "envelope has no \"testCases\" field"),
            ParseFailure::TestCasesNotArray { found } => {
                write!(f, "\"testCases\" must be an array, found {}", found)
            }
            ParseFailure::RecordNotObject { index, found } => {
                write!(f, "test case #{} must be an object, found {}", index + 1, found)
            }
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Internal(String),
    ValidationError(String),
    ConfigurationError(String),
    UpstreamError(String),
    ParseError(ParseFailure),
    EmptyExportError,
}

impl AppError {
    /// Stable identifier used in JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Internal(_) => "internal",
            AppError::ValidationError(_) => "validation",
            AppError::ConfigurationError(_) => "configuration",
            AppError::UpstreamError(_) => "upstream",
            AppError::ParseError(_) => "parse",
            AppError::EmptyExportError => "empty_export",
        }
    }

    /// HTTP status for JSON error responses.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::ValidationError(_) | AppError::EmptyExportError => 400,
            AppError::UpstreamError(_) | AppError::ParseError(_) => 502,
            AppError::ConfigurationError(_) | AppError::Internal(_) => 500,
        }
    }

    /// Text that is safe to show to the person using the form.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::ConfigurationError(msg) => format!("Service is not configured: {}", msg),
            AppError::UpstreamError(_) => {
                "Failed to generate test cases from the model provider. Please try again."
                    .to_string()
            }
            AppError::ParseError(failure) => format!(
                "The model returned test cases in an unexpected format ({}).",
                failure
            ),
            AppError::EmptyExportError => "No test cases to export".to_string(),
            AppError::Internal(_) => "An internal error occurred.".to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
            AppError::ParseError(failure) => write!(f, "Parse error: {}", failure),
            AppError::EmptyExportError => write!(f, "No test cases to export"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ParseFailure> for AppError {
    fn from(failure: ParseFailure) -> Self {
        AppError::ParseError(failure)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
