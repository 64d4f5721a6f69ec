use crate::domain::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Methods that change server state and therefore need a request body.
    pub fn requires_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(AppError::ValidationError(format!(
                "Unsupported HTTP method: {}",
                other
            ))),
        }
    }
}

/// The "authentication required" switch as it arrives from a form (`yes`/`no`)
/// or a JSON client (`true`/`false`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AuthFlag {
    Bool(bool),
    Text(String),
}

impl AuthFlag {
    pub fn is_set(&self) -> bool {
        match self {
            AuthFlag::Bool(value) => *value,
            AuthFlag::Text(value) => matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "yes" | "true" | "on" | "1"
            ),
        }
    }
}

/// Endpoint configuration exactly as submitted, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfigInput {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub auth_required: Option<AuthFlag>,
    #[serde(default)]
    pub auth_value: Option<String>,
    #[serde(default)]
    pub request_body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub method: HttpMethod,
    pub endpoint: String,
    pub auth_required: bool,
    pub auth_value: String,
    pub request_body: String,
}

fn normalized(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

impl ApiConfigInput {
    pub fn validate(self) -> Result<ApiConfig> {
        let endpoint = normalized(self.endpoint);
        if endpoint.is_empty() {
            return Err(AppError::ValidationError(
                "Endpoint URL is required".to_string(),
            ));
        }

        let method = match self.method.as_deref().map(str::trim) {
            None | Some("") => HttpMethod::default(),
            Some(raw) => raw.parse()?,
        };

        let auth_required = self
            .auth_required
            .as_ref()
            .map(AuthFlag::is_set)
            .unwrap_or(false);
        let auth_value = normalized(self.auth_value);
        if auth_required && auth_value.is_empty() {
            return Err(AppError::ValidationError(
                "Authentication value is required".to_string(),
            ));
        }

        let request_body = normalized(self.request_body);
        if method.requires_body() && request_body.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Request body is required for {} method",
                method
            )));
        }

        Ok(ApiConfig {
            method,
            endpoint,
            auth_required,
            auth_value,
            request_body,
        })
    }
}
