use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single call to a live provider. Never leaves the core for
/// image and speech; those degrade to their stub instead.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected provider response: {0}")]
    Response(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs may carry credentials; keep them out of logs and responses.
        ProviderError::Http(err.without_url().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Required request field missing or body malformed.
    InvalidInput,
    /// Live plan output did not parse or broke the plan schema.
    InvalidOutput,
    /// Live plan call failed before producing any output.
    ProviderError,
}

impl FailureKind {
    pub fn status(self) -> StatusCode {
        match self {
            FailureKind::InvalidInput => StatusCode::BAD_REQUEST,
            FailureKind::InvalidOutput => StatusCode::INTERNAL_SERVER_ERROR,
            FailureKind::ProviderError => StatusCode::BAD_GATEWAY,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureKind::InvalidInput => "invalid_input",
            FailureKind::InvalidOutput => "invalid_output",
            FailureKind::ProviderError => "provider_error",
        })
    }
}

/// Structured failure returned to the caller. `raw` holds the diagnostic
/// payload: the unparsed text, or the parsed object that broke the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{kind}: {error}")]
pub struct GenerationFailure {
    pub kind: FailureKind,
    pub raw: Value,
    pub error: String,
}

impl GenerationFailure {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self { kind: FailureKind::InvalidInput, raw: Value::Null, error: message.into() }
    }

    pub fn invalid_output(raw: Value, message: impl Into<String>) -> Self {
        Self { kind: FailureKind::InvalidOutput, raw, error: message.into() }
    }

    pub fn provider(err: &ProviderError) -> Self {
        Self {
            kind: FailureKind::ProviderError,
            raw: Value::String(err.to_string()),
            error: "Failed to get response from plan provider".to_string(),
        }
    }
}

impl From<JsonRejection> for GenerationFailure {
    fn from(rejection: JsonRejection) -> Self {
        GenerationFailure::invalid_input(rejection.body_text())
    }
}

impl IntoResponse for GenerationFailure {
    fn into_response(self) -> Response {
        (self.kind.status(), Json(self)).into_response()
    }
}

pub type GenerationOutcome<T> = Result<T, GenerationFailure>;
