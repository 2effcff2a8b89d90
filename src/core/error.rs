// src/core/error.rs

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// One violated input constraint. Raised before any fact collection starts.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "constraint", rename_all = "camelCase")]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("'{value}' is not a valid hostname")]
    InvalidHostname { value: String },
    #[error("'{value}' is not a supported platform")]
    UnsupportedPlatform { value: String },
    #[error("'{value}' is not a valid handle")]
    InvalidHandle { value: String },
}

/// Failure of a single fact source. Always absorbed by the collector.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("{name} did not answer within {timeout_ms} ms")]
    TimedOut { name: &'static str, timeout_ms: u64 },
    #[error("DNS lookup failed: {0}")]
    Dns(String),
    #[error("TLS inspection failed: {0}")]
    Tls(String),
    #[error("registration lookup failed: {0}")]
    Registration(String),
    #[error("profile source failed: {0}")]
    Profile(String),
    #[error("source task failed: {0}")]
    Task(String),
}

pub type SignalResult<T> = Result<T, CollectionError>;

/// Errors that reach the caller of the analyzer.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid input: {}", join_violations(.0))]
    Validation(Vec<ValidationError>),
    /// The detail is logged where the error is raised and never displayed.
    #[error("internal error")]
    Internal { detail: String },
}

fn join_violations(violations: &[ValidationError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AnalysisError {
    /// HTTP-equivalent status for the boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            AnalysisError::Validation(_) => 400,
            AnalysisError::Internal { .. } => 500,
        }
    }

    /// JSON body safe to hand to a caller.
    pub fn to_body(&self) -> Value {
        match self {
            AnalysisError::Validation(violations) => json!({
                "error": "validation_failed",
                "message": self.to_string(),
                "violations": violations,
            }),
            AnalysisError::Internal { .. } => json!({
                "error": "internal_error",
                "message": "The analysis could not be completed.",
            }),
        }
    }
}

impl From<ValidationError> for AnalysisError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(vec![value])
    }
}

impl From<Vec<ValidationError>> for AnalysisError {
    fn from(value: Vec<ValidationError>) -> Self {
        Self::Validation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_body_lists_every_constraint() {
        let err = AnalysisError::Validation(vec![
            ValidationError::UnsupportedPlatform { value: "myspace".into() },
            ValidationError::Empty { field: "handle" },
        ]);
        assert_eq!(err.status_code(), 400);
        let body = err.to_body();
        assert_eq!(body["violations"][0]["constraint"], "unsupportedPlatform");
        assert_eq!(body["violations"][1]["field"], "handle");
        assert!(body["message"].as_str().unwrap().contains("handle must not be empty"));
    }

    #[test]
    fn internal_body_hides_detail() {
        let err = AnalysisError::Internal { detail: "secret stack".into() };
        assert_eq!(err.status_code(), 500);
        let body = err.to_body().to_string();
        assert!(!body.contains("secret"));
        assert_eq!(err.to_string(), "internal error");
    }
}
