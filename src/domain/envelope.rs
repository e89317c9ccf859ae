use serde::{Deserialize, Serialize};

use crate::errors::SmartPingError;

/// Uniform result of every façade call; nothing is thrown past it
///
/// `success: true` with `data: None` means "not found", which is distinct from
/// any failure. `source` is an advisory provenance or failure-category tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl<T> ResultEnvelope<T> {
    pub fn ok(data: T, source: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            source: Some(source.into()),
        }
    }

    pub fn not_found(source: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            source: Some(source.into()),
        }
    }

    pub fn failure(error: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            source: Some(source.into()),
        }
    }

    pub fn from_error(error: &SmartPingError) -> Self {
        Self::failure(error.to_string(), error.tag())
    }

    pub fn from_result(result: Result<T, SmartPingError>, source: &str) -> Self {
        match result {
            Ok(data) => Self::ok(data, source),
            Err(e) => Self::from_error(&e),
        }
    }

    /// Like `from_result`, with `None` reported as a successful "not found"
    pub fn from_lookup(result: Result<Option<T>, SmartPingError>, source: &str) -> Self {
        match result {
            Ok(Some(data)) => Self::ok(data, source),
            Ok(None) => Self::not_found(source),
            Err(e) => Self::from_error(&e),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
