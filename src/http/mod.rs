pub mod client;
#[cfg(test)]
pub mod fake;

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::api::operation::Operation;
use crate::errors::SmartPingError;

pub use client::HttpTransport;

static ERROR_MESSAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<erreur>([^<]+)</erreur>").expect("valid error sentinel regex"));

/// One signed GET against an upstream operation, yielding the decoded body
///
/// Implementations never retry; every failure comes back as an error value.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, operation: Operation, query: &[(String, String)]) -> Result<String, SmartPingError>;
}

/// Surface the `<erreur>` sentinel of a 200 response as a protocol error
pub fn check_upstream_error(text: &str) -> Result<(), SmartPingError> {
    if !text.contains("<erreurs>") && !text.contains("<erreur>") {
        return Ok(());
    }

    let message = ERROR_MESSAGE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "Unknown FFTT error".to_string());
    Err(SmartPingError::Protocol(message))
}
