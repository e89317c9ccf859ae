use std::time::Duration;

use async_trait::async_trait;
use encoding_rs::WINDOWS_1252;
use log::debug;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::api::operation::Operation;
use crate::config::SmartPingSettings;
use crate::errors::{SmartPingError, fetch_context, with_fetch_context};
use crate::http::Transport;

const ACCEPT_XML: &str = "application/xml, text/xml, */*";

/// HTTP transport for the SmartPing endpoints
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(settings: &SmartPingSettings) -> Result<Self, SmartPingError> {
        let client = Self::build_client(settings.user_agent, settings.timeout_secs)?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client, SmartPingError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_XML));

        Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SmartPingError::Transport(format!("Failed to build HTTP client: {}", e)))
    }

    fn build_url(&self, operation: Operation) -> String {
        format!("{}{}", self.base_url, operation.path())
    }

    async fn send_get_request(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.client.get(url).query(query).send().await
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, operation: Operation, query: &[(String, String)]) -> Result<String, SmartPingError> {
        let url = self.build_url(operation);
        let response = self
            .send_get_request(&url, query)
            .await
            .map_err(|e| describe_request_error(operation, e))?;

        let status = response.status();
        let bytes = with_fetch_context(response.bytes().await, operation.path())?;
        let text = decode_latin1(&bytes);
        debug!("{} answered {} with {} bytes", operation.path(), status, bytes.len());

        if !status.is_success() {
            return Err(SmartPingError::Transport(format!("HTTP {}: {}", status.as_u16(), text)));
        }
        Ok(text)
    }
}

/// Upstream bodies are ISO-8859-1, never UTF-8
pub fn decode_latin1(bytes: &[u8]) -> String {
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}

fn describe_request_error(operation: Operation, error: reqwest::Error) -> SmartPingError {
    let reason = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    };
    SmartPingError::Transport(format!("{}: {}", fetch_context(operation.path()), reason))
}
