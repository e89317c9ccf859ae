use thiserror::Error;

/// Envelope tag for missing or incomplete credentials
pub const CONFIG_TAG: &str = "config";
/// Envelope tag for a team whose division link lacks pool parameters
pub const TEAM_VALIDATION_TAG: &str = "team_validation";
/// Envelope tag for caller input rejected before any request
pub const VALIDATION_TAG: &str = "validation";

/// Every way a SmartPing call can fail
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SmartPingError {
    /// Credentials absent or incomplete, detected before any network call
    #[error("{0}")]
    Configuration(String),

    /// Caller-supplied or derived input cannot form a request
    #[error("{message}")]
    Validation { tag: &'static str, message: String },

    /// Non-2xx status, network failure or timeout
    #[error("{0}")]
    Transport(String),

    /// 2xx response carrying the upstream `<erreur>` sentinel
    #[error("FFTT Error: {0}")]
    Protocol(String),

    /// Document that could not be read as XML
    #[error("{0}")]
    Parse(String),
}

impl SmartPingError {
    pub fn validation(tag: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            tag,
            message: message.into(),
        }
    }

    /// Category tag reported as the envelope `source`
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Configuration(_) => CONFIG_TAG,
            Self::Validation { tag, .. } => tag,
            Self::Transport(_) => "transport_error",
            Self::Protocol(_) => "fftt_error",
            Self::Parse(_) => "parse_error",
        }
    }

    /// Only remote failures are worth retrying; everything else fails the same way again
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Add context to fetch errors
pub fn fetch_context(operation: &str) -> String {
    format!("Failed to fetch {}", operation)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Wrap a transport-level failure with the operation it belongs to
pub fn with_fetch_context<T, E>(result: Result<T, E>, operation: &str) -> Result<T, SmartPingError>
where
    E: std::fmt::Display,
{
    result.map_err(|e| SmartPingError::Transport(format!("{}: {}", fetch_context(operation), e)))
}

/// Wrap an XML reader failure with the document it belongs to
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> Result<T, SmartPingError>
where
    E: std::fmt::Display,
{
    result.map_err(|e| SmartPingError::Parse(format!("{}: {}", parse_context(data_type), e)))
}
