use std::time::Duration;

use thiserror::Error;

/// Fatal errors that stop a run before or outside the per-endpoint boundary
#[derive(Error, Debug)]
pub enum CheckError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid proxy address: {0}")]
    InvalidProxyAddress(String),

    // I/O errors (report output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for checker operations
pub type Result<T> = std::result::Result<T, CheckError>;

impl From<url::ParseError> for CheckError {
    fn from(err: url::ParseError) -> Self {
        CheckError::InvalidConfig(err.to_string())
    }
}

/// A failed probe request.
///
/// Every variant is recoverable: the checker reports it and moves on to the
/// next endpoint.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Proxy connection failed: {0}")]
    Connect(String),

    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Invalid JSON in response: {0}")]
    InvalidJson(String),

    #[error("Unsupported target scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid target URL: {0}")]
    InvalidTarget(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }
}

impl From<hyper::Error> for TransportError {
    fn from(err: hyper::Error) -> Self {
        TransportError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::InvalidJson(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_mentions_timed_out() {
        let err = TransportError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "Request timed out after 10s");
        assert!(err.is_timeout());
    }

    #[test]
    fn test_json_error_conversion() {
        let err: TransportError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, TransportError::InvalidJson(_)));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_url_parse_error_is_config_error() {
        let err: CheckError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, CheckError::InvalidConfig(_)));
    }
}
