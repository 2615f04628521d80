//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Nothing to send
    #[error("nothing to translate: text is empty")]
    EmptyText,

    /// Server URL cannot be used as an HTTP base URL
    #[error("invalid server URL '{url}': {reason}")]
    InvalidUrl {
        /// URL as given
        url: String,
        /// What is wrong with it
        reason: String,
    },

    /// Nothing is listening at the server address
    #[error(
        "cannot connect to DeepLX server at {url}

It looks like DeepLX is not running. To fix this:

1. Start DeepLX with Docker:
   docker run -d -p 1188:1188 ghcr.io/owo-network/deeplx:latest

2. Or use a different server:
   translate --url https://your-server.com \"Hello world\"

3. Or configure a default server:
   translate config set --url https://your-server.com

For more info: https://github.com/OwO-Network/DeepLX"
    )]
    ConnectionRefused {
        /// Server that refused the connection
        url: String,
    },

    /// Request did not complete in time
    #[error("request to {url} timed out after {secs} seconds")]
    Timeout {
        /// Server that did not answer
        url: String,
        /// Configured timeout
        secs: u64,
    },

    /// Any other transport failure
    #[error("server not reachable at {url}: {message}")]
    Unreachable {
        /// Server that could not be reached
        url: String,
        /// Transport error text
        message: String,
    },

    /// HTTP 401
    #[error("authentication failed - check your token")]
    Unauthorized,

    /// HTTP 429
    #[error("rate limit exceeded - please wait and try again")]
    RateLimited,

    /// HTTP 404
    #[error("server endpoint not found - check your URL: {url}")]
    EndpointNotFound {
        /// Endpoint that answered 404
        url: String,
    },

    /// Any other non-200 status
    #[error("server returned status {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body as text
        body: String,
    },

    /// Body was not a translation response
    #[error("failed to parse response: {message}")]
    InvalidResponse {
        /// Decoder error
        message: String,
    },

    /// HTTP 200 carrying a payload-level failure code
    #[error("translation failed with code {code}: {message}")]
    TranslationFailed {
        /// Payload `code`
        code: i64,
        /// Payload `data`, usually the server's explanation
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TranslationError {
    /// True when the server could not be reached at all
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            TranslationError::ConnectionRefused { .. }
                | TranslationError::Timeout { .. }
                | TranslationError::Unreachable { .. }
        )
    }

    /// True when the server rejected the credentials
    pub fn is_auth_error(&self) -> bool {
        matches!(self, TranslationError::Unauthorized)
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_guidance_mentions_docker_and_url() {
        let err = TranslationError::ConnectionRefused {
            url: "http://localhost:1188".to_string(),
        };
        let msg = err.to_string();

        assert!(msg.contains("cannot connect to DeepLX server at http://localhost:1188"));
        assert!(msg.contains("docker run -d -p 1188:1188 ghcr.io/owo-network/deeplx:latest"));
        assert!(msg.contains("translate config set --url"));
    }

    #[test]
    fn test_error_classification() {
        assert!(TranslationError::Timeout {
            url: "http://x".to_string(),
            secs: 1
        }
        .is_connection_error());
        assert!(!TranslationError::Unauthorized.is_connection_error());
        assert!(TranslationError::Unauthorized.is_auth_error());
        assert!(!TranslationError::RateLimited.is_auth_error());
    }

    #[test]
    fn test_payload_failure_carries_server_message() {
        let err = TranslationError::TranslationFailed {
            code: 503,
            message: "busy".to_string(),
        };
        assert_eq!(err.to_string(), "translation failed with code 503: busy");
    }
}
