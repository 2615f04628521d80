//! Async DeepLX client: one reachability check, one POST, status mapping

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

use crate::core::config::{Settings, DEFAULT_URL};
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{TranslationRequest, TranslationResponse};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Options for building a [`DeepLxClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Server root, e.g. `http://localhost:1188`
    pub base_url: String,
    /// Bearer token; blank counts as none
    pub token: Option<String>,
    /// Bound on every request
    pub timeout: Duration,
    /// Send `GET {base_url}` before each translation
    pub check_connection: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            check_connection: true,
        }
    }
}

impl ClientOptions {
    /// Options for the given server and optional token
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            ..Default::default()
        }
    }

    /// Options from resolved settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.url.clone(), settings.token.clone())
    }

    /// Replace the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Turn the reachability check before each translation on or off
    pub fn with_connection_check(mut self, enabled: bool) -> Self {
        self.check_connection = enabled;
        self
    }
}

/// User-Agent sent with every request, `translate/<version>`
pub fn user_agent() -> String {
    format!("{}/{}", crate::APP_NAME, crate::VERSION)
}

/// Client for a single DeepLX server
#[derive(Debug, Clone)]
pub struct DeepLxClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
    check_first: bool,
}

impl DeepLxClient {
    /// Create a new client, validating the base URL
    pub fn new(options: ClientOptions) -> Result<Self> {
        let base_url = normalize_base_url(&options.base_url)?;
        let token = options
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(user_agent())
            .build()?;

        Ok(Self {
            client,
            base_url,
            token,
            timeout: options.timeout,
            check_first: options.check_connection,
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether requests carry a bearer token
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Full URL of the translation endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/translate", self.base_url)
    }

    /// Check that something answers HTTP at the base URL. Any status counts.
    pub async fn check_connection(&self) -> Result<()> {
        debug!("Checking connection to {}", self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!("Server answered with status {}", response.status().as_u16());
        Ok(())
    }

    /// Translate `text`; language codes are upper-cased before sending
    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<TranslationResponse> {
        if text.trim().is_empty() {
            return Err(TranslationError::EmptyText);
        }

        if self.check_first {
            self.check_connection().await?;
        }

        let request = TranslationRequest::new(text, source_lang, target_lang);
        self.send_request(&request).await
    }

    /// Send actual HTTP request
    async fn send_request(&self, request: &TranslationRequest) -> Result<TranslationResponse> {
        debug!("Request body: {}", serde_json::to_string(request)?);

        let mut builder = self
            .client
            .post(self.endpoint())
            .header(CONTENT_TYPE, "application/json")
            .json(request);

        match &self.token {
            Some(token) => {
                debug!("Using token authentication");
                builder = builder.bearer_auth(token);
            }
            None => debug!("No token provided"),
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        debug!("Response status: {}", status.as_u16());
        debug!("Response body: {}", body);

        match status {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => return Err(TranslationError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => return Err(TranslationError::RateLimited),
            StatusCode::NOT_FOUND => {
                return Err(TranslationError::EndpointNotFound {
                    url: self.base_url.clone(),
                })
            }
            other => {
                return Err(TranslationError::Api {
                    status: other.as_u16(),
                    body,
                })
            }
        }

        let result: TranslationResponse =
            serde_json::from_str(&body).map_err(|e| TranslationError::InvalidResponse {
                message: e.to_string(),
            })?;

        if !result.is_success() {
            return Err(TranslationError::TranslationFailed {
                code: result.code,
                message: result.data,
            });
        }

        debug!(
            "Method={}, SourceLang={}, ID={}",
            result.method, result.source_lang, result.id
        );

        Ok(result)
    }

    fn transport_error(&self, err: reqwest::Error) -> TranslationError {
        let url = self.base_url.clone();
        if err.is_timeout() {
            TranslationError::Timeout {
                url,
                secs: self.timeout.as_secs(),
            }
        } else if err.is_connect() {
            TranslationError::ConnectionRefused { url }
        } else {
            TranslationError::Unreachable {
                url,
                message: err.to_string(),
            }
        }
    }
}

/// Validate an HTTP(S) base URL and strip trailing slashes
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');

    let parsed = reqwest::Url::parse(trimmed).map_err(|e| TranslationError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(TranslationError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}', expected http or https", scheme),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DeepLxClient::new(ClientOptions::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1188");
        assert_eq!(client.endpoint(), "http://localhost:1188/translate");
        assert!(!client.has_token());
    }

    #[test]
    fn test_user_agent_names_binary_and_version() {
        assert_eq!(user_agent(), format!("translate/{}", env!("CARGO_PKG_VERSION")));
        assert_eq!(crate::APP_NAME, "translate");
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let client = DeepLxClient::new(ClientOptions::new("https://api.example.com/deeplx/", None))
            .unwrap();
        assert_eq!(client.endpoint(), "https://api.example.com/deeplx/translate");
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let client =
            DeepLxClient::new(ClientOptions::new(DEFAULT_URL, Some("   ".to_string()))).unwrap();
        assert!(!client.has_token());
    }

    #[test]
    fn test_invalid_urls_are_rejected() {
        for url in ["localhost:1188/x y", "not a url", "ftp://example.com", ""] {
            let err = DeepLxClient::new(ClientOptions::new(url, None)).unwrap_err();
            assert!(
                matches!(err, TranslationError::InvalidUrl { .. }),
                "{} gave {:?}",
                url,
                err
            );
        }
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_before_network() {
        // Nothing listens on the discard port; the error must not be a connection error.
        let client = DeepLxClient::new(ClientOptions::new("http://127.0.0.1:9", None)).unwrap();
        let err = client.translate("  ", "auto", "en").await.unwrap_err();
        assert!(matches!(err, TranslationError::EmptyText));
    }
}
