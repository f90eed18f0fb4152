/*
[INPUT]:  HTTP configuration (base URL, timeouts, session token)
[OUTPUT]: Configured reqwest client ready for backend calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{DEFAULT_BACKEND_URL, DEFAULT_LOGIN_TIMEOUT_MS, DexConfig};
use crate::http::{DexError, Result};
use crate::types::responses::ErrorBody;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Upper bound for `POST /auth/login`
    pub login_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            login_timeout: Duration::from_millis(DEFAULT_LOGIN_TIMEOUT_MS),
        }
    }
}

/// HTTP client for the DEX backend
#[derive(Debug, Clone)]
pub struct DexClient {
    http_client: Client,
    base_url: Url,
    config: ClientConfig,
    bearer_token: Option<String>,
}

impl DexClient {
    /// Create a new client against the default backend URL
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BACKEND_URL)
    }

    /// Create a client from the application configuration
    pub fn from_dex_config(dex_config: &DexConfig) -> Result<Self> {
        let config = ClientConfig {
            login_timeout: dex_config.login_timeout,
            ..ClientConfig::default()
        };
        Self::with_config_and_base_url(config, dex_config.backend_url.as_str())
    }

    /// Create a client with custom configuration and base URL
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
            config,
            bearer_token: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Attach (or remove) the session token sent as `Authorization: Bearer`
    pub fn set_bearer_token(&mut self, token: Option<String>) {
        self.bearer_token = token;
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// Build full URL for an endpoint, keeping any path prefix of the base URL
    fn url(&self, endpoint: &str) -> std::result::Result<Url, url::ParseError> {
        self.base_url.join(endpoint.trim_start_matches('/'))
    }

    /// Build a request builder for a backend endpoint
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        let builder = self.http_client.request(method, url);
        Ok(match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Send a request and decode a JSON body.
    ///
    /// Non-2xx statuses become `DexError::Api`, carrying the backend's
    /// `error`/`message` field when the body has one.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let bytes = response.bytes().await?;

        debug!(%url, status = status.as_u16(), bytes = bytes.len(), "backend response");

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(DexError::api_error(status, message));
        }

        serde_json::from_slice(&bytes).map_err(DexError::from)
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(DexError::Config(format!("backend URL cannot be a base: {raw}")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_client_points_at_local_backend() {
        let client = DexClient::new().unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:4000/");
        assert_eq!(client.config().login_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let client =
            DexClient::with_config_and_base_url(ClientConfig::default(), "http://example.com/api")
                .unwrap();
        assert_eq!(
            client.url("/auth/login").unwrap().as_str(),
            "http://example.com/api/auth/login"
        );
    }

    #[test]
    fn rejects_non_base_url() {
        let err = DexClient::with_config_and_base_url(ClientConfig::default(), "mailto:a@b.c")
            .unwrap_err();
        assert!(matches!(err, DexError::Config(_)));
    }

    #[test]
    fn bearer_token_roundtrip() {
        let mut client = DexClient::new().unwrap();
        assert!(client.bearer_token().is_none());
        client.set_bearer_token(Some("abc".to_string()));
        assert_eq!(client.bearer_token(), Some("abc"));
    }
}
