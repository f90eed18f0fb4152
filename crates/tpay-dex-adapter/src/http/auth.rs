/*
[INPUT]:  Wallet address, challenge message and signature
[OUTPUT]: Backend login response (session token)
[POS]:    HTTP layer - authentication endpoint
[UPDATE]: When login endpoint or timeout policy changes
*/

use async_trait::async_trait;
use reqwest::Method;

use crate::http::{DexClient, DexError, Result};
use crate::types::{LoginRequest, LoginResponse};

/// Backend that exchanges a signed challenge for a session token
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;
}

impl DexClient {
    /// Submit a signed challenge
    ///
    /// POST /auth/login
    /// Bounded by `ClientConfig::login_timeout`; an elapsed timeout is
    /// reported as `DexError::Timeout`.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let timeout = self.config().login_timeout;
        let builder = self
            .request(Method::POST, "/auth/login")?
            .timeout(timeout)
            .json(request);

        self.send_json(builder).await.map_err(|err| match err {
            DexError::Http(inner) if inner.is_timeout() => DexError::Timeout {
                duration_ms: timeout.as_millis() as u64,
            },
            other => other,
        })
    }
}

#[async_trait]
impl AuthBackend for DexClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        DexClient::login(self, request).await
    }
}
