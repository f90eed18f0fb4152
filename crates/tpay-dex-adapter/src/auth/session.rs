/*
[INPUT]:  Wallet connectors, auth backend, DexConfig feature flags
[OUTPUT]: Session (address + token) delivered through SessionEvents
[POS]:    Auth layer - wallet connect/disconnect state machine
[UPDATE]: When connect steps, fallback rules or notifications change
*/

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::DexConfig;
use crate::http::AuthBackend;
use crate::types::LoginRequest;

use super::error::ConnectError;
use super::provider::{ProviderKind, WalletConnector, WalletError, WalletProvider};

/// Challenge signed on every login
pub const LOGIN_MESSAGE: &str = "Login to Tpay DEX Demo";

/// Token value carried by sessions the backend never verified
pub const LOCAL_TOKEN: &str = "local-token";

/// Credential attached to a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionToken {
    /// Backend skipped or unreachable
    Local,
    /// Issued by `/auth/login`
    Backend(String),
}

impl SessionToken {
    pub fn as_str(&self) -> &str {
        match self {
            SessionToken::Local => LOCAL_TOKEN,
            SessionToken::Backend(token) => token,
        }
    }

    pub fn is_backend_verified(&self) -> bool {
        matches!(self, SessionToken::Backend(_))
    }
}

/// Connected wallet identity, owned by whoever consumes `SessionEvents`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub address: String,
    pub token: SessionToken,
    pub connected_at: DateTime<Utc>,
}

impl Session {
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    pub fn is_backend_verified(&self) -> bool {
        self.token.is_backend_verified()
    }

    /// `0x1234...abcd` display form
    pub fn short_address(&self) -> String {
        let chars: Vec<char> = self.address.chars().collect();
        if chars.len() <= 10 {
            return self.address.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

/// Why a session ended up without backend verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalFallbackReason {
    /// `enable_backend` is off
    BackendDisabled,
    /// Login request failed at the network level or timed out
    BackendUnreachable,
}

/// Observable state of the wallet session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Connecting,
    ConnectedLocal {
        address: String,
        reason: LocalFallbackReason,
    },
    ConnectedBackend {
        address: String,
    },
    Disconnected,
    Failed(ConnectError),
}

impl SessionState {
    pub fn is_connected(&self) -> bool {
        matches!(
            self,
            SessionState::ConnectedLocal { .. } | SessionState::ConnectedBackend { .. }
        )
    }
}

/// Result of one `connect()` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected(Session),
    Failed(ConnectError),
    /// Another attempt was already running; nothing was done
    AlreadyConnecting,
}

/// Side effects of the session, implemented by the UI shell
pub trait SessionEvents: Send + Sync {
    /// New session on connect, `None` on disconnect
    fn session_changed(&self, session: Option<&Session>);

    /// User-visible notification for a failed attempt
    fn notify(&self, message: &str);
}

/// Per-attempt bookkeeping, dropped when the attempt resolves
#[derive(Debug)]
struct ConnectionAttempt {
    id: Uuid,
    provider_kind: Option<ProviderKind>,
    message: &'static str,
    signature: Option<String>,
}

impl ConnectionAttempt {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            provider_kind: None,
            message: LOGIN_MESSAGE,
            signature: None,
        }
    }
}

/// Clears the in-progress flag however the attempt ends
struct ConnectGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ConnectGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for ConnectGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Wallet connect-and-authenticate state machine.
///
/// `connect()` walks provider acquisition, account resolution, challenge
/// signing and the optional backend exchange in order, and always resolves
/// to a connected state or `Failed`. At most one attempt runs at a time.
pub struct WalletSession {
    connectors: Vec<Arc<dyn WalletConnector>>,
    backend: Arc<dyn AuthBackend>,
    events: Arc<dyn SessionEvents>,
    enable_backend: bool,
    debug_mode: bool,
    state: RwLock<SessionState>,
    connecting: AtomicBool,
}

impl WalletSession {
    /// `connectors` are tried in order, direct provider first.
    pub fn new(
        config: &DexConfig,
        connectors: Vec<Arc<dyn WalletConnector>>,
        backend: Arc<dyn AuthBackend>,
        events: Arc<dyn SessionEvents>,
    ) -> Self {
        Self {
            connectors,
            backend,
            events,
            enable_backend: config.enable_backend,
            debug_mode: config.debug_mode,
            state: RwLock::new(SessionState::Idle),
            connecting: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn is_connecting(&self) -> bool {
        self.connecting.load(Ordering::Acquire)
    }

    fn set_state(&self, next: SessionState) {
        let mut guard = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = next;
    }

    /// Run one connect attempt.
    ///
    /// Failures are reported through `SessionEvents::notify` exactly once
    /// and returned as `ConnectOutcome::Failed`; they never escape as errors.
    pub async fn connect(&self) -> ConnectOutcome {
        let Some(_guard) = ConnectGuard::acquire(&self.connecting) else {
            if self.debug_mode {
                debug!("connect ignored: attempt already in progress");
            }
            return ConnectOutcome::AlreadyConnecting;
        };

        let was_connected = self.state().is_connected();
        self.set_state(SessionState::Connecting);
        let mut attempt = ConnectionAttempt::new();
        self.step(&attempt, "starting wallet connection");

        match self.run_attempt(&mut attempt).await {
            Ok((session, state)) => {
                info!(
                    attempt_id = %attempt.id,
                    address = %session.address,
                    backend_verified = session.is_backend_verified(),
                    "wallet connected"
                );
                self.set_state(state);
                self.events.session_changed(Some(&session));
                ConnectOutcome::Connected(session)
            }
            Err(err) => {
                warn!(attempt_id = %attempt.id, error = %err, "wallet connection failed");
                self.set_state(SessionState::Failed(err.clone()));
                // A failed reconnect must not leave the shell holding the old session
                if was_connected {
                    self.events.session_changed(None);
                }
                self.events.notify(&err.user_message());
                ConnectOutcome::Failed(err)
            }
        }
    }

    /// Drop the current session. Never fails and makes no network call.
    pub fn disconnect(&self) {
        self.set_state(SessionState::Disconnected);
        self.events.session_changed(None);
        info!("wallet disconnected");
    }

    async fn run_attempt(
        &self,
        attempt: &mut ConnectionAttempt,
    ) -> Result<(Session, SessionState), ConnectError> {
        let (provider, address) = self.acquire_provider(attempt).await?;
        self.step(attempt, "account resolved");

        let raw = provider
            .sign_message(&address, attempt.message)
            .await
            .map_err(ConnectError::from_signing)?;
        let signature = validate_signature(&raw)?;
        attempt.signature = Some(signature.clone());
        self.step(attempt, "challenge signed");

        if !self.enable_backend {
            return Ok(self.local_session(address, LocalFallbackReason::BackendDisabled));
        }

        let request = LoginRequest {
            address: address.clone(),
            message: attempt.message.to_string(),
            signature,
        };
        self.step(attempt, "exchanging signature with backend");

        match self.backend.login(&request).await {
            Ok(response) if response.success => {
                let token = response
                    .token
                    .filter(|token| !token.trim().is_empty())
                    .ok_or_else(|| {
                        ConnectError::BackendRejected(Some(
                            "login response is missing a token".to_string(),
                        ))
                    })?;
                let session = Session {
                    address: address.clone(),
                    token: SessionToken::Backend(token),
                    connected_at: Utc::now(),
                };
                Ok((session, SessionState::ConnectedBackend { address }))
            }
            Ok(response) => Err(ConnectError::BackendRejected(
                response.reason().map(str::to_string),
            )),
            Err(err) if err.is_network_failure() => {
                warn!(attempt_id = %attempt.id, error = %err, "backend unreachable, continuing with local session");
                Ok(self.local_session(address, LocalFallbackReason::BackendUnreachable))
            }
            Err(err) => Err(ConnectError::BackendRejected(Some(err.user_message()))),
        }
    }

    /// Try each connector in order until one yields a usable account.
    ///
    /// An error or an empty account list moves on to the next connector; the
    /// last connector's failure decides the error.
    async fn acquire_provider(
        &self,
        attempt: &mut ConnectionAttempt,
    ) -> Result<(Arc<dyn WalletProvider>, String), ConnectError> {
        let mut last_error = ConnectError::from_acquisition(&WalletError::NotAvailable);

        for connector in &self.connectors {
            let kind = connector.kind();
            let outcome = match connector.connect().await {
                Ok(provider) => provider
                    .request_accounts()
                    .await
                    .map(|accounts| (provider, first_account(accounts))),
                Err(err) => Err(err),
            };

            match outcome {
                Ok((provider, Some(address))) => {
                    attempt.provider_kind = Some(kind);
                    self.step(attempt, "provider acquired");
                    return Ok((provider, address));
                }
                Ok((_, None)) => {
                    if self.debug_mode {
                        debug!(attempt_id = %attempt.id, provider = %kind, "provider returned no accounts, trying next");
                    }
                    last_error = ConnectError::NoAccounts;
                }
                Err(err) => {
                    if self.debug_mode {
                        debug!(attempt_id = %attempt.id, provider = %kind, error = %err, "provider unavailable, trying next");
                    }
                    last_error = ConnectError::from_acquisition(&err);
                }
            }
        }

        Err(last_error)
    }

    fn local_session(&self, address: String, reason: LocalFallbackReason) -> (Session, SessionState) {
        info!(address = %address, ?reason, "using local session");
        let session = Session {
            address: address.clone(),
            token: SessionToken::Local,
            connected_at: Utc::now(),
        };
        (session, SessionState::ConnectedLocal { address, reason })
    }

    fn step(&self, attempt: &ConnectionAttempt, what: &str) {
        if self.debug_mode {
            debug!(
                attempt_id = %attempt.id,
                provider = ?attempt.provider_kind,
                signed = attempt.signature.is_some(),
                backend_enabled = self.enable_backend,
                "{what}"
            );
        }
    }
}

/// First non-blank account, trimmed
fn first_account(accounts: Vec<String>) -> Option<String> {
    accounts
        .into_iter()
        .map(|account| account.trim().to_string())
        .find(|account| !account.is_empty())
}

/// Shape check on the provider's signature payload.
///
/// Must be a string of `0x` followed by an even, non-zero number of hex
/// digits. Cryptographic validity is left to the backend.
pub fn validate_signature(raw: &Value) -> Result<String, ConnectError> {
    let signature = raw
        .as_str()
        .ok_or_else(|| ConnectError::InvalidSignature("signature is not a string".to_string()))?
        .trim();

    if signature.is_empty() {
        return Err(ConnectError::InvalidSignature("signature is empty".to_string()));
    }

    let digits = signature
        .strip_prefix("0x")
        .ok_or_else(|| ConnectError::InvalidSignature("signature is missing the 0x prefix".to_string()))?;

    if digits.is_empty() {
        return Err(ConnectError::InvalidSignature("signature has no payload".to_string()));
    }

    hex::decode(digits)
        .map_err(|e| ConnectError::InvalidSignature(format!("signature is not hex: {e}")))?;

    Ok(signature.to_string())
}
