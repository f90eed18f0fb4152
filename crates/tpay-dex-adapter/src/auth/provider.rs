/*
[INPUT]:  Wallet backends (injected provider, discovery modal, local keys)
[OUTPUT]: Uniform account + signing capability for the wallet session
[POS]:    Auth layer - wallet provider abstraction
[UPDATE]: When adding provider capabilities or connector variants
*/

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors reported by a wallet provider or connector
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// No provider of this kind is present
    #[error("No wallet provider available")]
    NotAvailable,

    /// The user declined the request in the wallet UI
    #[error("User rejected the request")]
    UserRejected,

    /// Any other provider-side failure
    #[error("Wallet provider error: {0}")]
    Provider(String),
}

pub type WalletResult<T> = std::result::Result<T, WalletError>;

/// How a provider was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Provider injected directly into the host environment
    Injected,
    /// Provider picked by the user from a list of connectors
    Discovery,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Injected => f.write_str("injected"),
            ProviderKind::Discovery => f.write_str("discovery"),
        }
    }
}

/// Account listing and message signing.
///
/// The trait is async because real providers round-trip through a wallet
/// UI or an external process.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Display name, used when listing connectors
    fn name(&self) -> &str;

    /// Ask the wallet for account access. The first entry is the active one.
    async fn request_accounts(&self) -> WalletResult<Vec<String>>;

    /// Sign `message` with `address`'s key.
    ///
    /// Returns the provider's raw payload. For EVM wallets this is a
    /// `0x`-prefixed hex string, but callers must not assume so.
    async fn sign_message(&self, address: &str, message: &str) -> WalletResult<Value>;
}

/// A way of obtaining a provider.
///
/// The wallet session tries connectors in order; the direct injected
/// provider and the discovery modal are both connectors.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn connect(&self) -> WalletResult<Arc<dyn WalletProvider>>;
}
