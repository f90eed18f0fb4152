/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Tpay DEX adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod config;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    ConnectError,
    ConnectOutcome,
    DiscoveryConnector,
    InjectedConnector,
    LocalEvmWallet,
    MockWalletProvider,
    Session,
    SessionEvents,
    SessionState,
    SessionToken,
    WalletConnector,
    WalletError,
    WalletProvider,
    WalletSession,
    recover_signer,
};

pub use config::DexConfig;

// Re-export commonly used types from http
pub use http::{
    AuthBackend,
    ClientConfig,
    DexClient,
    DexError,
    Result,
};

// Re-export all types
pub use types::*;
