/*
[INPUT]:  Wallet providers, auth backend and configuration flags
[OUTPUT]: Connected sessions, connect failures and notifications
[POS]:    Auth layer - wallet connection and login flow
[UPDATE]: When auth flow or provider variants change
*/

pub mod discovery;
pub mod error;
pub mod evm_wallet;
pub mod provider;
pub mod session;
pub mod wallet;

pub use discovery::{DiscoveryConnector, FirstProvider, InjectedConnector, ProviderSelector};
pub use error::ConnectError;
pub use evm_wallet::{LocalEvmWallet, recover_signer};
pub use provider::{ProviderKind, WalletConnector, WalletError, WalletProvider, WalletResult};
pub use session::{
    ConnectOutcome, LOCAL_TOKEN, LOGIN_MESSAGE, LocalFallbackReason, Session, SessionEvents,
    SessionState, SessionToken, WalletSession, validate_signature,
};
pub use wallet::MockWalletProvider;
