/*
[INPUT]:  Wallet, signature and backend failures of a connect attempt
[OUTPUT]: Terminal connect error taxonomy and user-facing messages
[POS]:    Auth layer - connect flow error handling
[UPDATE]: When adding failure kinds or changing notification text
*/

use thiserror::Error;

use super::provider::WalletError;

/// Terminal failure of one connect attempt.
///
/// Backend unavailability is not in here: it degrades to a local session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("No wallet provider available")]
    NoWalletAvailable,

    #[error("No accounts found")]
    NoAccounts,

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Backend rejected login: {}", .0.as_deref().unwrap_or("no reason given"))]
    BackendRejected(Option<String>),

    #[error("Request cancelled by user")]
    UserCancelled,
}

impl ConnectError {
    /// The single notification shown for a failed attempt
    pub fn user_message(&self) -> String {
        match self {
            ConnectError::UserCancelled => "Wallet connection was cancelled by user.".to_string(),
            ConnectError::NoWalletAvailable => {
                "Please install MetaMask or another Web3 wallet to connect.".to_string()
            }
            ConnectError::NoAccounts => {
                "No accounts found in your wallet. Please unlock your wallet and try again."
                    .to_string()
            }
            ConnectError::InvalidSignature(_) => {
                "Signature generation failed. Please try again.".to_string()
            }
            ConnectError::BackendRejected(Some(reason)) => {
                format!("Failed to connect wallet: {reason}")
            }
            other => format!("Failed to connect wallet: {other}"),
        }
    }

    /// Map a provider error raised while acquiring accounts
    pub(crate) fn from_acquisition(err: &WalletError) -> Self {
        match err {
            WalletError::UserRejected => ConnectError::UserCancelled,
            WalletError::NotAvailable | WalletError::Provider(_) => ConnectError::NoWalletAvailable,
        }
    }

    /// Map a provider error raised while signing the challenge
    pub(crate) fn from_signing(err: WalletError) -> Self {
        match err {
            WalletError::UserRejected => ConnectError::UserCancelled,
            WalletError::NotAvailable => ConnectError::NoWalletAvailable,
            WalletError::Provider(msg) => ConnectError::InvalidSignature(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_selected_by_kind() {
        assert!(ConnectError::UserCancelled.user_message().contains("cancelled"));
        assert!(ConnectError::NoWalletAvailable.user_message().contains("install"));
        assert!(ConnectError::NoAccounts.user_message().contains("No accounts"));
        assert!(
            ConnectError::InvalidSignature("empty".to_string())
                .user_message()
                .starts_with("Signature generation failed")
        );
        assert_eq!(
            ConnectError::BackendRejected(Some("bad signature".to_string())).user_message(),
            "Failed to connect wallet: bad signature"
        );
        assert_eq!(
            ConnectError::BackendRejected(None).user_message(),
            "Failed to connect wallet: Backend rejected login: no reason given"
        );
    }

    #[test]
    fn signing_rejection_is_cancellation() {
        assert_eq!(
            ConnectError::from_signing(WalletError::UserRejected),
            ConnectError::UserCancelled
        );
        assert_eq!(
            ConnectError::from_acquisition(&WalletError::Provider("boom".to_string())),
            ConnectError::NoWalletAvailable
        );
    }
}
