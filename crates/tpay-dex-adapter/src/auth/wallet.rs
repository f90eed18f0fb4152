/*
[INPUT]:  Scripted accounts, signatures and failures
[OUTPUT]: Deterministic WalletProvider for tests and demos
[POS]:    Auth layer - mock wallet implementation
[UPDATE]: When the provider trait gains capabilities
*/

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use super::provider::{WalletError, WalletProvider, WalletResult};

/// Mock wallet provider with predetermined responses.
///
/// Counts every call so tests can assert how many wallet round-trips a flow
/// made.
#[derive(Debug)]
pub struct MockWalletProvider {
    name: String,
    accounts: WalletResult<Vec<String>>,
    signature: WalletResult<Value>,
    sign_gate: Option<Arc<Notify>>,
    account_requests: AtomicUsize,
    sign_requests: AtomicUsize,
    signed_messages: Mutex<Vec<String>>,
}

impl MockWalletProvider {
    /// Provider exposing one account that signs with `signature`
    pub fn new(name: &str, address: &str, signature: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            accounts: Ok(vec![address.to_string()]),
            signature: Ok(signature.into()),
            sign_gate: None,
            account_requests: AtomicUsize::new(0),
            sign_requests: AtomicUsize::new(0),
            signed_messages: Mutex::new(Vec::new()),
        }
    }

    pub fn with_accounts(mut self, accounts: Vec<String>) -> Self {
        self.accounts = Ok(accounts);
        self
    }

    pub fn with_accounts_error(mut self, err: WalletError) -> Self {
        self.accounts = Err(err);
        self
    }

    pub fn with_signature(mut self, signature: impl Into<Value>) -> Self {
        self.signature = Ok(signature.into());
        self
    }

    pub fn with_sign_error(mut self, err: WalletError) -> Self {
        self.signature = Err(err);
        self
    }

    /// Block `sign_message` until the gate is notified
    pub fn with_sign_gate(mut self, gate: Arc<Notify>) -> Self {
        self.sign_gate = Some(gate);
        self
    }

    pub fn account_requests(&self) -> usize {
        self.account_requests.load(Ordering::SeqCst)
    }

    pub fn sign_requests(&self) -> usize {
        self.sign_requests.load(Ordering::SeqCst)
    }

    pub fn signed_messages(&self) -> Vec<String> {
        self.signed_messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn request_accounts(&self) -> WalletResult<Vec<String>> {
        self.account_requests.fetch_add(1, Ordering::SeqCst);
        self.accounts.clone()
    }

    async fn sign_message(&self, _address: &str, message: &str) -> WalletResult<Value> {
        self.sign_requests.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut messages) = self.signed_messages.lock() {
            messages.push(message.to_string());
        }
        if let Some(gate) = &self.sign_gate {
            gate.notified().await;
        }
        self.signature.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider() {
        let provider = MockWalletProvider::new("mock", "0x1234567890abcdef", "0xmock_signature");

        assert_eq!(provider.name(), "mock");
        assert_eq!(
            provider.request_accounts().await.unwrap(),
            vec!["0x1234567890abcdef".to_string()]
        );

        let signature = provider
            .sign_message("0x1234567890abcdef", "test message")
            .await
            .unwrap();
        assert_eq!(signature, Value::String("0xmock_signature".to_string()));
        assert_eq!(provider.account_requests(), 1);
        assert_eq!(provider.sign_requests(), 1);
        assert_eq!(provider.signed_messages(), vec!["test message".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_provider_errors() {
        let provider = MockWalletProvider::new("mock", "0x1", "0x2")
            .with_accounts_error(WalletError::UserRejected)
            .with_sign_error(WalletError::Provider("locked".to_string()));

        assert_eq!(provider.request_accounts().await, Err(WalletError::UserRejected));
        assert_eq!(
            provider.sign_message("0x1", "m").await,
            Err(WalletError::Provider("locked".to_string()))
        );
    }
}
