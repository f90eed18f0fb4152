/*
[INPUT]:  Optional injected provider, candidate providers, user selection
[OUTPUT]: WalletConnector variants for direct and discovery acquisition
[POS]:    Auth layer - provider acquisition strategies
[UPDATE]: When adding connector variants or changing selection rules
*/

use std::sync::Arc;

use async_trait::async_trait;

use super::provider::{ProviderKind, WalletConnector, WalletError, WalletProvider, WalletResult};

/// Connector for a provider injected into the host environment.
///
/// Reports `NotAvailable` when nothing was injected.
#[derive(Clone, Default)]
pub struct InjectedConnector {
    provider: Option<Arc<dyn WalletProvider>>,
}

impl InjectedConnector {
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Connector for an environment without an injected wallet
    pub fn absent() -> Self {
        Self { provider: None }
    }

    pub fn is_present(&self) -> bool {
        self.provider.is_some()
    }
}

#[async_trait]
impl WalletConnector for InjectedConnector {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Injected
    }

    async fn connect(&self) -> WalletResult<Arc<dyn WalletProvider>> {
        self.provider.clone().ok_or(WalletError::NotAvailable)
    }
}

/// Lets the user pick one provider out of a list of names.
pub trait ProviderSelector: Send + Sync {
    /// Index into `options`, or `UserRejected` if the user backed out
    fn select(&self, options: &[&str]) -> WalletResult<usize>;
}

/// Non-interactive selector that takes the first option
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstProvider;

impl ProviderSelector for FirstProvider {
    fn select(&self, options: &[&str]) -> WalletResult<usize> {
        if options.is_empty() {
            Err(WalletError::NotAvailable)
        } else {
            Ok(0)
        }
    }
}

/// Discovery fallback: offers every supported provider and connects to the
/// one the selector picks.
pub struct DiscoveryConnector {
    candidates: Vec<Arc<dyn WalletProvider>>,
    selector: Arc<dyn ProviderSelector>,
}

impl DiscoveryConnector {
    pub fn new(candidates: Vec<Arc<dyn WalletProvider>>, selector: Arc<dyn ProviderSelector>) -> Self {
        Self {
            candidates,
            selector,
        }
    }

    pub fn candidate_names(&self) -> Vec<&str> {
        self.candidates.iter().map(|provider| provider.name()).collect()
    }
}

#[async_trait]
impl WalletConnector for DiscoveryConnector {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Discovery
    }

    async fn connect(&self) -> WalletResult<Arc<dyn WalletProvider>> {
        if self.candidates.is_empty() {
            return Err(WalletError::NotAvailable);
        }

        let names = self.candidate_names();
        let index = self.selector.select(&names)?;
        self.candidates.get(index).cloned().ok_or_else(|| {
            WalletError::Provider(format!("selected provider index {index} out of range"))
        })
    }
}
