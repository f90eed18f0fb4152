/*
[INPUT]:  Session events from the wallet session, user selection
[OUTPUT]: Owned session state and terminal notifications
[POS]:    UI shell - session owner and wallet picker
[UPDATE]: When session display or wallet selection changes
*/

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Select, theme::ColorfulTheme};
use tracing::warn;

use tpay_dex_adapter::auth::{FirstProvider, ProviderSelector, WalletResult};
use tpay_dex_adapter::{
    DexClient, DexConfig, DiscoveryConnector, InjectedConnector, LocalEvmWallet, Session,
    SessionEvents, WalletConnector, WalletError, WalletProvider, WalletSession,
};

use crate::config::CliConfig;

/// Terminal shell; the only owner of the current session
#[derive(Default)]
pub struct Shell {
    session: Mutex<Option<Session>>,
}

impl Shell {
    pub fn session(&self) -> Option<Session> {
        self.session
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Attach the session token to `client` when the backend issued it
    pub fn authorize(&self, client: &mut DexClient) {
        let token = self
            .session()
            .filter(Session::is_backend_verified)
            .map(|session| session.token().to_string());
        client.set_bearer_token(token);
    }
}

impl SessionEvents for Shell {
    fn session_changed(&self, session: Option<&Session>) {
        match session {
            Some(session) => {
                let label = if session.is_backend_verified() {
                    style("backend verified").green()
                } else {
                    style("local session").yellow()
                };
                println!(
                    "{} {} ({})",
                    style("Connected").bold().green(),
                    session.short_address(),
                    label
                );
            }
            None => println!("{}", style("Disconnected").dim()),
        }

        let mut guard = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = session.cloned();
    }

    fn notify(&self, message: &str) {
        eprintln!("{}", style(message).red());
    }
}

/// Interactive wallet picker
pub struct PromptSelector;

impl ProviderSelector for PromptSelector {
    fn select(&self, options: &[&str]) -> WalletResult<usize> {
        let theme = ColorfulTheme::default();
        Select::with_theme(&theme)
            .with_prompt("Select a wallet")
            .items(options)
            .default(0)
            .interact_opt()
            .map_err(|err| WalletError::Provider(format!("wallet prompt failed: {err}")))?
            .ok_or(WalletError::UserRejected)
    }
}

/// Options controlling how wallets are offered
pub struct WalletOptions<'a> {
    pub injected_key: Option<&'a str>,
    pub interactive: bool,
}

/// Build the direct connector followed by the discovery connector
pub fn build_connectors(
    config: &CliConfig,
    options: &WalletOptions<'_>,
) -> Result<Vec<Arc<dyn WalletConnector>>> {
    let injected = match options.injected_key {
        Some(key) => {
            let wallet = LocalEvmWallet::new(key).context("load injected wallet key")?;
            InjectedConnector::new(Arc::new(wallet))
        }
        None => InjectedConnector::absent(),
    };

    let mut candidates: Vec<Arc<dyn WalletProvider>> = Vec::new();
    for entry in &config.wallets {
        let Some(key) = entry.resolve_key() else {
            warn!(wallet = %entry.name, "wallet has no private key configured, skipping");
            continue;
        };
        match LocalEvmWallet::new(&key) {
            Ok(wallet) => candidates.push(Arc::new(NamedWallet {
                name: entry.name.clone(),
                inner: wallet,
            })),
            Err(err) => warn!(wallet = %entry.name, error = %err, "skipping wallet"),
        }
    }

    let selector: Arc<dyn ProviderSelector> = if options.interactive {
        Arc::new(PromptSelector)
    } else {
        Arc::new(FirstProvider)
    };

    Ok(vec![
        Arc::new(injected),
        Arc::new(DiscoveryConnector::new(candidates, selector)),
    ])
}

/// Wire a wallet session to the shell
pub fn wallet_session(
    dex: &DexConfig,
    connectors: Vec<Arc<dyn WalletConnector>>,
    shell: Arc<Shell>,
) -> Result<WalletSession> {
    let backend = DexClient::from_dex_config(dex).context("create backend client")?;
    Ok(WalletSession::new(dex, connectors, Arc::new(backend), shell))
}

/// Local key wallet listed under its configured name
struct NamedWallet {
    name: String,
    inner: LocalEvmWallet,
}

#[async_trait::async_trait]
impl WalletProvider for NamedWallet {
    fn name(&self) -> &str {
        &self.name
    }

    async fn request_accounts(&self) -> WalletResult<Vec<String>> {
        self.inner.request_accounts().await
    }

    async fn sign_message(&self, address: &str, message: &str) -> WalletResult<serde_json::Value> {
        self.inner.sign_message(address, message).await
    }
}
