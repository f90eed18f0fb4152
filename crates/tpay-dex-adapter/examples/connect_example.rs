/*
[INPUT]:  Test private key, default DexConfig
[OUTPUT]: Connected session printed to stdout
[POS]:    Examples - wallet connect flow demonstration
[UPDATE]: When connect flow changes
*/

use std::sync::Arc;

use tpay_dex_adapter::auth::FirstProvider;
use tpay_dex_adapter::*;

struct PrintEvents;

impl SessionEvents for PrintEvents {
    fn session_changed(&self, session: Option<&Session>) {
        match session {
            Some(session) => println!(
                "✓ Session: {} (token: {})",
                session.short_address(),
                session.token()
            ),
            None => println!("✓ Session cleared"),
        }
    }

    fn notify(&self, message: &str) {
        eprintln!("✗ {message}");
    }
}

/// Example: wallet connect flow
///
/// 1. No injected wallet, so the discovery connector is used
/// 2. The local key wallet signs "Login to Tpay DEX Demo"
/// 3. Backend is disabled by default, so a local session is produced
#[tokio::main]
async fn main() {
    println!("=== Tpay DEX Connect Example ===\n");

    let config = DexConfig::default();
    let client = match DexClient::from_dex_config(&config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    // Well-known development key, never use it for real funds
    let wallet = match LocalEvmWallet::new(
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    ) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Failed to load wallet: {}", e);
            return;
        }
    };

    let wallet: Arc<dyn WalletProvider> = Arc::new(wallet);
    let connectors: Vec<Arc<dyn WalletConnector>> = vec![
        Arc::new(InjectedConnector::absent()),
        Arc::new(DiscoveryConnector::new(
            vec![wallet],
            Arc::new(FirstProvider),
        )),
    ];

    let session = WalletSession::new(&config, connectors, Arc::new(client), Arc::new(PrintEvents));

    match session.connect().await {
        ConnectOutcome::Connected(s) => {
            println!("  backend verified: {}", s.is_backend_verified());
        }
        ConnectOutcome::Failed(err) => println!("  failed: {err}"),
        ConnectOutcome::AlreadyConnecting => println!("  already connecting"),
    }

    session.disconnect();
    println!("\n✓ Connect example complete");
}
