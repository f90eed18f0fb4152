/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for tpay-dex-adapter tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tpay_dex_adapter::{
    DexClient, DexConfig, Session, SessionEvents, WalletConnector, WalletSession,
};
use wiremock::MockServer;

pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_SIGNATURE: &str = "0x1b2c3d4e5f1b2c3d4e5f1b2c3d4e5f1b2c3d4e5f1b2c3d4e5f1b2c3d4e5f1b2c3d4e5f1b2c3d4e5f1b2c3d4e5f1b2c3d4e5f1b2c3d4e5f1b2c3d4e5f1b2c3d4e5f";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Records every side effect emitted by a wallet session
#[derive(Default)]
pub struct RecordingEvents {
    sessions: Mutex<Vec<Option<Session>>>,
    notifications: Mutex<Vec<String>>,
}

impl RecordingEvents {
    pub fn sessions(&self) -> Vec<Option<Session>> {
        self.sessions.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }
}

impl SessionEvents for RecordingEvents {
    fn session_changed(&self, session: Option<&Session>) {
        self.sessions.lock().unwrap().push(session.cloned());
    }

    fn notify(&self, message: &str) {
        self.notifications.lock().unwrap().push(message.to_string());
    }
}

/// Configuration pointed at `server` with the backend switched on or off
pub fn config_for(server: &MockServer, enable_backend: bool) -> DexConfig {
    DexConfig::default()
        .with_backend_url(&server.uri())
        .unwrap()
        .with_backend_enabled(enable_backend)
}

/// Build a wallet session backed by a real HTTP client
pub fn wallet_session(
    config: &DexConfig,
    connectors: Vec<Arc<dyn WalletConnector>>,
) -> (WalletSession, Arc<RecordingEvents>) {
    let events = Arc::new(RecordingEvents::default());
    let backend = Arc::new(DexClient::from_dex_config(config).unwrap());
    let session = WalletSession::new(config, connectors, backend, events.clone());
    (session, events)
}
