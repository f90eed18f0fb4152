/*
[INPUT]:  EVM private key (hex string)
[OUTPUT]: Personal-sign signatures and checksummed address
[POS]:    Auth layer - local key wallet provider
[UPDATE]: When signing logic or EVM address formatting changes
*/

use std::str::FromStr;

use alloy_signer::{Signature, Signer};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use serde_json::Value;

use super::provider::{WalletError, WalletProvider, WalletResult};

/// Wallet backed by a private key held in process (EIP-191 personal_sign)
pub struct LocalEvmWallet {
    signer: PrivateKeySigner,
    address: String,
}

impl LocalEvmWallet {
    /// Create a wallet from a hex-encoded private key
    ///
    /// Supports both "0x"-prefixed and non-prefixed hex strings.
    pub fn new(private_key_hex: &str) -> WalletResult<Self> {
        let private_key_hex = private_key_hex.trim();
        let private_key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);
        let signer = PrivateKeySigner::from_str(private_key_hex)
            .map_err(|e| WalletError::Provider(format!("Invalid EVM private key: {e}")))?;

        let address = signer.address().to_checksum(None);

        Ok(Self { signer, address })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Sign with the wallet's own key and return `0x` + 65 bytes hex
    pub async fn sign_text(&self, message: &str) -> WalletResult<String> {
        let signature = self
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| WalletError::Provider(format!("Failed to sign EVM message: {e}")))?;

        // [r, s, v]
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}

impl std::fmt::Debug for LocalEvmWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalEvmWallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Recover the checksummed signer address of a personal-sign signature
pub fn recover_signer(message: &str, signature_hex: &str) -> WalletResult<String> {
    let raw = signature_hex.strip_prefix("0x").unwrap_or(signature_hex);
    let bytes = hex::decode(raw)
        .map_err(|e| WalletError::Provider(format!("Signature is not hex: {e}")))?;
    let signature = Signature::from_raw(&bytes)
        .map_err(|e| WalletError::Provider(format!("Malformed signature: {e}")))?;
    let address = signature
        .recover_address_from_msg(message.as_bytes())
        .map_err(|e| WalletError::Provider(format!("Failed to recover signer: {e}")))?;
    Ok(address.to_checksum(None))
}

#[async_trait]
impl WalletProvider for LocalEvmWallet {
    fn name(&self) -> &str {
        "local-key"
    }

    async fn request_accounts(&self) -> WalletResult<Vec<String>> {
        Ok(vec![self.address.clone()])
    }

    async fn sign_message(&self, address: &str, message: &str) -> WalletResult<Value> {
        if !address.eq_ignore_ascii_case(&self.address) {
            return Err(WalletError::Provider(format!(
                "Unknown account {address}; this wallet holds {}",
                self.address
            )));
        }
        self.sign_text(message).await.map(Value::String)
    }
}
