/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Response from `POST /auth/login`
///
/// `token` is only meaningful when `success` is true. Rejections may carry a
/// human readable reason in `message` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginResponse {
    /// Backend-provided reason, if any
    pub fn reason(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|reason| !reason.trim().is_empty())
    }
}

/// Response from swap and liquidity submissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    #[serde(rename = "txHash")]
    pub tx_hash: String,
}

/// Error body shape used by the backend for non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.error
            .or(self.message)
            .filter(|message| !message.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_response_without_token() {
        let parsed: LoginResponse =
            serde_json::from_value(json!({"success": false, "message": "bad signature"})).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.token, None);
        assert_eq!(parsed.reason(), Some("bad signature"));
    }

    #[test]
    fn tx_receipt_reads_tx_hash() {
        let parsed: TxReceipt = serde_json::from_value(json!({"txHash": "0xdead"})).unwrap();
        assert_eq!(parsed.tx_hash, "0xdead");
    }

    #[test]
    fn error_body_prefers_error_field() {
        let body: ErrorBody =
            serde_json::from_value(json!({"error": "insufficient liquidity", "message": "x"}))
                .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("insufficient liquidity"));
    }
}
