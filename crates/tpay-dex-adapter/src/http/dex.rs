/*
[INPUT]:  Swap and liquidity requests
[OUTPUT]: Transaction receipts (txHash)
[POS]:    HTTP layer - trade submission endpoints
[UPDATE]: When adding trade endpoints or changing submission flow
*/

use reqwest::Method;
use tracing::info;

use crate::http::{DexClient, Result};
use crate::types::{AddLiquidityRequest, SwapRequest, TxReceipt};

impl DexClient {
    /// Submit a token swap
    ///
    /// POST /dex/swap
    /// Blank fields are rejected before any request is sent.
    pub async fn swap(&self, req: &SwapRequest) -> Result<TxReceipt> {
        req.validate()?;
        let builder = self.request(Method::POST, "/dex/swap")?.json(req);
        let receipt: TxReceipt = self.send_json(builder).await?;
        info!(tx_hash = %receipt.tx_hash, token_in = %req.token_in, token_out = %req.token_out, "swap submitted");
        Ok(receipt)
    }

    /// Add liquidity to a pool
    ///
    /// POST /liquidity/add-liquidity
    pub async fn add_liquidity(&self, req: &AddLiquidityRequest) -> Result<TxReceipt> {
        req.validate()?;
        let builder = self
            .request(Method::POST, "/liquidity/add-liquidity")?
            .json(req);
        let receipt: TxReceipt = self.send_json(builder).await?;
        info!(tx_hash = %receipt.tx_hash, token0 = %req.token0, token1 = %req.token1, "liquidity submitted");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::{ClientConfig, DexClient, DexError};
    use crate::types::{AddLiquidityRequest, SwapRequest};

    async fn client_for(server: &MockServer) -> DexClient {
        DexClient::with_config_and_base_url(ClientConfig::default(), &server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_swap_returns_tx_hash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/dex/swap"))
            .and(header("authorization", "Bearer abc"))
            .and(body_json(serde_json::json!({
                "tokenIn": "0xaaa",
                "tokenOut": "0xbbb",
                "amountIn": "2.5",
                "recipient": "0xccc",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "txHash": "0xswap",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = client_for(&server).await;
        client.set_bearer_token(Some("abc".to_string()));

        let receipt = client
            .swap(&SwapRequest {
                token_in: "0xaaa".to_string(),
                token_out: "0xbbb".to_string(),
                amount_in: Decimal::new(25, 1),
                recipient: "0xccc".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(receipt.tx_hash, "0xswap");
    }

    #[tokio::test]
    async fn test_swap_validation_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/dex/swap"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .swap(&SwapRequest {
                token_in: String::new(),
                token_out: "0xbbb".to_string(),
                amount_in: Decimal::ONE,
                recipient: "0xccc".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DexError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_add_liquidity_surfaces_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/liquidity/add-liquidity"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "Pool does not exist",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .add_liquidity(&AddLiquidityRequest {
                token0: "0xaaa".to_string(),
                token1: "0xbbb".to_string(),
                amount0: Decimal::ONE,
                amount1: Decimal::TWO,
                recipient: "0xccc".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Pool does not exist");
    }
}
