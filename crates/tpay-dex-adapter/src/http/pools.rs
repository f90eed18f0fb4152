/*
[INPUT]:  None (public pool listing)
[OUTPUT]: Liquidity pool list
[POS]:    HTTP layer - pool data endpoint (no auth required)
[UPDATE]: When pool endpoint or response format changes
*/

use reqwest::Method;

use crate::http::{DexClient, Result};
use crate::types::Pool;

impl DexClient {
    /// List liquidity pools
    ///
    /// GET /data/pools
    pub async fn query_pools(&self) -> Result<Vec<Pool>> {
        let builder = self.request(Method::GET, "/data/pools")?;
        self.send_json(builder).await
    }
}
