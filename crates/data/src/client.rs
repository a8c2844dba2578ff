//! `reqwest`-backed client for the external DEX API.

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::provider::{MarketDataProvider, MutationGateway, QuoteProvider};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use swapboard_domain::{AssetCode, LiquidityPosition, Pool, SwapQuote};
use tracing::debug;

/// Response envelope for `GET /pools`.
#[derive(Debug, Deserialize)]
struct PoolsEnvelope {
    success: bool,
    #[serde(default)]
    pools: Vec<Pool>,
}

/// Response envelope for `GET /liquidity-positions`.
#[derive(Debug, Deserialize)]
struct PositionsEnvelope {
    success: bool,
    #[serde(default)]
    positions: Vec<LiquidityPosition>,
}

/// Response envelope for `GET /quote`.
#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    success: bool,
    quote: Option<SwapQuote>,
}

/// Acknowledgement envelope for mutation endpoints.
#[derive(Debug, Deserialize)]
struct AckEnvelope {
    success: bool,
}

impl PoolsEnvelope {
    fn into_result(self) -> Result<Vec<Pool>, ApiError> {
        if self.success {
            Ok(self.pools)
        } else {
            Err(ApiError::Rejected("pools"))
        }
    }
}

impl PositionsEnvelope {
    fn into_result(self) -> Result<Vec<LiquidityPosition>, ApiError> {
        if self.success {
            Ok(self.positions)
        } else {
            Err(ApiError::Rejected("liquidity-positions"))
        }
    }
}

impl QuoteEnvelope {
    fn into_result(self) -> Result<SwapQuote, ApiError> {
        match (self.success, self.quote) {
            (true, Some(quote)) => Ok(quote),
            _ => Err(ApiError::Rejected("quote")),
        }
    }
}

/// HTTP client for the remote DEX API.
///
/// Owns no state beyond the connection pool; every call maps one-to-one
/// to a single request with no retry.
#[derive(Debug, Clone)]
pub struct DexApiClient {
    http: Client,
    config: ApiConfig,
}

impl DexApiClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET");

        let response = self.http.get(&url).query(query).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    async fn post_json(&self, path: &str, body: serde_json::Value) -> Result<AckEnvelope, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "POST");

        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Fetches all available pools.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or a
    /// `success: false` envelope.
    pub async fn pools(&self) -> Result<Vec<Pool>, ApiError> {
        let envelope: PoolsEnvelope = self.get_json("pools", &[]).await?;
        envelope.into_result()
    }

    /// Fetches the user's liquidity positions.
    ///
    /// # Errors
    /// Same failure modes as [`DexApiClient::pools`].
    pub async fn liquidity_positions(&self) -> Result<Vec<LiquidityPosition>, ApiError> {
        let envelope: PositionsEnvelope = self.get_json("liquidity-positions", &[]).await?;
        envelope.into_result()
    }

    /// Fetches a quote for converting `amount` of `from` into `to`.
    ///
    /// # Errors
    /// Same failure modes as [`DexApiClient::pools`]; a `success: true`
    /// envelope without a quote body is also rejected.
    pub async fn quote(
        &self,
        from: AssetCode,
        to: AssetCode,
        amount: Decimal,
    ) -> Result<SwapQuote, ApiError> {
        let query = [
            ("fromAsset", from.code().to_string()),
            ("toAsset", to.code().to_string()),
            ("amount", amount.to_string()),
        ];
        let envelope: QuoteEnvelope = self.get_json("quote", &query).await?;
        envelope.into_result()
    }

    /// Submits a swap of `amount` of `from` into `to`.
    ///
    /// # Errors
    /// Returns an error when the server rejects the write.
    pub async fn submit_swap(
        &self,
        from: AssetCode,
        to: AssetCode,
        amount: Decimal,
    ) -> Result<(), ApiError> {
        let body = json!({
            "fromAsset": from.code(),
            "toAsset": to.code(),
            "amount": amount.to_string(),
        });
        let ack = self.post_json("swap", body).await?;
        if ack.success {
            Ok(())
        } else {
            Err(ApiError::Rejected("swap"))
        }
    }

    /// Deposits liquidity into a pool.
    ///
    /// # Errors
    /// Returns an error when the server rejects the write.
    pub async fn submit_add_liquidity(
        &self,
        pool_id: &str,
        amount_a: Decimal,
        amount_b: Decimal,
    ) -> Result<(), ApiError> {
        let body = json!({
            "poolId": pool_id,
            "amountA": amount_a.to_string(),
            "amountB": amount_b.to_string(),
        });
        let ack = self.post_json("liquidity/add", body).await?;
        if ack.success {
            Ok(())
        } else {
            Err(ApiError::Rejected("liquidity/add"))
        }
    }

    /// Withdraws liquidity from a pool.
    ///
    /// # Errors
    /// Returns an error when the server rejects the write.
    pub async fn submit_remove_liquidity(
        &self,
        pool_id: &str,
        shares: Decimal,
    ) -> Result<(), ApiError> {
        let body = json!({
            "poolId": pool_id,
            "shares": shares.to_string(),
        });
        let ack = self.post_json("liquidity/remove", body).await?;
        if ack.success {
            Ok(())
        } else {
            Err(ApiError::Rejected("liquidity/remove"))
        }
    }
}

#[async_trait]
impl QuoteProvider for DexApiClient {
    async fn fetch_quote(
        &self,
        from: AssetCode,
        to: AssetCode,
        amount: Decimal,
    ) -> anyhow::Result<SwapQuote> {
        Ok(self.quote(from, to, amount).await?)
    }
}

#[async_trait]
impl MarketDataProvider for DexApiClient {
    async fn fetch_pools(&self) -> anyhow::Result<Vec<Pool>> {
        Ok(self.pools().await?)
    }

    async fn fetch_positions(&self) -> anyhow::Result<Vec<LiquidityPosition>> {
        Ok(self.liquidity_positions().await?)
    }
}

#[async_trait]
impl MutationGateway for DexApiClient {
    async fn swap(&self, from: AssetCode, to: AssetCode, amount: Decimal) -> anyhow::Result<()> {
        Ok(self.submit_swap(from, to, amount).await?)
    }

    async fn add_liquidity(
        &self,
        pool_id: &str,
        amount_a: Decimal,
        amount_b: Decimal,
    ) -> anyhow::Result<()> {
        Ok(self.submit_add_liquidity(pool_id, amount_a, amount_b).await?)
    }

    async fn remove_liquidity(&self, pool_id: &str, shares: Decimal) -> anyhow::Result<()> {
        Ok(self.submit_remove_liquidity(pool_id, shares).await?)
    }
}
