//! Injection traits separating the engine from the concrete transport.
//!
//! The engine never talks HTTP directly; it is constructed against these
//! traits so tests can drive it with in-memory fakes and callers can
//! substitute their own mutation boundary.

use async_trait::async_trait;
use rust_decimal::Decimal;
use swapboard_domain::{AssetCode, LiquidityPosition, Pool, SwapQuote};

/// Source of priced conversion estimates.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetches a quote for converting `amount` of `from` into `to`.
    async fn fetch_quote(
        &self,
        from: AssetCode,
        to: AssetCode,
        amount: Decimal,
    ) -> anyhow::Result<SwapQuote>;
}

/// Source of pool and position snapshots.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches all available pools.
    async fn fetch_pools(&self) -> anyhow::Result<Vec<Pool>>;

    /// Fetches the user's liquidity positions.
    async fn fetch_positions(&self) -> anyhow::Result<Vec<LiquidityPosition>>;
}

/// Externally supplied mutation boundary.
///
/// All three operations may reject; the engine preserves the user's
/// input on failure so a retry needs no re-entry.
#[async_trait]
pub trait MutationGateway: Send + Sync {
    /// Submits a confirmed swap.
    async fn swap(&self, from: AssetCode, to: AssetCode, amount: Decimal) -> anyhow::Result<()>;

    /// Deposits liquidity into a pool.
    async fn add_liquidity(
        &self,
        pool_id: &str,
        amount_a: Decimal,
        amount_b: Decimal,
    ) -> anyhow::Result<()>;

    /// Withdraws liquidity from a pool.
    async fn remove_liquidity(&self, pool_id: &str, shares: Decimal) -> anyhow::Result<()>;
}
