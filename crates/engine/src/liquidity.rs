//! Liquidity desk: pool/position snapshots and deposit entry.
//!
//! Caches the pool and position lists, pre-fills the counterpart deposit
//! amount with the constant-ratio estimator while the user types, and
//! submits add/remove operations through the dispatcher. The estimator
//! always uses the currently cached pool snapshot, so a refresh changes
//! the ratio applied to subsequent entries.

use crate::dispatch::{ActionDispatcher, DispatchPhase, ReadRefresh, SubmitOutcome};
use crate::notify::NotificationCenter;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use swapboard_data::{MarketDataProvider, MutationGateway};
use swapboard_domain::{LiquidityPosition, Pool, parse_positive_amount};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// The add-liquidity entry form.
#[derive(Debug, Clone, Default)]
pub struct LiquidityEntry {
    /// Selected pool, if any.
    pub pool_id: Option<String>,
    /// Raw asset-A amount text as typed.
    pub amount_a: String,
    /// Raw asset-B amount text as typed.
    pub amount_b: String,
}

#[derive(Default)]
struct DeskState {
    pools: Vec<Pool>,
    positions: Vec<LiquidityPosition>,
    entry: LiquidityEntry,
}

/// Coordinates pool/position reads and liquidity mutations.
pub struct LiquidityDesk<M, G> {
    market: Arc<M>,
    gateway: Arc<G>,
    dispatcher: ActionDispatcher,
    notices: NotificationCenter,
    state: Arc<RwLock<DeskState>>,
}

impl<M: MarketDataProvider, G: MutationGateway> LiquidityDesk<M, G> {
    /// Creates a desk with empty caches; call [`LiquidityDesk::refresh`]
    /// to load them.
    pub fn new(market: Arc<M>, gateway: Arc<G>, notices: NotificationCenter) -> Self {
        Self {
            market,
            gateway,
            dispatcher: ActionDispatcher::new(),
            notices,
            state: Arc::new(RwLock::new(DeskState::default())),
        }
    }

    /// Re-fetches pools and positions, replacing the caches.
    ///
    /// On failure the previous snapshots are kept; position amounts are
    /// pro-rata at fetch time and were already allowed to be stale.
    ///
    /// # Errors
    /// Returns the first fetch error encountered.
    pub async fn refresh(&self) -> anyhow::Result<()> {
        let pools = self.market.fetch_pools().await?;
        let positions = self.market.fetch_positions().await?;

        debug!(
            pools = pools.len(),
            positions = positions.len(),
            "Market data refreshed"
        );

        let mut state = self.state.write().await;
        state.pools = pools;
        state.positions = positions;
        Ok(())
    }

    /// Cached pool snapshots.
    pub async fn pools(&self) -> Vec<Pool> {
        self.state.read().await.pools.clone()
    }

    /// Cached position snapshots.
    pub async fn positions(&self) -> Vec<LiquidityPosition> {
        self.state.read().await.positions.clone()
    }

    /// Snapshot of the entry form.
    pub async fn entry(&self) -> LiquidityEntry {
        self.state.read().await.entry.clone()
    }

    /// Current dispatch phase.
    pub async fn phase(&self) -> DispatchPhase {
        self.dispatcher.phase().await
    }

    /// Selects a pool for the entry form.
    ///
    /// Returns `false` if the pool is not in the cache; the selection is
    /// left unchanged in that case.
    pub async fn select_pool(&self, pool_id: &str) -> bool {
        let mut state = self.state.write().await;
        if !state.pools.iter().any(|p| p.pool_id == pool_id) {
            warn!(pool_id, "Attempted to select unknown pool");
            return false;
        }
        state.entry.pool_id = Some(pool_id.to_string());
        true
    }

    /// Records the asset-A amount and pre-fills the asset-B side from
    /// the selected pool's reserve ratio.
    ///
    /// Invalid input or an empty reserve leaves the counterpart field
    /// unchanged.
    pub async fn enter_amount_a(&self, amount: &str) {
        let mut state = self.state.write().await;
        state.entry.amount_a = amount.to_string();

        let Some(estimate) = parse_positive_amount(amount).and_then(|input| {
            selected_pool(&state).and_then(|pool| pool.counterpart_for_a(input))
        }) else {
            return;
        };
        state.entry.amount_b = estimate.normalize().to_string();
    }

    /// Records the asset-B amount and pre-fills the asset-A side.
    pub async fn enter_amount_b(&self, amount: &str) {
        let mut state = self.state.write().await;
        state.entry.amount_b = amount.to_string();

        let Some(estimate) = parse_positive_amount(amount).and_then(|input| {
            selected_pool(&state).and_then(|pool| pool.counterpart_for_b(input))
        }) else {
            return;
        };
        state.entry.amount_a = estimate.normalize().to_string();
    }

    /// Records both deposit amounts verbatim, bypassing the estimator.
    ///
    /// For callers that already hold both sides (explicit flags, a
    /// restored draft) and do not want either overwritten by the
    /// reserve-ratio pre-fill.
    pub async fn enter_amounts(&self, amount_a: &str, amount_b: &str) {
        let mut state = self.state.write().await;
        state.entry.amount_a = amount_a.to_string();
        state.entry.amount_b = amount_b.to_string();
    }

    /// Resets the entry form.
    pub async fn clear_entry(&self) {
        self.state.write().await.entry = LiquidityEntry::default();
    }

    /// Submits the entry form as an add-liquidity mutation.
    ///
    /// Missing fields block the submission with a single error notice
    /// and no network call. On success the form is cleared and the
    /// caches re-fetched before the phase returns to idle.
    pub async fn add_liquidity(&self) -> SubmitOutcome {
        let entry = self.entry().await;

        let (Some(pool_id), Some(amount_a), Some(amount_b)) = (
            entry.pool_id,
            parse_positive_amount(&entry.amount_a),
            parse_positive_amount(&entry.amount_b),
        ) else {
            self.notices
                .push_error("Error", "Fill in all fields before adding liquidity")
                .await;
            return SubmitOutcome::Invalid;
        };

        let outcome = self
            .dispatcher
            .submit(
                "add_liquidity",
                self.gateway.add_liquidity(&pool_id, amount_a, amount_b),
                self,
                &self.notices,
                "Liquidity added successfully",
                "Failed to add liquidity",
            )
            .await;

        if outcome == SubmitOutcome::Completed {
            self.clear_entry().await;
        }
        outcome
    }

    /// Withdraws a position's shares from a pool.
    pub async fn remove_liquidity(&self, pool_id: &str, shares: Decimal) -> SubmitOutcome {
        if shares <= Decimal::ZERO {
            self.notices
                .push_error("Error", "Nothing to remove from this pool")
                .await;
            return SubmitOutcome::Invalid;
        }

        self.dispatcher
            .submit(
                "remove_liquidity",
                self.gateway.remove_liquidity(pool_id, shares),
                self,
                &self.notices,
                "Liquidity removed successfully",
                "Failed to remove liquidity",
            )
            .await
    }
}

fn selected_pool<'a>(state: &'a DeskState) -> Option<&'a Pool> {
    let pool_id = state.entry.pool_id.as_deref()?;
    state.pools.iter().find(|p| p.pool_id == pool_id)
}

#[async_trait]
impl<M: MarketDataProvider, G: MutationGateway> ReadRefresh for LiquidityDesk<M, G> {
    async fn refresh(&self) -> anyhow::Result<()> {
        LiquidityDesk::refresh(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use swapboard_domain::{AssetCode, Severity};

    struct FakeMarket {
        pools: Mutex<Vec<Pool>>,
        positions: Mutex<Vec<LiquidityPosition>>,
        fetches: AtomicUsize,
    }

    impl FakeMarket {
        fn with_reserves(reserves_a: Decimal, reserves_b: Decimal) -> Self {
            Self {
                pools: Mutex::new(vec![pool("TKT_USDC", reserves_a, reserves_b)]),
                positions: Mutex::new(Vec::new()),
                fetches: AtomicUsize::new(0),
            }
        }

        fn set_reserves(&self, reserves_a: Decimal, reserves_b: Decimal) {
            *self.pools.lock().unwrap() = vec![pool("TKT_USDC", reserves_a, reserves_b)];
        }
    }

    #[async_trait]
    impl MarketDataProvider for FakeMarket {
        async fn fetch_pools(&self) -> anyhow::Result<Vec<Pool>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.pools.lock().unwrap().clone())
        }

        async fn fetch_positions(&self) -> anyhow::Result<Vec<LiquidityPosition>> {
            Ok(self.positions.lock().unwrap().clone())
        }
    }

    #[derive(Default)]
    struct FakeGateway {
        adds: AtomicUsize,
        removes: AtomicUsize,
        fail: AtomicBool,
    }

    #[async_trait]
    impl MutationGateway for FakeGateway {
        async fn swap(&self, _: AssetCode, _: AssetCode, _: Decimal) -> anyhow::Result<()> {
            unreachable!("desk never swaps")
        }

        async fn add_liquidity(&self, _: &str, _: Decimal, _: Decimal) -> anyhow::Result<()> {
            self.adds.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("deposit rejected")
            }
            Ok(())
        }

        async fn remove_liquidity(&self, _: &str, _: Decimal) -> anyhow::Result<()> {
            self.removes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn pool(pool_id: &str, reserves_a: Decimal, reserves_b: Decimal) -> Pool {
        Pool {
            pool_id: pool_id.to_string(),
            asset_a: AssetCode::Tkt,
            asset_b: AssetCode::Usdc,
            reserves_a,
            reserves_b,
            total_shares: dec!(1000),
            price_a: dec!(2),
            price_b: dec!(0.5),
            liquidity_usd: dec!(4000),
        }
    }

    async fn desk(
        market: Arc<FakeMarket>,
        gateway: Arc<FakeGateway>,
    ) -> LiquidityDesk<FakeMarket, FakeGateway> {
        let desk = LiquidityDesk::new(market, gateway, NotificationCenter::new());
        desk.refresh().await.unwrap();
        desk
    }

    #[tokio::test]
    async fn test_entering_amount_a_prefills_amount_b() {
        let market = Arc::new(FakeMarket::with_reserves(dec!(1000), dec!(2000)));
        let d = desk(market, Arc::new(FakeGateway::default())).await;

        d.select_pool("TKT_USDC").await;
        d.enter_amount_a("100").await;

        assert_eq!(d.entry().await.amount_b, "200");
    }

    #[tokio::test]
    async fn test_entering_amount_b_prefills_amount_a() {
        let market = Arc::new(FakeMarket::with_reserves(dec!(1000), dec!(2000)));
        let d = desk(market, Arc::new(FakeGateway::default())).await;

        d.select_pool("TKT_USDC").await;
        d.enter_amount_b("200").await;

        assert_eq!(d.entry().await.amount_a, "100");
    }

    #[tokio::test]
    async fn test_entering_both_amounts_keeps_them_verbatim() {
        let market = Arc::new(FakeMarket::with_reserves(dec!(1000), dec!(2000)));
        let d = desk(market, Arc::new(FakeGateway::default())).await;

        d.select_pool("TKT_USDC").await;
        d.enter_amounts("100", "150").await;

        // Neither side is overwritten by the ratio estimate (which would
        // suggest 200 for this pool).
        let entry = d.entry().await;
        assert_eq!(entry.amount_a, "100");
        assert_eq!(entry.amount_b, "150");
    }

    #[tokio::test]
    async fn test_invalid_amount_leaves_counterpart_unchanged() {
        let market = Arc::new(FakeMarket::with_reserves(dec!(1000), dec!(2000)));
        let d = desk(market, Arc::new(FakeGateway::default())).await;

        d.select_pool("TKT_USDC").await;
        d.enter_amount_a("100").await;
        d.enter_amount_a("abc").await;

        let entry = d.entry().await;
        assert_eq!(entry.amount_a, "abc");
        assert_eq!(entry.amount_b, "200");
    }

    #[tokio::test]
    async fn test_estimator_uses_refreshed_reserves() {
        let market = Arc::new(FakeMarket::with_reserves(dec!(1000), dec!(2000)));
        let d = desk(market.clone(), Arc::new(FakeGateway::default())).await;

        d.select_pool("TKT_USDC").await;
        d.enter_amount_a("100").await;
        assert_eq!(d.entry().await.amount_b, "200");

        // New pool snapshot changes the ratio used by the next entry.
        market.set_reserves(dec!(1000), dec!(3000));
        d.refresh().await.unwrap();
        d.enter_amount_a("100").await;
        assert_eq!(d.entry().await.amount_b, "300");
    }

    #[tokio::test]
    async fn test_select_unknown_pool_is_rejected() {
        let market = Arc::new(FakeMarket::with_reserves(dec!(1000), dec!(2000)));
        let d = desk(market, Arc::new(FakeGateway::default())).await;

        assert!(!d.select_pool("XLM_BRL").await);
        assert!(d.entry().await.pool_id.is_none());
    }

    #[tokio::test]
    async fn test_add_liquidity_with_missing_fields_is_blocked() {
        let market = Arc::new(FakeMarket::with_reserves(dec!(1000), dec!(2000)));
        let gateway = Arc::new(FakeGateway::default());
        let d = desk(market, gateway.clone()).await;

        d.select_pool("TKT_USDC").await;
        d.enter_amount_a("100").await;
        d.enter_amount_b("").await;

        assert_eq!(d.add_liquidity().await, SubmitOutcome::Invalid);
        assert_eq!(gateway.adds.load(Ordering::SeqCst), 0);

        let all = d.notices.all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_add_liquidity_success_clears_entry_and_refetches() {
        let market = Arc::new(FakeMarket::with_reserves(dec!(1000), dec!(2000)));
        let gateway = Arc::new(FakeGateway::default());
        let d = desk(market.clone(), gateway.clone()).await;
        let fetches_before = market.fetches.load(Ordering::SeqCst);

        d.select_pool("TKT_USDC").await;
        d.enter_amount_a("100").await;

        assert_eq!(d.add_liquidity().await, SubmitOutcome::Completed);
        assert_eq!(gateway.adds.load(Ordering::SeqCst), 1);
        // The post-success refresh re-fetched the pools.
        assert_eq!(market.fetches.load(Ordering::SeqCst), fetches_before + 1);

        let entry = d.entry().await;
        assert!(entry.pool_id.is_none());
        assert!(entry.amount_a.is_empty());
        assert_eq!(d.phase().await, DispatchPhase::Idle);
    }

    #[tokio::test]
    async fn test_add_liquidity_failure_preserves_entry() {
        let market = Arc::new(FakeMarket::with_reserves(dec!(1000), dec!(2000)));
        let gateway = Arc::new(FakeGateway::default());
        gateway.fail.store(true, Ordering::SeqCst);
        let d = desk(market, gateway.clone()).await;

        d.select_pool("TKT_USDC").await;
        d.enter_amount_a("100").await;

        assert_eq!(d.add_liquidity().await, SubmitOutcome::Failed);

        let entry = d.entry().await;
        assert_eq!(entry.pool_id.as_deref(), Some("TKT_USDC"));
        assert_eq!(entry.amount_a, "100");
        assert_eq!(entry.amount_b, "200");

        let all = d.notices.all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_remove_liquidity() {
        let market = Arc::new(FakeMarket::with_reserves(dec!(1000), dec!(2000)));
        let gateway = Arc::new(FakeGateway::default());
        let d = desk(market, gateway.clone()).await;

        assert_eq!(
            d.remove_liquidity("TKT_USDC", dec!(50)).await,
            SubmitOutcome::Completed
        );
        assert_eq!(gateway.removes.load(Ordering::SeqCst), 1);

        assert_eq!(
            d.remove_liquidity("TKT_USDC", Decimal::ZERO).await,
            SubmitOutcome::Invalid
        );
        assert_eq!(gateway.removes.load(Ordering::SeqCst), 1);
    }
}
