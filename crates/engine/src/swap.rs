//! Swap session state.
//!
//! Owns the (source asset, destination asset, amount) triple, keeps the
//! quote in sync with it, and submits confirmed swaps through the
//! dispatcher. Submitted amounts come exclusively from user input priced
//! by the quote service, never from the liquidity estimator.

use crate::dispatch::{ActionDispatcher, DispatchPhase, ReadRefresh, SubmitOutcome};
use crate::notify::NotificationCenter;
use crate::quote::{QuoteSynchronizer, QuoteView};
use std::sync::Arc;
use swapboard_data::{MutationGateway, QuoteProvider};
use swapboard_domain::{AssetCode, parse_positive_amount};
use tokio::sync::RwLock;
use tracing::debug;

/// The user-editable swap input triple.
#[derive(Debug, Clone)]
pub struct SwapInput {
    pub from_asset: AssetCode,
    pub to_asset: AssetCode,
    /// Raw amount text as typed; validated on sync and submit.
    pub amount: String,
}

impl Default for SwapInput {
    fn default() -> Self {
        Self {
            from_asset: AssetCode::Brl,
            to_asset: AssetCode::Tkt,
            amount: String::new(),
        }
    }
}

/// Coordinates swap input, quoting and submission.
pub struct SwapSession<P, G> {
    gateway: Arc<G>,
    quotes: QuoteSynchronizer<P>,
    dispatcher: ActionDispatcher,
    notices: NotificationCenter,
    refresher: Arc<dyn ReadRefresh>,
    input: Arc<RwLock<SwapInput>>,
}

impl<P: QuoteProvider, G: MutationGateway> SwapSession<P, G> {
    /// Creates a session with the default pair and an empty amount.
    pub fn new(
        provider: Arc<P>,
        gateway: Arc<G>,
        notices: NotificationCenter,
        refresher: Arc<dyn ReadRefresh>,
    ) -> Self {
        Self {
            gateway,
            quotes: QuoteSynchronizer::new(provider),
            dispatcher: ActionDispatcher::new(),
            notices,
            refresher,
            input: Arc::new(RwLock::new(SwapInput::default())),
        }
    }

    /// Snapshot of the current input triple.
    pub async fn input(&self) -> SwapInput {
        self.input.read().await.clone()
    }

    /// Snapshot of the current quote state.
    pub async fn quote_view(&self) -> QuoteView {
        self.quotes.view().await
    }

    /// Current dispatch phase.
    pub async fn phase(&self) -> DispatchPhase {
        self.dispatcher.phase().await
    }

    /// Updates the amount and re-syncs the quote.
    pub async fn set_amount(&self, amount: &str) {
        let (from, to) = {
            let mut input = self.input.write().await;
            input.amount = amount.to_string();
            (input.from_asset, input.to_asset)
        };
        self.quotes.sync(from, to, amount).await;
    }

    /// Updates the source asset and re-syncs the quote.
    pub async fn set_from_asset(&self, asset: AssetCode) {
        let (from, to, amount) = {
            let mut input = self.input.write().await;
            input.from_asset = asset;
            (input.from_asset, input.to_asset, input.amount.clone())
        };
        self.quotes.sync(from, to, &amount).await;
    }

    /// Updates the destination asset and re-syncs the quote.
    pub async fn set_to_asset(&self, asset: AssetCode) {
        let (from, to, amount) = {
            let mut input = self.input.write().await;
            input.to_asset = asset;
            (input.from_asset, input.to_asset, input.amount.clone())
        };
        self.quotes.sync(from, to, &amount).await;
    }

    /// Exchanges source and destination, clearing amount and quote.
    pub async fn flip_assets(&self) {
        {
            let mut input = self.input.write().await;
            let input = &mut *input;
            std::mem::swap(&mut input.from_asset, &mut input.to_asset);
            input.amount.clear();
        }
        self.quotes.clear().await;
    }

    /// Submits the current swap.
    ///
    /// Blocks without a network call unless the amount is positive, the
    /// pair is distinct and a quote is present. On success the amount
    /// and quote are cleared; on failure both are preserved for retry.
    pub async fn submit(&self) -> SubmitOutcome {
        let input = self.input.read().await.clone();

        let Some(amount) = parse_positive_amount(&input.amount) else {
            debug!("Swap submission blocked: no valid amount");
            return SubmitOutcome::Invalid;
        };
        if input.from_asset == input.to_asset {
            debug!("Swap submission blocked: identical assets");
            return SubmitOutcome::Invalid;
        }
        if self.quotes.view().await.quote.is_none() {
            debug!("Swap submission blocked: no quote");
            return SubmitOutcome::Invalid;
        }

        let outcome = self
            .dispatcher
            .submit(
                "swap",
                self.gateway
                    .swap(input.from_asset, input.to_asset, amount),
                self.refresher.as_ref(),
                &self.notices,
                "Swap executed successfully",
                "Swap submission failed",
            )
            .await;

        if outcome == SubmitOutcome::Completed {
            self.input.write().await.amount.clear();
            self.quotes.clear().await;
        }
        outcome
    }
}
