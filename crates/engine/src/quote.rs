//! Reactive quote synchronization.
//!
//! Every change to (source asset, destination asset, amount) issues a
//! fresh request to the pricing service. Requests are tagged with a
//! monotonic ticket; a response is applied only while its ticket is
//! still the latest issued, so a slow response can never overwrite the
//! result of a request issued after it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use swapboard_data::QuoteProvider;
use swapboard_domain::{AssetCode, SwapQuote, parse_positive_amount};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Quote state visible to the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct QuoteView {
    /// The current quote, absent while none is valid.
    pub quote: Option<SwapQuote>,
    /// A request is in flight.
    pub loading: bool,
    /// The last request failed.
    pub error: bool,
}

impl QuoteView {
    /// Whether the held quote should trigger a price-impact warning.
    #[must_use]
    pub fn high_impact(&self) -> bool {
        self.quote.as_ref().is_some_and(SwapQuote::is_high_impact)
    }
}

/// Keeps a [`QuoteView`] in sync with the latest input triple.
pub struct QuoteSynchronizer<P> {
    provider: Arc<P>,
    view: Arc<RwLock<QuoteView>>,
    /// Ticket of the most recently issued request.
    latest: AtomicU64,
}

impl<P: QuoteProvider> QuoteSynchronizer<P> {
    /// Creates a synchronizer over the given pricing source.
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            view: Arc::new(RwLock::new(QuoteView::default())),
            latest: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current quote state.
    pub async fn view(&self) -> QuoteView {
        self.view.read().await.clone()
    }

    /// Discards any held quote and supersedes in-flight requests.
    pub async fn clear(&self) {
        let ticket = self.issue_ticket();
        let mut view = self.view.write().await;
        if self.is_latest(ticket) {
            *view = QuoteView::default();
        }
    }

    /// Reacts to a change of the input triple.
    ///
    /// Invalid or non-positive amounts clear the quote without a request.
    /// On fetch failure the quote is cleared and the error flag raised;
    /// there is no automatic retry.
    pub async fn sync(&self, from: AssetCode, to: AssetCode, amount_text: &str) {
        let ticket = self.issue_ticket();

        let Some(amount) = parse_positive_amount(amount_text) else {
            let mut view = self.view.write().await;
            if self.is_latest(ticket) {
                *view = QuoteView::default();
            }
            return;
        };

        {
            let mut view = self.view.write().await;
            if !self.is_latest(ticket) {
                return;
            }
            view.loading = true;
            view.error = false;
        }

        let fetched = self.provider.fetch_quote(from, to, amount).await;

        let mut view = self.view.write().await;
        if !self.is_latest(ticket) {
            debug!(ticket, "Discarding superseded quote response");
            return;
        }

        match fetched {
            Ok(quote) => {
                if !quote.route_matches(from, to) {
                    warn!(
                        from = %from,
                        to = %to,
                        "Quote route endpoints do not match the requested pair"
                    );
                }
                debug!(
                    from = %from,
                    to = %to,
                    amount = %amount,
                    amount_out = %quote.amount_out,
                    "Quote updated"
                );
                view.quote = Some(quote);
                view.loading = false;
                view.error = false;
            }
            Err(e) => {
                warn!(from = %from, to = %to, error = %e, "Quote fetch failed");
                view.quote = None;
                view.loading = false;
                view.error = true;
            }
        }
    }

    fn issue_ticket(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}
