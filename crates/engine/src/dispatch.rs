//! Guarded dispatch of remote mutations.
//!
//! Wraps a single externally supplied asynchronous mutation with three
//! mutually exclusive phases. A submission is accepted only from `Idle`;
//! on success the dependent read refresh completes before the phase
//! returns to `Idle`, so the caller never renders pre-mutation data next
//! to a success indicator.

use crate::notify::NotificationCenter;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

/// Title used for success notices.
const SUCCESS_TITLE: &str = "Success";
/// Title used for error notices.
const ERROR_TITLE: &str = "Error";

/// Lifecycle of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPhase {
    /// No submission in progress; new submissions are accepted.
    #[default]
    Idle,
    /// The mutation has been invoked and has not settled.
    InFlight,
    /// The mutation succeeded; dependent reads are being re-fetched.
    Refreshing,
}

/// Result of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Mutation succeeded and reads were refreshed.
    Completed,
    /// Mutation was rejected by the remote side.
    Failed,
    /// A submission was already in progress; nothing was invoked.
    Rejected,
    /// Validation blocked the submission before any network call.
    Invalid,
}

/// Re-fetch of the read state a mutation invalidates.
#[async_trait]
pub trait ReadRefresh: Send + Sync {
    /// Re-fetches dependent reads (pools, positions, balances).
    async fn refresh(&self) -> anyhow::Result<()>;
}

/// Refresher for callers that cache no read state.
pub struct NoRefresh;

#[async_trait]
impl ReadRefresh for NoRefresh {
    async fn refresh(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Serializes submissions and owns the phase state machine.
///
/// `Idle -> InFlight -> Refreshing -> Idle` on success,
/// `Idle -> InFlight -> Idle` on failure. Every failure returns to
/// `Idle`; no state is terminal.
#[derive(Clone, Default)]
pub struct ActionDispatcher {
    phase: Arc<RwLock<DispatchPhase>>,
}

impl ActionDispatcher {
    /// Creates a dispatcher in the `Idle` phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub async fn phase(&self) -> DispatchPhase {
        *self.phase.read().await
    }

    /// Runs one guarded submission.
    ///
    /// The mutation future is dropped unawaited when another submission
    /// is in flight, so re-entrant submissions invoke nothing. Exactly
    /// one terminal notice is pushed per accepted attempt; a rejected
    /// re-entrant call produces none. A refresh failure after a
    /// successful mutation is logged but does not fail the submission.
    pub async fn submit<F>(
        &self,
        action: &str,
        mutation: F,
        refresher: &dyn ReadRefresh,
        notices: &NotificationCenter,
        success_message: &str,
        error_message: &str,
    ) -> SubmitOutcome
    where
        F: Future<Output = anyhow::Result<()>> + Send,
    {
        {
            let mut phase = self.phase.write().await;
            if *phase != DispatchPhase::Idle {
                debug!(action, "Submission rejected while another is in flight");
                return SubmitOutcome::Rejected;
            }
            *phase = DispatchPhase::InFlight;
        }

        debug!(action, "Submitting mutation");
        match mutation.await {
            Ok(()) => {
                *self.phase.write().await = DispatchPhase::Refreshing;
                if let Err(e) = refresher.refresh().await {
                    warn!(action, error = %e, "Post-submit refresh failed");
                }
                *self.phase.write().await = DispatchPhase::Idle;
                notices.push_success(SUCCESS_TITLE, success_message).await;
                SubmitOutcome::Completed
            }
            Err(e) => {
                error!(action, error = %e, "Mutation failed");
                *self.phase.write().await = DispatchPhase::Idle;
                notices.push_error(ERROR_TITLE, error_message).await;
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use swapboard_domain::Severity;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct CountingRefresh {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ReadRefresh for CountingRefresh {
        async fn refresh(&self) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingRefresh;

    #[async_trait]
    impl ReadRefresh for FailingRefresh {
        async fn refresh(&self) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("pools endpoint unreachable"))
        }
    }

    #[tokio::test]
    async fn test_success_path_refreshes_and_notifies_once() {
        let dispatcher = ActionDispatcher::new();
        let refresher = CountingRefresh::default();
        let notices = NotificationCenter::new();

        let outcome = dispatcher
            .submit(
                "swap",
                async { Ok(()) },
                &refresher,
                &notices,
                "Swap executed successfully",
                "Swap failed",
            )
            .await;

        assert_eq!(outcome, SubmitOutcome::Completed);
        assert_eq!(dispatcher.phase().await, DispatchPhase::Idle);
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);

        let all = notices.all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_failure_path_skips_refresh_and_notifies_once() {
        let dispatcher = ActionDispatcher::new();
        let refresher = CountingRefresh::default();
        let notices = NotificationCenter::new();

        let outcome = dispatcher
            .submit(
                "swap",
                async { Err(anyhow::anyhow!("insufficient balance")) },
                &refresher,
                &notices,
                "Swap executed successfully",
                "Swap failed",
            )
            .await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(dispatcher.phase().await, DispatchPhase::Idle);
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 0);

        let all = notices.all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_reentrant_submission_is_rejected() {
        let dispatcher = Arc::new(ActionDispatcher::new());
        let notices = NotificationCenter::new();
        let gate = Arc::new(Notify::new());
        let invocations = Arc::new(AtomicUsize::new(0));

        let d = dispatcher.clone();
        let n = notices.clone();
        let g = gate.clone();
        let count = invocations.clone();
        let first = tokio::spawn(async move {
            d.submit(
                "swap",
                async {
                    count.fetch_add(1, Ordering::SeqCst);
                    g.notified().await;
                    Ok(())
                },
                &NoRefresh,
                &n,
                "ok",
                "err",
            )
            .await
        });
        tokio::task::yield_now().await;
        assert_eq!(dispatcher.phase().await, DispatchPhase::InFlight);

        // Second submission while the first is in flight.
        let count = invocations.clone();
        let outcome = dispatcher
            .submit(
                "swap",
                async {
                    count.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
                &NoRefresh,
                &notices,
                "ok",
                "err",
            )
            .await;
        assert_eq!(outcome, SubmitOutcome::Rejected);

        gate.notify_one();
        assert_eq!(first.await.unwrap(), SubmitOutcome::Completed);

        // The mutation ran exactly once and one notice was produced.
        assert_eq!(invocations.load(Ordering::SeqCst), 1);
        assert_eq!(notices.all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_failure_still_completes_with_one_notice() {
        let dispatcher = ActionDispatcher::new();
        let notices = NotificationCenter::new();

        let outcome = dispatcher
            .submit(
                "add_liquidity",
                async { Ok(()) },
                &FailingRefresh,
                &notices,
                "Liquidity added",
                "Failed to add liquidity",
            )
            .await;

        assert_eq!(outcome, SubmitOutcome::Completed);
        assert_eq!(dispatcher.phase().await, DispatchPhase::Idle);

        let all = notices.all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].severity, Severity::Success);
    }
}
