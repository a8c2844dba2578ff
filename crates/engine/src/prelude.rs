//! Convenient re-exports of the engine surface.

pub use crate::dispatch::{ActionDispatcher, DispatchPhase, NoRefresh, ReadRefresh, SubmitOutcome};
pub use crate::liquidity::{LiquidityDesk, LiquidityEntry};
pub use crate::notify::{NotificationCenter, NotificationHooks};
pub use crate::quote::{QuoteSynchronizer, QuoteView};
pub use crate::swap::{SwapInput, SwapSession};
