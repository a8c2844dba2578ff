//! Core domain types for the swapboard engine.
//!
//! This crate holds everything that is independent of transport and
//! presentation: asset codes, pool and position snapshots, swap quotes,
//! notifications, amount parsing/formatting and the proportional
//! counterpart estimator used to pre-fill liquidity deposits.

/// Amount parsing and display formatting.
pub mod amount;
/// The fixed set of tradable asset codes.
pub mod asset;
/// Externally owned entities mirrored locally.
pub mod entities;
/// Domain errors.
pub mod error;
/// Pure pricing helpers.
pub mod math;

pub use amount::{format_amount, format_usd, parse_positive_amount};
pub use asset::AssetCode;
pub use entities::notification::{Notification, NotificationAction, Severity};
pub use entities::pool::Pool;
pub use entities::position::LiquidityPosition;
pub use entities::quote::{HIGH_IMPACT_THRESHOLD_PCT, SwapQuote};
pub use error::DomainError;
pub use math::proportional::estimate_counterpart;
