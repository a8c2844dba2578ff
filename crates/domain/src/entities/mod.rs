//! Entities mirrored from the remote API.
//!
//! All of these are externally owned: the engine holds transient copies
//! fetched over HTTP and never persists them.

/// User-facing alerts.
pub mod notification;
/// Two-asset liquidity pool snapshots.
pub mod pool;
/// A user's stake in a pool.
pub mod position;
/// Priced conversion estimates.
pub mod quote;
