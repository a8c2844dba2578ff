//! Interaction engine for the swapboard panel.
//!
//! This crate coordinates user input, the remote pricing service and
//! optimistic view state:
//! - Quote synchronization with latest-request-wins supersession
//! - Guarded action dispatch around remote mutations
//! - Local notification center
//! - Swap session and liquidity desk coordinators

/// Prelude module for convenient imports.
pub mod prelude;

/// Guarded dispatch of remote mutations.
pub mod dispatch;
/// Liquidity desk: pools, positions and deposit pre-fill.
pub mod liquidity;
/// Local notification center.
pub mod notify;
/// Reactive quote synchronization.
pub mod quote;
/// Swap session state.
pub mod swap;
