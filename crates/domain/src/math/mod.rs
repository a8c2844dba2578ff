//! Pure pricing helpers.

/// Constant-ratio counterpart projection for liquidity deposits.
pub mod proportional;
