//! Remote data access for the swapboard engine.
//!
//! Defines the provider traits the engine is wired against and the
//! `reqwest`-backed client implementing them over the external DEX API.
//! No retry or backoff: every failure is surfaced to the caller and
//! recovery happens at the interaction layer.

/// HTTP client for the DEX API.
pub mod client;
/// API endpoint configuration.
pub mod config;
/// Data-layer errors.
pub mod error;
/// Injection traits for reads and mutations.
pub mod provider;

pub use client::DexApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use provider::{MarketDataProvider, MutationGateway, QuoteProvider};
