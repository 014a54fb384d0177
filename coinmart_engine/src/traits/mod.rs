//! Contracts for the engine's collaborators.
//!
//! Each external dependency of the core — the catalog store, the quote cache, the market-data provider and the
//! wallet payment service — is expressed as a small async trait with its own error type. The engine only ever
//! talks to these traits; concrete backends live in [`crate::sqlite`], [`crate::cache`] and in the server's
//! integrations module.
mod market_data;
mod payments;
mod quote_cache;
mod storage;

pub use market_data::{MarketDataError, MarketDataProvider};
pub use payments::{PaymentConfirmation, PaymentRequest, WalletPaymentError, WalletPayments};
pub use quote_cache::{QuoteCache, QuoteCacheError, QuoteKey};
pub use storage::{CatalogError, CatalogManagement};
