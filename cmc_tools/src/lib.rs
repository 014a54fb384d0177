//! A thin client for the CoinMarketCap REST API.
//!
//! Only the two endpoints the marketplace needs are wrapped: the full latest-listings feed (used by the periodic
//! cache refresh job) and the batched quotes lookup (used by the price resolution slow path). Everything else the
//! API offers is deliberately absent.

mod api;
mod config;
mod data_objects;
mod error;

pub use api::CoinMarketCapApi;
pub use config::CmcConfig;
pub use data_objects::{CmcListing, CmcQuote, CmcUsdQuote};
pub use error::CmcApiError;
