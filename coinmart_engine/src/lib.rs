//! Coinmart Engine
//!
//! The engine is the core of the Coinmart marketplace backend: it resolves USD quotes for currencies through a
//! time-bounded cache with batched upstream fetches, and it settles purchase orders against a wallet payment
//! collaborator with an atomic inventory decrement.
//!
//! The library is divided into three main sections:
//! 1. Storage and collaborator contracts ([`mod@traits`]). The catalog store, the quote cache, the market-data
//!    provider and the wallet payment service are all expressed as async traits so that backends can be swapped
//!    and mocked. SQLite ([`SqliteDatabase`]) and Redis ([`cache::RedisQuoteCache`]) are the shipped backends.
//! 2. The public API ([`mod@cm_api`]): [`PriceApi`] (cache-aside quote resolution), [`CatalogApi`] (currency and
//!    item listings) and [`OrderFlowApi`] (order settlement).
//! 3. The database row types ([`mod@db_types`]), which are shared with callers.
mod sqlite;

pub mod cache;
pub mod cm_api;
pub mod db_types;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use cm_api::{
    order_flow_api::OrderFlowApi,
    price_api::{PriceApi, QUOTE_TTL},
    price_objects::{CurrencySet, PriceMap},
    catalog_api::CatalogApi,
    errors::{PricingError, SettlementError},
};
pub use sqlite::{db::db_url, SqliteDatabase};
