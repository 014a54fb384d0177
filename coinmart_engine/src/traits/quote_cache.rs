use std::{fmt::Display, time::Duration};

use cm_common::{Amount, QUOTE_PROVIDER};
use thiserror::Error;

use crate::db_types::{CoinListing, Currency, ProviderId};

#[derive(Debug, Clone, Error)]
pub enum QuoteCacheError {
    #[error("Cache store error: {0}")]
    StoreError(String),
    #[error("Cached value is not a price: {0}")]
    MalformedValue(String),
}

/// Cache key for a currency's USD quote: `{provider}:{name}:{provider_id}`.
///
/// Both the read-path cache-aside writer and the periodic refresh job build their keys through this type, so the
/// two writers can never drift apart on format. The provider's own id is used rather than the catalog row id:
/// the refresh job works straight off the listings feed and has no business querying the catalog for a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuoteKey {
    pub currency_name: String,
    pub provider_id: ProviderId,
}

impl QuoteKey {
    pub fn new<S: Into<String>, P: Into<ProviderId>>(currency_name: S, provider_id: P) -> Self {
        Self { currency_name: currency_name.into(), provider_id: provider_id.into() }
    }

    pub fn for_currency(currency: &Currency) -> Self {
        Self::new(currency.name.clone(), currency.provider_id.clone())
    }

    pub fn for_listing(listing: &CoinListing) -> Self {
        Self::new(listing.name.clone(), listing.provider_id.clone())
    }
}

impl Display for QuoteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{QUOTE_PROVIDER}:{}:{}", self.currency_name, self.provider_id)
    }
}

/// The external cache store contract: get, and set with an expiry.
///
/// Expired and never-set keys are indistinguishable — both come back as `None`. Callers treat store errors as
/// misses; the trait surfaces them so that implementations don't have to decide policy.
#[allow(async_fn_in_trait)]
pub trait QuoteCache {
    async fn quote(&self, key: &QuoteKey) -> Result<Option<Amount>, QuoteCacheError>;
    async fn store_quote(&self, key: &QuoteKey, price: Amount, ttl: Duration) -> Result<(), QuoteCacheError>;
}
