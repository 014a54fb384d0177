use std::collections::HashMap;

use cm_common::Amount;
use thiserror::Error;

use crate::db_types::{CoinListing, ProviderId};

#[derive(Debug, Clone, Error)]
pub enum MarketDataError {
    #[error("Could not reach the quote provider: {0}")]
    Network(String),
    #[error("Rate limited by the quote provider")]
    RateLimited,
    #[error("The quote provider returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// The remote quote service contract.
///
/// `latest_quotes` must issue exactly one upstream call per invocation, however many ids it is given — the
/// provider is rate-limited, and N calls for N stale currencies is precisely what the batch resolver exists to
/// avoid. The provider may omit ids it does not recognise; omitted ids are simply absent from the result.
#[allow(async_fn_in_trait)]
pub trait MarketDataProvider {
    /// The full latest-listings feed, used by the periodic cache refresh job.
    async fn latest_listings(&self) -> Result<Vec<CoinListing>, MarketDataError>;
    /// USD quotes for the given provider ids, in one batched call.
    async fn latest_quotes(&self, provider_ids: &[ProviderId]) -> Result<HashMap<ProviderId, Amount>, MarketDataError>;
}
