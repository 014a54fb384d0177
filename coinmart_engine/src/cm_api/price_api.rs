use std::{fmt::Debug, time::Duration};

use cm_common::Amount;
use futures_util::future::join_all;
use log::*;

use crate::{
    cm_api::price_objects::{CurrencySet, PriceMap},
    db_types::{CoinListing, Currency},
    traits::{MarketDataProvider, QuoteCache, QuoteKey},
};

/// How long a cached quote may be trusted. Shared by the read-path write-back and the periodic refresh job.
pub const QUOTE_TTL: Duration = Duration::from_secs(60);

/// The price resolution service: a single-round cache-aside batch resolver.
///
/// The cache is only ever populated from confirmed-fresh provider data, never speculatively, and a quote older
/// than [`QUOTE_TTL`] is never served — the cache store enforces that by expiring the key.
#[derive(Clone)]
pub struct PriceApi<C, M> {
    cache: C,
    market: M,
}

impl<C, M> Debug for PriceApi<C, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PriceApi")
    }
}

impl<C, M> PriceApi<C, M>
where
    C: QuoteCache,
    M: MarketDataProvider,
{
    pub fn new(cache: C, market: M) -> Self {
        Self { cache, market }
    }

    /// Resolve the USD price of each given currency.
    ///
    /// Cache probes are issued concurrently; currencies that miss are collected, deduplicated by id and fetched
    /// from the provider in one batched call, and the fresh quotes are written back with a new TTL. Currencies
    /// that receive no data from either source are absent from the result — resolution degrades, it never fails.
    pub async fn resolve(&self, currencies: &[Currency]) -> PriceMap {
        let mut results = PriceMap::new();
        if currencies.is_empty() {
            return results;
        }
        let unique: CurrencySet = currencies.iter().cloned().collect();
        let probes = unique.iter().map(|currency| async move {
            let key = QuoteKey::for_currency(currency);
            match self.cache.quote(&key).await {
                Ok(hit) => (currency, hit),
                Err(e) => {
                    // Cache-store trouble bounds staleness via the refetch, not by failing the request
                    warn!("💱️ Cache probe for {key} failed, treating as a miss. {e}");
                    (currency, None)
                },
            }
        });
        let mut outdated = CurrencySet::new();
        for (currency, hit) in join_all(probes).await {
            match hit {
                Some(price) => results.insert(currency.id, price),
                None => {
                    outdated.insert(currency.clone());
                },
            }
        }
        trace!("💱️ {} cache hits, {} outdated currencies", results.len(), outdated.len());
        if outdated.is_empty() {
            return results;
        }
        for (currency, price) in self.fetch_outdated(&outdated).await {
            results.insert(currency.id, price);
            let key = QuoteKey::for_currency(&currency);
            if let Err(e) = self.cache.store_quote(&key, price, QUOTE_TTL).await {
                warn!("💱️ Could not write {key} back to the cache. {e}");
            }
        }
        results
    }

    /// The batch quote fetcher: one upstream call for the whole outdated set.
    ///
    /// The provider response is correlated back to catalog currencies through the provider id recorded on each
    /// set entry. Currencies the provider omits are dropped; on provider failure the whole set is treated as
    /// "no fresh data available".
    async fn fetch_outdated(&self, outdated: &CurrencySet) -> Vec<(Currency, Amount)> {
        let provider_ids = outdated.provider_ids();
        debug!("💱️ Fetching {} quotes from the provider in one call", provider_ids.len());
        match self.market.latest_quotes(&provider_ids).await {
            Ok(quotes) => outdated
                .iter()
                .filter_map(|currency| quotes.get(&currency.provider_id).map(|price| (currency.clone(), *price)))
                .collect(),
            Err(e) => {
                warn!("💱️ Batch quote fetch failed, no fresh data available. {e}");
                Vec::new()
            },
        }
    }

    /// Write a listings snapshot into the cache, one key per coin, each with a fresh TTL. Used by the periodic
    /// refresh job. Returns the number of quotes written.
    pub async fn cache_listings(&self, listings: &[CoinListing]) -> usize {
        let writes = listings.iter().map(|listing| async move {
            let key = QuoteKey::for_listing(listing);
            match self.cache.store_quote(&key, listing.price_usd, QUOTE_TTL).await {
                Ok(()) => true,
                Err(e) => {
                    warn!("💱️ Could not cache listing {key}. {e}");
                    false
                },
            }
        });
        join_all(writes).await.into_iter().filter(|ok| *ok).count()
    }
}
