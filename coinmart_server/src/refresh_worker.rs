use coinmart_engine::{
    cache::RedisQuoteCache,
    traits::MarketDataProvider,
    CatalogApi,
    PriceApi,
    SqliteDatabase,
    QUOTE_TTL,
};
use log::*;
use tokio::task::JoinHandle;

use crate::integrations::CmcMarketData;

/// Starts the quote refresh worker. Do not await the returned JoinHandle, as it will run indefinitely.
///
/// Every TTL period the worker pulls the full listings feed and unconditionally rewrites each quote into the
/// cache with a fresh expiry, keeping the read path on its fast path. The same snapshot keeps the currency
/// catalog in sync. One upstream call per tick, and a failed tick is just logged; the next one starts over.
pub fn start_refresh_worker(
    prices: PriceApi<RedisQuoteCache, CmcMarketData>,
    market: CmcMarketData,
    catalog: CatalogApi<SqliteDatabase>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(QUOTE_TTL);
        info!("🕰️ Quote refresh worker started");
        loop {
            timer.tick().await;
            debug!("🕰️ Running quote refresh job");
            match market.latest_listings().await {
                Ok(listings) => {
                    let cached = prices.cache_listings(&listings).await;
                    let synced = catalog.sync_listings(&listings).await;
                    info!("🕰️ {cached}/{} quotes refreshed, {synced} catalog currencies synced", listings.len());
                },
                Err(e) => {
                    error!("🕰️ Could not fetch the latest listings. {e}");
                },
            }
        }
    })
}
