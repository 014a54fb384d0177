use std::{env, time::Duration};

use cm_common::Amount;
use log::*;
use redis::{aio::MultiplexedConnection, AsyncCommands};

use crate::traits::{QuoteCache, QuoteCacheError, QuoteKey};

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

pub fn redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| {
        info!("REDIS_URL is not set. Using the default.");
        DEFAULT_REDIS_URL.to_string()
    })
}

/// The shipped [`QuoteCache`] backend: `GET` / `SET ... EX` against a Redis instance.
///
/// Prices are stored as their decimal string representation. The connection is multiplexed, so clones of this
/// struct share one TCP connection across all concurrent requests.
#[derive(Clone)]
pub struct RedisQuoteCache {
    conn: MultiplexedConnection,
}

impl RedisQuoteCache {
    pub async fn connect(url: &str) -> Result<Self, QuoteCacheError> {
        let client = redis::Client::open(url).map_err(|e| QuoteCacheError::StoreError(e.to_string()))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| QuoteCacheError::StoreError(e.to_string()))?;
        info!("📦️ Connected to the quote cache at {url}");
        Ok(Self { conn })
    }
}

impl QuoteCache for RedisQuoteCache {
    async fn quote(&self, key: &QuoteKey) -> Result<Option<Amount>, QuoteCacheError> {
        let mut conn = self.conn.clone();
        let value: Option<String> =
            conn.get(key.to_string()).await.map_err(|e| QuoteCacheError::StoreError(e.to_string()))?;
        value
            .map(|s| s.parse::<Amount>().map_err(|e| QuoteCacheError::MalformedValue(e.to_string())))
            .transpose()
    }

    async fn store_quote(&self, key: &QuoteKey, price: Amount, ttl: Duration) -> Result<(), QuoteCacheError> {
        let mut conn = self.conn.clone();
        let () = conn
            .set_ex(key.to_string(), price.to_string(), ttl.as_secs())
            .await
            .map_err(|e| QuoteCacheError::StoreError(e.to_string()))?;
        trace!("📦️ Cached {key} = {price} for {}s", ttl.as_secs());
        Ok(())
    }
}
