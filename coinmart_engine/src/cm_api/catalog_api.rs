use std::{collections::HashMap, fmt::Debug};

use log::*;

use crate::{
    db_types::{CoinListing, Currency, Item, NewCurrency, NewItem, Pagination},
    traits::{CatalogError, CatalogManagement},
};

/// Read access to the currency and item catalog, plus the provider-listings sync.
pub struct CatalogApi<B> {
    db: B,
}

impl<B> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi")
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn currencies(&self, pagination: Pagination) -> Result<Vec<Currency>, CatalogError> {
        self.db.fetch_currencies(pagination).await
    }

    pub async fn currency(&self, id: i64) -> Result<Option<Currency>, CatalogError> {
        self.db.fetch_currency(id).await
    }

    /// The currencies with the given ids, keyed by id. Unknown ids are absent.
    pub async fn currencies_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Currency>, CatalogError> {
        let currencies = self.db.fetch_currencies_by_ids(ids).await?;
        Ok(currencies.into_iter().map(|c| (c.id, c)).collect())
    }

    pub async fn items(&self, pagination: Pagination) -> Result<Vec<Item>, CatalogError> {
        self.db.fetch_items(pagination).await
    }

    pub async fn item(&self, id: i64) -> Result<Option<Item>, CatalogError> {
        self.db.fetch_item(id).await
    }

    pub async fn add_item(&self, item: NewItem) -> Result<Item, CatalogError> {
        self.db.insert_item(item).await
    }

    /// Upsert one catalog currency per listing, keyed by provider id. Individual failures are logged and skipped
    /// so that one bad listing cannot sink the sync. Returns the number of currencies upserted.
    pub async fn sync_listings(&self, listings: &[CoinListing]) -> usize {
        let mut synced = 0;
        for listing in listings {
            let currency = NewCurrency {
                name: listing.name.clone(),
                symbol: listing.symbol.clone(),
                provider_id: listing.provider_id.clone(),
            };
            match self.db.upsert_currency(currency).await {
                Ok(c) => {
                    trace!("🗃️ Synced currency {} ({})", c.name, c.provider_id);
                    synced += 1;
                },
                Err(e) => warn!("🗃️ Could not sync currency {} from listings. {e}", listing.name),
            }
        }
        debug!("🗃️ Currency sync complete. {synced}/{} listings upserted", listings.len());
        synced
    }
}
