//! `SqliteDatabase` is the concrete catalog/order store backend.
//!
//! It implements [`CatalogManagement`] on top of a SQLite pool. The store's transactions are the only
//! mutual-exclusion mechanism protecting stock levels; see [`CatalogManagement::create_order`].
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{currencies, items, new_pool, orders};
use crate::{
    db_types::{Currency, Item, NewCurrency, NewItem, NewOrder, Order, Pagination},
    traits::{CatalogError, CatalogManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, CatalogError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn fetch_order(&self, id: i64) -> Result<Option<Order>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_by_id(id, &mut conn).await
    }

    pub async fn order_count_for_item(&self, item_id: i64) -> Result<i64, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        orders::count_orders_for_item(item_id, &mut conn).await
    }
}

/// SQLite reports a lost race for the write lock as a "database is locked" / busy error. That is the signal for
/// the caller to retry from lookup, so it gets its own variant rather than a generic database error.
fn map_commit_error(e: sqlx::Error) -> CatalogError {
    let msg = e.to_string();
    if msg.contains("database is locked") || msg.contains("busy") {
        CatalogError::CommitConflict
    } else {
        CatalogError::DatabaseError(msg)
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_currencies(&self, pagination: Pagination) -> Result<Vec<Currency>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        currencies::fetch_currencies(pagination, &mut conn).await
    }

    async fn fetch_currency(&self, id: i64) -> Result<Option<Currency>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        currencies::fetch_currency_by_id(id, &mut conn).await
    }

    async fn fetch_currencies_by_ids(&self, ids: &[i64]) -> Result<Vec<Currency>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        currencies::fetch_currencies_by_ids(ids, &mut conn).await
    }

    async fn upsert_currency(&self, currency: NewCurrency) -> Result<Currency, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        currencies::upsert_currency(currency, &mut conn).await
    }

    async fn fetch_items(&self, pagination: Pagination) -> Result<Vec<Item>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        items::fetch_items(pagination, &mut conn).await
    }

    async fn fetch_item(&self, id: i64) -> Result<Option<Item>, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        items::fetch_item_by_id(id, &mut conn).await
    }

    async fn insert_item(&self, item: NewItem) -> Result<Item, CatalogError> {
        let mut conn = self.pool.acquire().await?;
        items::insert_item(item, &mut conn).await
    }

    /// Takes a validated order and, in a single atomic transaction,
    /// * conditionally decrements the item's stock by the ordered quantity,
    /// * inserts the order row.
    ///
    /// The `quantity >= n` guard on the decrement closes the check-then-act race: when two orders chase the last
    /// unit of stock, exactly one transaction decrements and commits, the other sees zero rows affected.
    async fn create_order(&self, order: NewOrder) -> Result<Order, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let decremented = items::decrement_stock(order.item_id, order.quantity, &mut tx).await?;
        if !decremented {
            // Distinguish a missing item from an oversell. The transaction is dropped without committing.
            return match items::fetch_item_by_id(order.item_id, &mut tx).await? {
                Some(item) => {
                    debug!("🗃️ Order for item {} rejected, insufficient stock ({})", item.id, item.quantity);
                    Err(CatalogError::InsufficientStock(order.item_id))
                },
                None => Err(CatalogError::ItemNotFound(order.item_id)),
            };
        }
        let order = orders::insert_order(order, &mut tx).await?;
        tx.commit().await.map_err(map_commit_error)?;
        debug!("🗃️ Order #{} committed, item {} stock reduced by {}", order.id, order.item_id, order.quantity);
        Ok(order)
    }
}
