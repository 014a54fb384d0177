use thiserror::Error;

use crate::db_types::{Currency, Item, NewCurrency, NewItem, NewOrder, Order, Pagination};

#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Item {0} does not exist")]
    ItemNotFound(i64),
    #[error("Currency {0} does not exist")]
    CurrencyNotFound(i64),
    #[error("Item {0} has insufficient stock for the requested quantity")]
    InsufficientStock(i64),
    #[error("The commit transaction conflicted with a concurrent update. Retry from lookup.")]
    CommitConflict,
}

impl From<sqlx::Error> for CatalogError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

/// The catalog/order store contract.
///
/// The store is the single source of truth for currencies, items and orders, and its transaction primitive is the
/// only mutual-exclusion mechanism protecting `Item::quantity`. Backends must make
/// [`create_order`](CatalogManagement::create_order) atomic: the stock check, the decrement and the order insert
/// either all happen or none do.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    /// Fetch a page of currencies, ordered by id.
    async fn fetch_currencies(&self, pagination: Pagination) -> Result<Vec<Currency>, CatalogError>;
    async fn fetch_currency(&self, id: i64) -> Result<Option<Currency>, CatalogError>;
    /// Fetch the currencies with the given ids. Unknown ids are silently absent from the result.
    async fn fetch_currencies_by_ids(&self, ids: &[i64]) -> Result<Vec<Currency>, CatalogError>;
    /// Insert the currency, or update name and symbol if a currency with the same provider id already exists.
    async fn upsert_currency(&self, currency: NewCurrency) -> Result<Currency, CatalogError>;
    /// Fetch a page of items, ordered by id.
    async fn fetch_items(&self, pagination: Pagination) -> Result<Vec<Item>, CatalogError>;
    async fn fetch_item(&self, id: i64) -> Result<Option<Item>, CatalogError>;
    async fn insert_item(&self, item: NewItem) -> Result<Item, CatalogError>;
    /// Atomically decrement the item's stock by `order.quantity` and insert the order row.
    ///
    /// Fails with [`CatalogError::InsufficientStock`] when the item holds less stock than requested at the instant
    /// the transaction executes, and with [`CatalogError::CommitConflict`] when the transaction loses a race with
    /// a concurrent writer. In both cases no row is written and stock is unchanged.
    async fn create_order(&self, order: NewOrder) -> Result<Order, CatalogError>;
}
