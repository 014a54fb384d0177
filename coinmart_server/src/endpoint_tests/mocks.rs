use std::{collections::HashMap, time::Duration};

use chrono::Utc;
use cm_common::Amount;
use coinmart_engine::{
    db_types::{CoinListing, Currency, Item, NewCurrency, NewItem, NewOrder, Order, Pagination, ProviderId},
    traits::{
        CatalogError, CatalogManagement, MarketDataError, MarketDataProvider, PaymentConfirmation, PaymentRequest,
        QuoteCache, QuoteCacheError, QuoteKey, WalletPaymentError, WalletPayments,
    },
};
use mockall::mock;

mock! {
    pub Catalog {}
    impl CatalogManagement for Catalog {
        async fn fetch_currencies(&self, pagination: Pagination) -> Result<Vec<Currency>, CatalogError>;
        async fn fetch_currency(&self, id: i64) -> Result<Option<Currency>, CatalogError>;
        async fn fetch_currencies_by_ids(&self, ids: &[i64]) -> Result<Vec<Currency>, CatalogError>;
        async fn upsert_currency(&self, currency: NewCurrency) -> Result<Currency, CatalogError>;
        async fn fetch_items(&self, pagination: Pagination) -> Result<Vec<Item>, CatalogError>;
        async fn fetch_item(&self, id: i64) -> Result<Option<Item>, CatalogError>;
        async fn insert_item(&self, item: NewItem) -> Result<Item, CatalogError>;
        async fn create_order(&self, order: NewOrder) -> Result<Order, CatalogError>;
    }
}

mock! {
    pub Wallet {}
    impl WalletPayments for Wallet {
        async fn pay(&self, request: &PaymentRequest) -> Result<PaymentConfirmation, WalletPaymentError>;
    }
}

mock! {
    pub Cache {}
    impl QuoteCache for Cache {
        async fn quote(&self, key: &QuoteKey) -> Result<Option<Amount>, QuoteCacheError>;
        async fn store_quote(&self, key: &QuoteKey, price: Amount, ttl: Duration) -> Result<(), QuoteCacheError>;
    }
}

mock! {
    pub Market {}
    impl MarketDataProvider for Market {
        async fn latest_listings(&self) -> Result<Vec<CoinListing>, MarketDataError>;
        async fn latest_quotes(&self, provider_ids: &[ProviderId]) -> Result<HashMap<ProviderId, Amount>, MarketDataError>;
    }
}

pub fn currency(id: i64, name: &str, symbol: &str, provider_id: &str) -> Currency {
    let now = Utc::now();
    Currency {
        id,
        name: name.to_string(),
        symbol: symbol.to_string(),
        provider_id: ProviderId::from(provider_id),
        created_at: now,
        updated_at: now,
    }
}

pub fn item(id: i64, name: &str, price: i64, quantity: i64, currency_id: i64) -> Item {
    let now = Utc::now();
    Item {
        id,
        name: name.to_string(),
        description: format!("{name} (test listing)"),
        price: Amount::from(price),
        quantity,
        currency_id,
        created_at: now,
        updated_at: now,
    }
}

pub fn order_row(id: i64, order: &NewOrder) -> Order {
    Order {
        id,
        user_id: order.user_id.clone(),
        item_id: order.item_id,
        currency_id: order.currency_id,
        quantity: order.quantity,
        total_price: order.total_price,
        created_at: Utc::now(),
    }
}
