use std::fmt::Display;

use chrono::{DateTime, Utc};
use cm_common::Amount;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

//--------------------------------------     ProviderId       --------------------------------------------------------
/// The identifier the upstream quote provider uses for a currency. A lightweight wrapper around a string so that
/// provider ids and internal row ids can never be confused with each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct ProviderId(pub String);

impl Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for ProviderId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

impl ProviderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------      Currency        --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Currency {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub provider_id: ProviderId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCurrency {
    pub name: String,
    pub symbol: String,
    pub provider_id: ProviderId,
}

//--------------------------------------        Item          --------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Unit price, denominated in the item's anchor currency.
    pub price: Amount,
    pub quantity: i64,
    /// The anchor currency of this item.
    pub currency_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub price: Amount,
    pub quantity: i64,
    pub currency_id: i64,
}

//--------------------------------------        Order         --------------------------------------------------------
/// A settled purchase order. Orders are append-only: once the commit transaction has run, nothing mutates them.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: String,
    pub item_id: i64,
    /// The item's anchor currency, copied at order time.
    pub currency_id: i64,
    pub quantity: i64,
    /// `item.price * quantity`, in anchor currency units.
    pub total_price: Amount,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: String,
    pub item_id: i64,
    pub currency_id: i64,
    pub quantity: i64,
    pub total_price: Amount,
}

//--------------------------------------     CoinListing      --------------------------------------------------------
/// One entry of the provider's latest-listings feed, already translated into engine terms.
#[derive(Debug, Clone)]
pub struct CoinListing {
    pub provider_id: ProviderId,
    pub name: String,
    pub symbol: String,
    pub price_usd: Amount,
}

//--------------------------------------     Pagination       --------------------------------------------------------
/// Cursor pagination as the catalog store exposes it: `cursor` is the id of the last row the caller has seen, and
/// the page starts strictly after it (skip-one semantics).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub cursor: Option<i64>,
}

pub const DEFAULT_PAGE_SIZE: i64 = 100;

impl Pagination {
    pub fn first_page(limit: i64) -> Self {
        Self { limit: Some(limit), cursor: None }
    }

    pub fn limit(&self) -> i64 {
        self.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_PAGE_SIZE)
    }
}
