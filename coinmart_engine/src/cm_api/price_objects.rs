use std::collections::{hash_map, HashMap};

use cm_common::Amount;

use crate::db_types::{Currency, ProviderId};

//--------------------------------------      PriceMap        --------------------------------------------------------
/// The result of one price resolution round: currency id → USD price.
///
/// Built per request and never persisted. Currencies that could not be resolved are simply absent; callers must
/// check [`usd_price`](PriceMap::usd_price) for `None` before multiplying or dividing with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceMap(HashMap<i64, Amount>);

impl PriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn usd_price(&self, currency_id: i64) -> Option<Amount> {
        self.0.get(&currency_id).copied()
    }

    pub fn insert(&mut self, currency_id: i64, price: Amount) {
        self.0.insert(currency_id, price);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, i64, Amount> {
        self.0.iter()
    }
}

impl FromIterator<(i64, Amount)> for PriceMap {
    fn from_iter<T: IntoIterator<Item = (i64, Amount)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

//--------------------------------------     CurrencySet      --------------------------------------------------------
/// A set of currencies, deduplicated by currency id.
///
/// This is the "outdated currencies" collection of the resolver: a currency requested twice in one call must be
/// probed and fetched exactly once. Insertion keeps the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct CurrencySet(HashMap<i64, Currency>);

impl CurrencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a currency. Returns `false` when a currency with the same id was already present.
    pub fn insert(&mut self, currency: Currency) -> bool {
        match self.0.entry(currency.id) {
            hash_map::Entry::Occupied(_) => false,
            hash_map::Entry::Vacant(v) => {
                v.insert(currency);
                true
            },
        }
    }

    pub fn contains(&self, currency_id: i64) -> bool {
        self.0.contains_key(&currency_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.0.values()
    }

    /// The provider ids of every currency in the set, for the batched upstream call.
    pub fn provider_ids(&self) -> Vec<ProviderId> {
        self.0.values().map(|c| c.provider_id.clone()).collect()
    }
}

impl FromIterator<Currency> for CurrencySet {
    fn from_iter<T: IntoIterator<Item = Currency>>(iter: T) -> Self {
        let mut set = Self::new();
        for currency in iter {
            set.insert(currency);
        }
        set
    }
}
