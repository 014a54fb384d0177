//! Read-path price conversion.
//!
//! A catalog listing is displayed in whatever currency the caller asks for. The conversion runs off one resolved
//! [`PriceMap`] covering the display currency and every anchor currency on the page:
//! `displayed = item.price * (usd[item.currency] / usd[display])`.
use log::*;

use crate::{
    cm_api::{errors::PricingError, price_objects::PriceMap},
    db_types::{Currency, Item},
};

use cm_common::Amount;
use serde::Serialize;

/// An item with its price converted into the requested display currency.
#[derive(Debug, Clone, Serialize)]
pub struct PricedItem {
    #[serde(flatten)]
    pub item: Item,
    /// The item's unit price in the display currency.
    pub display_price: Amount,
    pub display_currency_id: i64,
}

/// Convert a page of items into the display currency.
///
/// Fails with [`PricingError::CurrencyNotResolvable`] when the display currency has no USD price — that division
/// must never be attempted. Items whose own anchor currency could not be resolved are omitted from the result
/// (their price cannot be computed; inventing a zero would be worse), with a warning per currency.
pub fn priced_items(
    items: Vec<Item>,
    display: &Currency,
    prices: &PriceMap,
) -> Result<Vec<PricedItem>, PricingError> {
    let display_usd = prices.usd_price(display.id).ok_or(PricingError::CurrencyNotResolvable(display.id))?;
    let priced = items
        .into_iter()
        .filter_map(|item| {
            let own_usd = prices.usd_price(item.currency_id)?;
            match item.price.in_display_currency(own_usd, display_usd) {
                Some(display_price) => {
                    Some(PricedItem { display_price, display_currency_id: display.id, item })
                },
                None => {
                    warn!(
                        "💱️ Conversion of item {} from currency {} to {} is undefined, omitting it from the listing",
                        item.id, item.currency_id, display.id
                    );
                    None
                },
            }
        })
        .collect();
    Ok(priced)
}
