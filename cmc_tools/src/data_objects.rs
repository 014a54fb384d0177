use rust_decimal::Decimal;
use serde::Deserialize;

/// One coin as reported by the listings and quotes endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct CmcListing {
    /// CoinMarketCap's numeric identifier for the coin. This is what the catalog stores as the provider id.
    pub id: u64,
    pub name: String,
    pub symbol: String,
    pub quote: CmcQuote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CmcQuote {
    #[serde(rename = "USD")]
    pub usd: CmcUsdQuote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CmcUsdQuote {
    pub price: Decimal,
}

/// Every CMC response wraps its payload in a `data` field.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}
