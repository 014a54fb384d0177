//! [`MarketDataProvider`] backed by the CoinMarketCap client from `cmc_tools`.
use std::collections::HashMap;

use cm_common::Amount;
use cmc_tools::{CmcApiError, CmcConfig, CmcListing, CoinMarketCapApi};
use coinmart_engine::{
    db_types::{CoinListing, ProviderId},
    traits::{MarketDataError, MarketDataProvider},
};

#[derive(Clone)]
pub struct CmcMarketData {
    api: CoinMarketCapApi,
}

impl CmcMarketData {
    pub fn new(config: CmcConfig) -> Result<Self, CmcApiError> {
        let api = CoinMarketCapApi::new(config)?;
        Ok(Self { api })
    }
}

fn to_listing(listing: CmcListing) -> CoinListing {
    CoinListing {
        provider_id: listing.id.to_string().into(),
        name: listing.name,
        symbol: listing.symbol,
        price_usd: Amount::new(listing.quote.usd.price),
    }
}

fn map_cmc_error(e: CmcApiError) -> MarketDataError {
    match e {
        CmcApiError::RateLimited => MarketDataError::RateLimited,
        CmcApiError::ResponseError(m) | CmcApiError::Initialization(m) => MarketDataError::Network(m),
        CmcApiError::JsonError(m) => MarketDataError::InvalidResponse(m),
        CmcApiError::QueryError { status, message } => {
            MarketDataError::InvalidResponse(format!("Error {status}. {message}"))
        },
    }
}

impl MarketDataProvider for CmcMarketData {
    async fn latest_listings(&self) -> Result<Vec<CoinListing>, MarketDataError> {
        let listings = self.api.latest_listings().await.map_err(map_cmc_error)?;
        Ok(listings.into_iter().map(to_listing).collect())
    }

    async fn latest_quotes(
        &self,
        provider_ids: &[ProviderId],
    ) -> Result<HashMap<ProviderId, Amount>, MarketDataError> {
        let ids = provider_ids.iter().map(|id| id.as_str().to_string()).collect::<Vec<_>>();
        let quotes = self.api.quotes_latest(&ids).await.map_err(map_cmc_error)?;
        Ok(quotes
            .into_iter()
            .map(|listing| (ProviderId::from(listing.id.to_string()), Amount::new(listing.quote.usd.price)))
            .collect())
    }
}
