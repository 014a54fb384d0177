use std::{collections::HashMap, sync::Arc};

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    StatusCode,
};
use serde::de::DeserializeOwned;

use crate::{
    config::CmcConfig,
    data_objects::{CmcListing, Envelope},
    error::CmcApiError,
};

#[derive(Clone)]
pub struct CoinMarketCapApi {
    config: CmcConfig,
    client: Arc<Client>,
}

impl CoinMarketCapApi {
    pub fn new(config: CmcConfig) -> Result<Self, CmcApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(config.api_key.reveal().as_str())
            .map_err(|e| CmcApiError::Initialization(e.to_string()))?;
        headers.insert("X-CMC_PRO_API_KEY", val);
        headers.insert("Accept", HeaderValue::from_static("*/*"));
        let client =
            Client::builder().default_headers(headers).build().map_err(|e| CmcApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, CmcApiError> {
        let url = format!("{}{path}", self.config.base_url);
        trace!("Sending quote provider query: {url}");
        let mut req = self.client.get(url);
        if !params.is_empty() {
            req = req.query(params);
        }
        let response = req.send().await.map_err(|e| CmcApiError::ResponseError(e.to_string()))?;
        match response.status() {
            s if s.is_success() => {
                trace!("Quote provider query successful. {s}");
                response.json::<T>().await.map_err(|e| CmcApiError::JsonError(e.to_string()))
            },
            StatusCode::TOO_MANY_REQUESTS => Err(CmcApiError::RateLimited),
            s => {
                let status = s.as_u16();
                let message = response.text().await.map_err(|e| CmcApiError::ResponseError(e.to_string()))?;
                Err(CmcApiError::QueryError { status, message })
            },
        }
    }

    /// Fetch the latest USD values of every listed cryptocurrency. The feed is refreshed upstream roughly once a
    /// minute, which is why the cache refresh job runs on the same cadence.
    pub async fn latest_listings(&self) -> Result<Vec<CmcListing>, CmcApiError> {
        debug!("Fetching latest listings from the quote provider");
        let env: Envelope<Vec<CmcListing>> =
            self.get_query("/v1/cryptocurrency/listings/latest", &[]).await?;
        info!("Fetched {} listings from the quote provider", env.data.len());
        Ok(env.data)
    }

    /// Fetch the latest USD quotes for the given provider ids in a single call. The response is keyed by the
    /// stringified provider id; ids the provider does not recognise are simply absent.
    pub async fn quotes_latest(&self, provider_ids: &[String]) -> Result<Vec<CmcListing>, CmcApiError> {
        let id_param = provider_ids.join(",");
        debug!("Fetching quotes for provider ids [{id_param}]");
        let env: Envelope<HashMap<String, CmcListing>> =
            self.get_query("/v2/cryptocurrency/quotes/latest", &[("id", id_param.as_str())]).await?;
        Ok(env.data.into_values().collect())
    }
}
