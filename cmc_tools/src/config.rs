use cm_common::Secret;
use log::*;

const DEFAULT_BASE_URL: &str = "https://sandbox-api.coinmarketcap.com";

#[derive(Debug, Clone)]
pub struct CmcConfig {
    /// Base URL of the CoinMarketCap API, without a trailing slash.
    pub base_url: String,
    pub api_key: Secret<String>,
}

impl Default for CmcConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), api_key: Secret::default() }
    }
}

impl CmcConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("SANDBOX_COINMARKETCAP_BASE_URL").unwrap_or_else(|_| {
            warn!("SANDBOX_COINMARKETCAP_BASE_URL not set, using the sandbox API as default");
            DEFAULT_BASE_URL.to_string()
        });
        let base_url = base_url.trim_end_matches('/').to_string();
        let api_key = Secret::new(std::env::var("SANDBOX_COINMARKETCAP_API_KEY").unwrap_or_else(|_| {
            warn!("SANDBOX_COINMARKETCAP_API_KEY not set. Quote requests will be rejected upstream.");
            String::default()
        }));
        Self { base_url, api_key }
    }
}
