use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use cmc_tools::CmcConfig;
use coinmart_engine::{
    cache::RedisQuoteCache,
    cm_api::order_flow_api::PaymentProfile,
    CatalogApi,
    OrderFlowApi,
    PriceApi,
    SqliteDatabase,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::{CmcMarketData, RemoteWallet},
    refresh_worker::start_refresh_worker,
    routes,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let cache = RedisQuoteCache::connect(&config.redis_url)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let market = CmcMarketData::new(CmcConfig::new_from_env_or_default())
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let wallet = RemoteWallet::new(&config.wallet).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    start_refresh_worker(
        PriceApi::new(cache.clone(), market.clone()),
        market.clone(),
        CatalogApi::new(db.clone()),
    );
    let srv = create_server_instance(config, db, cache, market, wallet)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    cache: RedisQuoteCache,
    market: CmcMarketData,
    wallet: RemoteWallet,
) -> Result<Server, ServerError> {
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let catalog_api = CatalogApi::new(db.clone());
        let price_api = PriceApi::new(cache.clone(), market.clone());
        let profile = PaymentProfile {
            receiver_address: config.wallet.receiver_address.clone(),
            signature: config.wallet.signature.clone(),
        };
        let orders_api = OrderFlowApi::new(db.clone(), wallet.clone(), profile);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("coinmart::access_log"))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(price_api))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(config.auth.clone()))
            .service(routes::health)
            .route("/currencies", web::get().to(routes::currencies::<SqliteDatabase>))
            .route("/items", web::get().to(routes::items::<SqliteDatabase, RedisQuoteCache, CmcMarketData>))
            .route("/orders", web::post().to(routes::orders::<SqliteDatabase, RemoteWallet>))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
