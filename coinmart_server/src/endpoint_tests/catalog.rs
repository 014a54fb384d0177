use actix_web::{http::StatusCode, web, web::ServiceConfig};
use cm_common::Amount;
use coinmart_engine::{CatalogApi, PriceApi};
use log::debug;

use super::{
    helpers::get_request,
    mocks::{currency, item, MockCache, MockCatalog, MockMarket},
};
use crate::routes;

fn register(cfg: &mut ServiceConfig, db: MockCatalog, cache: MockCache, market: MockMarket) {
    let catalog_api = CatalogApi::new(db);
    let price_api = PriceApi::new(cache, market);
    cfg.app_data(web::Data::new(catalog_api))
        .app_data(web::Data::new(price_api))
        .service(routes::health)
        .route("/currencies", web::get().to(routes::currencies::<MockCatalog>))
        .route("/items", web::get().to(routes::items::<MockCatalog, MockCache, MockMarket>));
}

fn configure_bare(cfg: &mut ServiceConfig) {
    register(cfg, MockCatalog::new(), MockCache::new(), MockMarket::new());
}

#[actix_web::test]
async fn health_check() {
    let (status, body) = get_request("", "/health", configure_bare).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "👍️\n");
}

fn configure_currency_page(cfg: &mut ServiceConfig) {
    let mut db = MockCatalog::new();
    db.expect_fetch_currencies()
        .withf(|p| p.limit() == 2 && p.cursor == Some(5))
        .returning(|_| Ok(vec![currency(6, "Bitcoin", "BTC", "1"), currency(7, "Ethereum", "ETH", "1027")]));
    register(cfg, db, MockCache::new(), MockMarket::new());
}

#[actix_web::test]
async fn currencies_are_paginated() {
    let (status, body) = get_request("", "/currencies?limit=2&cursor=5", configure_currency_page).await;
    debug!("currencies response: {body}");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""error":false"#), "unexpected body: {body}");
    assert!(body.contains("Bitcoin") && body.contains("Ethereum"), "unexpected body: {body}");
}

#[actix_web::test]
async fn items_without_a_display_currency() {
    let (status, body) = get_request("", "/items", configure_bare).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("currencyId"), "unexpected body: {body}");
}

fn configure_unknown_currency(cfg: &mut ServiceConfig) {
    let mut db = MockCatalog::new();
    db.expect_fetch_currency().returning(|_| Ok(None));
    register(cfg, db, MockCache::new(), MockMarket::new());
}

#[actix_web::test]
async fn items_with_an_unknown_display_currency() {
    let (status, body) = get_request("", "/items?currencyId=99", configure_unknown_currency).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Currency 99 does not exist"), "unexpected body: {body}");
}

fn configure_priced_listing(cfg: &mut ServiceConfig) {
    let mut db = MockCatalog::new();
    db.expect_fetch_currency().returning(|id| Ok(Some(currency(id, "Ethereum", "ETH", "1027"))));
    db.expect_fetch_items().returning(|_| Ok(vec![item(7, "Table", 3, 10, 1)]));
    db.expect_fetch_currencies_by_ids()
        .withf(|ids| ids == [1])
        .returning(|_| Ok(vec![currency(1, "Bitcoin", "BTC", "1")]));
    let mut cache = MockCache::new();
    // usd[Bitcoin]=10, usd[Ethereum]=5: a price of 3 BTC displays as 6 ETH
    cache.expect_quote().returning(|key| {
        let price = if key.currency_name == "Bitcoin" { Amount::from(10) } else { Amount::from(5) };
        Ok(Some(price))
    });
    let mut market = MockMarket::new();
    market.expect_latest_quotes().never();
    register(cfg, db, cache, market);
}

#[actix_web::test]
async fn items_are_priced_in_the_display_currency() {
    let (status, body) = get_request("", "/items?currencyId=2", configure_priced_listing).await;
    debug!("items response: {body}");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""display_price":"6""#), "unexpected body: {body}");
    assert!(body.contains(r#""display_currency_id":2"#), "unexpected body: {body}");
}

fn configure_unresolvable_display(cfg: &mut ServiceConfig) {
    let mut db = MockCatalog::new();
    db.expect_fetch_currency().returning(|id| Ok(Some(currency(id, "Dogecoin", "DOGE", "74"))));
    db.expect_fetch_items().returning(|_| Ok(vec![item(7, "Table", 3, 10, 1)]));
    db.expect_fetch_currencies_by_ids().returning(|_| Ok(vec![currency(1, "Bitcoin", "BTC", "1")]));
    let mut cache = MockCache::new();
    cache.expect_quote().returning(|key| {
        if key.currency_name == "Bitcoin" {
            Ok(Some(Amount::from(10)))
        } else {
            Ok(None)
        }
    });
    cache.expect_store_quote().never();
    let mut market = MockMarket::new();
    // The display currency misses and the provider has nothing for it either
    market.expect_latest_quotes().returning(|_| Ok(Default::default()));
    register(cfg, db, cache, market);
}

#[actix_web::test]
async fn items_with_an_unresolvable_display_currency() {
    let (status, body) = get_request("", "/items?currencyId=9", configure_unresolvable_display).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("No USD price"), "unexpected body: {body}");
}
