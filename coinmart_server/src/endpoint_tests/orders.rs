use actix_web::{http::StatusCode, web, web::ServiceConfig};
use cm_common::{Amount, Secret};
use coinmart_engine::{cm_api::order_flow_api::PaymentProfile, traits::PaymentConfirmation, OrderFlowApi};
use serde_json::json;

use super::{
    helpers::{expired_token, post_request, valid_token},
    mocks::{currency, item, order_row, MockCatalog, MockWallet},
};
use crate::routes;

fn profile() -> PaymentProfile {
    PaymentProfile { receiver_address: "bc1qmerchant".to_string(), signature: Secret::new("deadbeef".to_string()) }
}

fn register<B, W>(cfg: &mut ServiceConfig, api: OrderFlowApi<B, W>)
where
    B: coinmart_engine::traits::CatalogManagement + 'static,
    W: coinmart_engine::traits::WalletPayments + 'static,
{
    cfg.app_data(web::Data::new(api)).route("/orders", web::post().to(routes::orders::<B, W>));
}

fn configure_untouched(cfg: &mut ServiceConfig) {
    // No expectations: the request must be rejected before any collaborator is called
    register(cfg, OrderFlowApi::new(MockCatalog::new(), MockWallet::new(), profile()));
}

#[actix_web::test]
async fn settle_without_a_token() {
    let (status, body) =
        post_request("", "/orders", json!({"itemId": 1, "quantity": 1}), configure_untouched).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("No bearer token"), "unexpected body: {body}");
}

#[actix_web::test]
async fn settle_with_an_expired_token() {
    let token = expired_token("alice");
    let (status, body) =
        post_request(&token, "/orders", json!({"itemId": 1, "quantity": 1}), configure_untouched).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Access token is invalid"), "unexpected body: {body}");
}

fn configure_happy(cfg: &mut ServiceConfig) {
    let mut db = MockCatalog::new();
    db.expect_fetch_item().returning(|id| Ok(Some(item(id, "Hardware wallet", 10, 5, 1))));
    db.expect_fetch_currency().returning(|id| Ok(Some(currency(id, "Bitcoin", "BTC", "1"))));
    db.expect_create_order().returning(|order| Ok(order_row(77, &order)));
    let mut wallet = MockWallet::new();
    wallet
        .expect_pay()
        .withf(|req| req.amount == Amount::from(30) && req.receiver_address == "bc1qmerchant")
        .returning(|_| Ok(PaymentConfirmation { verified: true }));
    register(cfg, OrderFlowApi::new(db, wallet, profile()));
}

#[actix_web::test]
async fn settle_happy_path() {
    let token = valid_token("alice");
    let (status, body) = post_request(&token, "/orders", json!({"itemId": 42, "quantity": 3}), configure_happy).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""orderId":77"#), "unexpected body: {body}");
}

fn configure_out_of_stock(cfg: &mut ServiceConfig) {
    let mut db = MockCatalog::new();
    db.expect_fetch_item().returning(|id| Ok(Some(item(id, "Hardware wallet", 10, 2, 1))));
    let mut wallet = MockWallet::new();
    wallet.expect_pay().never();
    register(cfg, OrderFlowApi::new(db, wallet, profile()));
}

#[actix_web::test]
async fn settle_with_insufficient_stock() {
    let token = valid_token("alice");
    let (status, body) =
        post_request(&token, "/orders", json!({"itemId": 42, "quantity": 3}), configure_out_of_stock).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("insufficient stock"), "unexpected body: {body}");
}

fn configure_unknown_item(cfg: &mut ServiceConfig) {
    let mut db = MockCatalog::new();
    db.expect_fetch_item().returning(|_| Ok(None));
    register(cfg, OrderFlowApi::new(db, MockWallet::new(), profile()));
}

#[actix_web::test]
async fn settle_an_unknown_item() {
    let token = valid_token("alice");
    let (status, body) =
        post_request(&token, "/orders", json!({"itemId": 999, "quantity": 1}), configure_unknown_item).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("does not exist"), "unexpected body: {body}");
}

fn configure_unverified(cfg: &mut ServiceConfig) {
    let mut db = MockCatalog::new();
    db.expect_fetch_item().returning(|id| Ok(Some(item(id, "Hardware wallet", 10, 5, 1))));
    db.expect_fetch_currency().returning(|id| Ok(Some(currency(id, "Bitcoin", "BTC", "1"))));
    db.expect_create_order().never();
    let mut wallet = MockWallet::new();
    wallet.expect_pay().returning(|_| Ok(PaymentConfirmation { verified: false }));
    register(cfg, OrderFlowApi::new(db, wallet, profile()));
}

#[actix_web::test]
async fn settle_with_an_unverified_payment() {
    let token = valid_token("alice");
    let (status, body) =
        post_request(&token, "/orders", json!({"itemId": 42, "quantity": 1}), configure_unverified).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("did not verify"), "unexpected body: {body}");
}
