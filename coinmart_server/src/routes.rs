//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Handlers are generic over the engine traits so that the endpoint tests can run them against mocks; the server
//! factory registers them with the concrete backends.
use actix_web::{get, web, HttpResponse, Responder};
use coinmart_engine::{
    cm_api::{order_flow_api::SettlementRequest, pricing::priced_items},
    db_types::Pagination,
    traits::{CatalogManagement, MarketDataProvider, QuoteCache, WalletPayments},
    CatalogApi,
    OrderFlowApi,
    PriceApi,
};
use log::*;

use crate::{
    auth::JwtClaims,
    data_objects::{ApiResponse, ItemsQuery, OrderParams, OrderResult},
    errors::ServerError,
};

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// --------------------------------------------   Currencies  --------------------------------------------------
/// Route handler for the currencies endpoint
///
/// Returns a page of catalog currencies, ordered by id. `cursor` is the id of the last currency the caller has
/// seen; the page starts strictly after it.
pub async fn currencies<B: CatalogManagement>(
    query: web::Query<Pagination>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let pagination = query.into_inner();
    debug!("💻️ GET currencies, limit {}", pagination.limit());
    let currencies = api.currencies(pagination).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(currencies)))
}

// ----------------------------------------------   Items  -----------------------------------------------------
/// Route handler for the items endpoint
///
/// Returns a page of items with every price converted into the requested display currency. The conversion runs
/// off a single price resolution round covering the display currency and every anchor currency on the page.
pub async fn items<B, C, M>(
    query: web::Query<ItemsQuery>,
    catalog: web::Data<CatalogApi<B>>,
    prices: web::Data<PriceApi<C, M>>,
) -> Result<HttpResponse, ServerError>
where
    B: CatalogManagement,
    C: QuoteCache,
    M: MarketDataProvider,
{
    let query = query.into_inner();
    let currency_id = query
        .currency_id
        .ok_or_else(|| ServerError::InvalidRequestBody("Missing / Invalid currencyId in the query params".into()))?;
    let display = catalog
        .currency(currency_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Currency {currency_id} does not exist")))?;
    debug!("💻️ GET items priced in {} ({})", display.name, display.id);
    let page = catalog.items(Pagination { limit: query.limit, cursor: query.cursor }).await?;
    let anchor_ids = page.iter().map(|item| item.currency_id).collect::<Vec<_>>();
    let mut currencies = catalog.currencies_by_ids(&anchor_ids).await?.into_values().collect::<Vec<_>>();
    currencies.push(display.clone());
    let price_map = prices.resolve(&currencies).await;
    let priced = priced_items(page, &display, &price_map)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(priced)))
}

// ----------------------------------------------   Orders  ----------------------------------------------------
/// Route handler for the orders endpoint
///
/// Settles a purchase order for the authenticated caller. The caller identity comes from the bearer token; the
/// response carries the created order id as the receipt.
pub async fn orders<B, W>(
    claims: JwtClaims,
    body: web::Json<OrderParams>,
    api: web::Data<OrderFlowApi<B, W>>,
) -> Result<HttpResponse, ServerError>
where
    B: CatalogManagement,
    W: WalletPayments,
{
    let params = body.into_inner();
    debug!("💻️ POST order of {}x item {} for {}", params.quantity, params.item_id, claims.sub);
    let request = SettlementRequest { user_id: claims.sub, item_id: params.item_id, quantity: params.quantity };
    let order = api.settle(request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(OrderResult { order_id: order.id })))
}
