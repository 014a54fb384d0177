use std::fmt::Debug;

use cm_common::Secret;
use log::*;

use crate::{
    cm_api::errors::SettlementError,
    db_types::{NewOrder, Order},
    traits::{CatalogManagement, PaymentRequest, WalletPayments},
};

/// One purchase request, already stripped of transport concerns. `user_id` is the caller identity the
/// authentication collaborator vouched for.
#[derive(Debug, Clone)]
pub struct SettlementRequest {
    pub user_id: String,
    pub item_id: i64,
    pub quantity: i64,
}

/// The receiving side of every wallet payment: where the money goes, and the signature the wallet endpoint
/// expects alongside it.
#[derive(Debug, Clone)]
pub struct PaymentProfile {
    pub receiver_address: String,
    pub signature: Secret<String>,
}

/// The order settlement engine: validate → lookup → price → pay → commit.
///
/// Each step either advances or terminates with a typed [`SettlementError`]; there is no partial success. The
/// commit is a single store transaction, so at-most-one successful settlement per unit of stock is guaranteed by
/// the store's atomicity, not by any lock in here.
pub struct OrderFlowApi<B, W> {
    db: B,
    wallet: W,
    profile: PaymentProfile,
}

impl<B, W> Debug for OrderFlowApi<B, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B, W> OrderFlowApi<B, W>
where
    B: CatalogManagement,
    W: WalletPayments,
{
    pub fn new(db: B, wallet: W, profile: PaymentProfile) -> Self {
        Self { db, wallet, profile }
    }

    /// Run one purchase request through the settlement state machine. On success the created order is returned;
    /// its id is the caller's receipt.
    pub async fn settle(&self, request: SettlementRequest) -> Result<Order, SettlementError> {
        // validate
        if request.user_id.is_empty() {
            return Err(SettlementError::Unauthenticated);
        }
        if request.quantity <= 0 {
            return Err(SettlementError::MissingFields("quantity must be a positive integer".to_string()));
        }
        // lookup
        let item = self
            .db
            .fetch_item(request.item_id)
            .await?
            .ok_or(SettlementError::ItemNotFound(request.item_id))?;
        if item.quantity < request.quantity {
            debug!("🛒️ Item {} has {} in stock, {} requested", item.id, item.quantity, request.quantity);
            return Err(SettlementError::InsufficientStock(item.id));
        }
        let currency = self
            .db
            .fetch_currency(item.currency_id)
            .await?
            .ok_or_else(|| SettlementError::Internal(format!("item {} references unknown currency {}", item.id, item.currency_id)))?;
        // price: the settlement amount is denominated in the item's anchor currency, no live quote involved
        let total_price = item.price * request.quantity;
        trace!("🛒️ Order of {}x item {} priced at {total_price} {}", request.quantity, item.id, currency.symbol);
        // pay
        let payment = PaymentRequest {
            receiver_address: self.profile.receiver_address.clone(),
            currency_provider_id: currency.provider_id.clone(),
            amount: total_price,
            signature: self.profile.signature.reveal().clone(),
        };
        let confirmation = self.wallet.pay(&payment).await.map_err(|e| {
            // No idempotency token upstream, so this is not retried: the caller must re-submit explicitly
            warn!("🛒️ Payment call for item {} did not complete. {e}", item.id);
            SettlementError::PaymentCallFailed(e.to_string())
        })?;
        if !confirmation.verified {
            debug!("🛒️ Wallet rejected the transaction for item {}", item.id);
            return Err(SettlementError::InvalidWalletTransaction);
        }
        // commit: order insert and stock decrement in one transaction
        let order = self
            .db
            .create_order(NewOrder {
                user_id: request.user_id,
                item_id: item.id,
                currency_id: currency.id,
                quantity: request.quantity,
                total_price,
            })
            .await?;
        info!("🛒️ Order #{} settled: {}x item {} for {total_price} {}", order.id, order.quantity, item.id, currency.symbol);
        Ok(order)
    }
}
