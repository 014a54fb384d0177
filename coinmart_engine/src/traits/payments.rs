use cm_common::Amount;
use thiserror::Error;

use crate::db_types::ProviderId;

#[derive(Debug, Clone, Error)]
pub enum WalletPaymentError {
    #[error("Could not reach the wallet service: {0}")]
    Network(String),
    #[error("The wallet service returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// One settlement request against the wallet transaction endpoint.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub receiver_address: String,
    pub currency_provider_id: ProviderId,
    pub amount: Amount,
    pub signature: String,
}

#[derive(Debug, Clone, Copy)]
pub struct PaymentConfirmation {
    pub verified: bool,
}

/// The remote payment collaborator.
///
/// The upstream contract carries no idempotency token, so a call that fails at the network layer must NOT be
/// retried blindly — the money may or may not have moved. The settlement engine surfaces the failure instead.
#[allow(async_fn_in_trait)]
pub trait WalletPayments {
    async fn pay(&self, request: &PaymentRequest) -> Result<PaymentConfirmation, WalletPaymentError>;
}
