//! [`WalletPayments`] backed by the remote wallet transaction endpoint.
use std::sync::Arc;

use cm_common::Amount;
use coinmart_engine::traits::{PaymentConfirmation, PaymentRequest, WalletPaymentError, WalletPayments};
use log::*;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::WalletConfig;

#[derive(Clone)]
pub struct RemoteWallet {
    base_url: String,
    client: Arc<Client>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WalletTransactionBody<'a> {
    receiver_address: &'a str,
    currency_provider_id: &'a str,
    amount: Amount,
    signature: &'a str,
}

#[derive(Debug, Deserialize)]
struct WalletTransactionResponse {
    verified: bool,
}

impl RemoteWallet {
    pub fn new(config: &WalletConfig) -> Result<Self, WalletPaymentError> {
        let client = Client::builder().build().map_err(|e| WalletPaymentError::Network(e.to_string()))?;
        Ok(Self { base_url: config.base_url.clone(), client: Arc::new(client) })
    }
}

impl WalletPayments for RemoteWallet {
    async fn pay(&self, request: &PaymentRequest) -> Result<PaymentConfirmation, WalletPaymentError> {
        let url = format!("{}/transactions", self.base_url);
        let body = WalletTransactionBody {
            receiver_address: &request.receiver_address,
            currency_provider_id: request.currency_provider_id.as_str(),
            amount: request.amount,
            signature: &request.signature,
        };
        trace!("🪙️ Sending wallet transaction of {} to {url}", request.amount);
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletPaymentError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WalletPaymentError::InvalidResponse(format!("Error {status}. {message}")));
        }
        let confirmation: WalletTransactionResponse =
            response.json().await.map_err(|e| WalletPaymentError::InvalidResponse(e.to_string()))?;
        debug!("🪙️ Wallet confirmed transaction: verified = {}", confirmation.verified);
        Ok(PaymentConfirmation { verified: confirmation.verified })
    }
}
