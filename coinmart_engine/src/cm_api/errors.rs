use thiserror::Error;

use crate::traits::CatalogError;

#[derive(Debug, Clone, Error)]
pub enum PricingError {
    #[error("No USD price could be resolved for currency {0}")]
    CurrencyNotResolvable(i64),
}

/// Terminal rejection reasons of the settlement state machine.
///
/// Every business-rule rejection is a variant here, matched by the caller, rather than a thrown reason string.
#[derive(Debug, Clone, Error)]
pub enum SettlementError {
    #[error("Missing or malformed order fields: {0}")]
    MissingFields(String),
    #[error("No valid caller identity was supplied")]
    Unauthenticated,
    #[error("Item {0} does not exist")]
    ItemNotFound(i64),
    #[error("Item {0} has insufficient stock for the requested quantity")]
    InsufficientStock(i64),
    #[error("The payment call did not complete: {0}")]
    PaymentCallFailed(String),
    #[error("The wallet did not verify the transaction")]
    InvalidWalletTransaction,
    #[error("The commit transaction conflicted with a concurrent update. Retry the order.")]
    CommitConflict,
    #[error("Internal error during settlement: {0}")]
    Internal(String),
}

impl From<CatalogError> for SettlementError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::ItemNotFound(id) => Self::ItemNotFound(id),
            CatalogError::InsufficientStock(id) => Self::InsufficientStock(id),
            CatalogError::CommitConflict => Self::CommitConflict,
            CatalogError::DatabaseError(_) | CatalogError::CurrencyNotFound(_) => Self::Internal(e.to_string()),
        }
    }
}
