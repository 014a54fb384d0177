use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use coinmart_engine::{traits::CatalogError, PricingError, SettlementError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Could not settle the order. {0}")]
    SettlementFailed(#[from] SettlementError),
    #[error("No price is available for the requested display currency. {0}")]
    PriceUnavailable(#[from] PricingError),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(e) => match e {
                AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                AuthError::ValidationError(_) => StatusCode::UNAUTHORIZED,
                AuthError::PoorlyFormattedToken(_) => StatusCode::BAD_REQUEST,
            },
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::SettlementFailed(e) => match e {
                SettlementError::MissingFields(_) => StatusCode::BAD_REQUEST,
                SettlementError::Unauthenticated => StatusCode::UNAUTHORIZED,
                SettlementError::ItemNotFound(_) => StatusCode::NOT_FOUND,
                SettlementError::InsufficientStock(_) => StatusCode::CONFLICT,
                SettlementError::PaymentCallFailed(_) => StatusCode::BAD_GATEWAY,
                SettlementError::InvalidWalletTransaction => StatusCode::CONFLICT,
                SettlementError::CommitConflict => StatusCode::CONFLICT,
                SettlementError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::PriceUnavailable(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": true, "data": self.to_string() }).to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No bearer token was supplied for a protected endpoint.")]
    MissingToken,
    #[error("Access token is invalid. {0}")]
    ValidationError(String),
    #[error("Access token is not in the correct format. {0}")]
    PoorlyFormattedToken(String),
}

impl From<CatalogError> for ServerError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::ItemNotFound(_) | CatalogError::CurrencyNotFound(_) => Self::NoRecordFound(e.to_string()),
            CatalogError::DatabaseError(_) | CatalogError::InsufficientStock(_) | CatalogError::CommitConflict => {
                Self::BackendError(e.to_string())
            },
        }
    }
}
