//! Bearer-token authentication for the protected routes.
//!
//! Access tokens are HS256 JWTs signed with the shared secret from the configuration. The claims carry the caller
//! identity in `sub`; an expired, malformed or missing token never reaches a handler, the [`JwtClaims`] extractor
//! rejects the request first.
use std::{
    future::{ready, Ready},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// The caller identity this token vouches for.
    pub sub: String,
    /// Expiry, as seconds since the Unix epoch.
    pub exp: u64,
}

impl FromRequest for JwtClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_claims(req))
    }
}

fn extract_claims(req: &HttpRequest) -> Result<JwtClaims, ServerError> {
    let config = req
        .app_data::<web::Data<AuthConfig>>()
        .ok_or_else(|| ServerError::InitializeError("The authentication configuration is not registered".into()))?;
    let header = req.headers().get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let value = header.to_str().map_err(|e| AuthError::PoorlyFormattedToken(e.to_string()))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::PoorlyFormattedToken("Expected a bearer token".to_string()))?;
    let claims = validate_token(token, config)?;
    debug!("💻️ Request authenticated for {}", claims.sub);
    Ok(claims)
}

pub fn validate_token(token: &str, config: &AuthConfig) -> Result<JwtClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.reveal().as_bytes());
    let validation = Validation::new(Algorithm::HS256);
    let data =
        decode::<JwtClaims>(token, &key, &validation).map_err(|e| AuthError::ValidationError(e.to_string()))?;
    Ok(data.claims)
}

pub struct TokenIssuer {
    key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let key = EncodingKey::from_secret(config.jwt_secret.reveal().as_bytes());
        Self { key }
    }

    /// Issue a new access token for the given caller identity. The caller must already have been authenticated
    /// through whatever identity provider fronts this server.
    pub fn issue_token(&self, sub: &str, ttl: Option<Duration>) -> Result<String, AuthError> {
        let ttl = ttl.unwrap_or_else(|| Duration::from_secs(60 * 60 * 24));
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        let claims = JwtClaims { sub: sub.to_string(), exp: (now + ttl).as_secs() };
        encode(&Header::default(), &claims, &self.key).map_err(|e| AuthError::ValidationError(e.to_string()))
    }
}
