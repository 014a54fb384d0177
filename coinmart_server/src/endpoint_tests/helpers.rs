use std::time::{SystemTime, UNIX_EPOCH};

use actix_web::{
    http::{header, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use cm_common::Secret;
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::{
    auth::{JwtClaims, TokenIssuer},
    config::AuthConfig,
};

// Creates a test `AuthConfig` for issuing tokens. DO NOT re-use this secret anywhere.
pub fn get_auth_config() -> AuthConfig {
    AuthConfig { jwt_secret: Secret::new("endpoint-test-secret".to_string()) }
}

pub fn valid_token(sub: &str) -> String {
    TokenIssuer::new(&get_auth_config()).issue_token(sub, None).expect("Failed to sign token")
}

pub fn expired_token(sub: &str) -> String {
    let config = get_auth_config();
    let key = EncodingKey::from_secret(config.jwt_secret.reveal().as_bytes());
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    let claims = JwtClaims { sub: sub.to_string(), exp: now - 300 };
    encode(&Header::default(), &claims, &key).expect("Failed to sign token")
}

pub async fn get_request(auth_header: &str, path: &str, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let mut req = TestRequest::get().uri(path);
    if !auth_header.is_empty() {
        req = req.insert_header((header::AUTHORIZATION, format!("Bearer {auth_header}")));
    }
    send(req, configure).await
}

pub async fn post_request(
    auth_header: &str,
    path: &str,
    body: serde_json::Value,
    configure: fn(&mut ServiceConfig),
) -> (StatusCode, String) {
    let mut req = TestRequest::post().uri(path).set_json(body);
    if !auth_header.is_empty() {
        req = req.insert_header((header::AUTHORIZATION, format!("Bearer {auth_header}")));
    }
    send(req, configure).await
}

async fn send(req: TestRequest, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let _ = env_logger::try_init();
    let app = App::new().app_data(web::Data::new(get_auth_config())).configure(configure);
    let service = test::init_service(app).await;
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    (status, body)
}
