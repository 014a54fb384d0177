use std::{env, io::Write};

use cm_common::Secret;
use coinmart_engine::{cache::redis_url, db_url};
use log::*;
use rand::{thread_rng, Rng};
use serde_json::json;
use tempfile::NamedTempFile;

const DEFAULT_CM_HOST: &str = "127.0.0.1";
const DEFAULT_CM_PORT: u16 = 3000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub redis_url: String,
    pub auth: AuthConfig,
    /// The wallet collaborator that confirms every settlement payment.
    pub wallet: WalletConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CM_HOST.to_string(),
            port: DEFAULT_CM_PORT,
            database_url: String::default(),
            redis_url: String::default(),
            auth: AuthConfig::default(),
            wallet: WalletConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("CM_HOST").ok().unwrap_or_else(|| DEFAULT_CM_HOST.into());
        let port = env::var("SERVER_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for SERVER_PORT. {e} Using the default, {DEFAULT_CM_PORT}, \
                         instead."
                    );
                    DEFAULT_CM_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_CM_PORT);
        let database_url = db_url();
        let redis_url = redis_url();
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to \
                 the default configuration."
            );
            AuthConfig::default()
        });
        let wallet = WalletConfig::from_env_or_default();
        Self { host, port, database_url, redis_url, auth, wallet }
    }
}

//-------------------------------------------------  AuthConfig  ------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The shared secret used to sign and verify access tokens (HS256).
    pub jwt_secret: Secret<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        let mut tmpfile = NamedTempFile::new().ok().and_then(|f| f.keep().ok());
        warn!(
            "🚨️🚨️🚨️ The JWT signing secret has not been set. I'm using a random value for this session. DO NOT \
             operate on production like this since every issued token dies with the process. 🚨️🚨️🚨️"
        );
        let mut rng = thread_rng();
        let secret = (0..32).map(|_| format!("{:02x}", rng.gen::<u8>())).collect::<String>();
        match &mut tmpfile {
            Some((f, p)) => {
                let key_data = json!({ "jwt_secret": secret }).to_string();
                match writeln!(f, "{key_data}") {
                    Ok(()) => warn!(
                        "🚨️🚨️🚨️ The JWT secret for this session was written to {}. If this is a production \
                         instance, you are doing it wrong! Set the JWT_SECRET_KEY environment variable instead. \
                         🚨️🚨️🚨️",
                        p.to_str().unwrap_or("???")
                    ),
                    Err(e) => warn!("🪛️ Could not write the JWT secret to the temporary file. {e}"),
                }
            },
            None => {
                warn!("🪛️ Could not create a temporary file to store the JWT secret.");
            },
        }
        Self { jwt_secret: Secret::new(secret) }
    }
}

impl AuthConfig {
    pub fn try_from_env() -> Result<Self, crate::errors::ServerError> {
        let secret = env::var("JWT_SECRET_KEY")
            .map_err(|e| crate::errors::ServerError::ConfigurationError(format!("{e} [JWT_SECRET_KEY]")))?;
        if secret.is_empty() {
            return Err(crate::errors::ServerError::ConfigurationError(
                "JWT_SECRET_KEY is set but empty.".to_string(),
            ));
        }
        Ok(Self { jwt_secret: secret.into() })
    }
}

//-------------------------------------------------  WalletConfig  ----------------------------------------------------
#[derive(Clone, Debug, Default)]
pub struct WalletConfig {
    /// Base URL of the wallet transaction endpoint, without a trailing slash.
    pub base_url: String,
    /// Where settlement payments are sent.
    pub receiver_address: String,
    /// The signature the wallet endpoint expects alongside each transaction.
    pub signature: Secret<String>,
}

impl WalletConfig {
    pub fn from_env_or_default() -> Self {
        let base_url = env::var("CM_WALLET_URL").ok().unwrap_or_else(|| {
            error!("🪛️ CM_WALLET_URL is not set. Order settlement will fail until it is configured.");
            String::default()
        });
        let base_url = base_url.trim_end_matches('/').to_string();
        let receiver_address = env::var("CM_WALLET_RECEIVER_ADDRESS").ok().unwrap_or_else(|| {
            error!("🪛️ CM_WALLET_RECEIVER_ADDRESS is not set. Please set it to the merchant receiving address.");
            String::default()
        });
        let signature = env::var("CM_WALLET_SIGNATURE")
            .ok()
            .unwrap_or_else(|| {
                error!("🪛️ CM_WALLET_SIGNATURE is not set. The wallet endpoint will reject unsigned transactions.");
                String::default()
            })
            .into();
        Self { base_url, receiver_address, signature }
    }
}
