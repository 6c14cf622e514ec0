use std::net::SocketAddr;
use std::str::FromStr;
use std::{env, fmt};

use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    // Where token identifiers get introspected (RFC 7662 endpoint).
    pub introspection_url: Url,
    // Client credentials for the introspection endpoint; both or neither.
    pub introspection_credentials: Option<(String, String)>,
    // Upper bound when collecting a form-encoded request body.
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let introspection_url = env::var("INTROSPECTION_URL")
            .map_err(|_| ConfigError::Missing("INTROSPECTION_URL"))?;
        let introspection_url =
            Url::parse(&introspection_url).map_err(|_| ConfigError::Invalid("INTROSPECTION_URL"))?;

        let introspection_credentials = match (
            env::var("INTROSPECTION_CLIENT_ID").ok(),
            env::var("INTROSPECTION_CLIENT_SECRET").ok(),
        ) {
            (Some(id), Some(secret)) => Some((id, secret)),
            (None, None) => None,
            _ => return Err(ConfigError::Invalid("INTROSPECTION_CLIENT_ID")),
        };

        let max_body_bytes = env::var("MAX_BODY_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(64 * 1024); // 64 KiB

        Ok(Config {
            addr,
            app_env,
            introspection_url,
            introspection_credentials,
            max_body_bytes,
        })
    }
}

impl From<ConfigError> for AppError {
    fn from(_: ConfigError) -> Self {
        AppError::Internal
    }
}
