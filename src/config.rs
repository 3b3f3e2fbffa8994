/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, SECRET_KEY, トークン設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::middleware::http::HttpSettings;
use crate::services::auth::access_jwt::expiry_for;

const DEV_SECRET_KEY: &str = "secret-dev";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub database_url: String,
    pub db_max_connections: u32,

    // Shared HS256 secret; injected into AuthService, never read globally.
    pub secret_key: String,
    pub access_token_leeway_seconds: u64,
    pub access_token_ttl_seconds: Option<u64>,

    pub request_body_limit_bytes: usize,
    pub request_timeout_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("db_max_connections", &self.db_max_connections)
            .field("secret_key", &"<redacted>")
            .field("access_token_leeway_seconds", &self.access_token_leeway_seconds)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("request_body_limit_bytes", &self.request_body_limit_bytes)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3001);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);

        let secret_key = resolve_secret(app_env, std::env::var("SECRET_KEY").ok())?;

        let access_token_leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let access_token_ttl_seconds = std::env::var("ACCESS_TOKEN_TTL_SECONDS")
            .ok()
            .map(|v| parse_ttl(&v, chrono::Utc::now().timestamp()))
            .transpose()?;

        let defaults = HttpSettings::default();

        let request_body_limit_bytes = std::env::var("REQUEST_BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.body_limit_bytes);

        let request_timeout_seconds = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.request_timeout.as_secs());

        Ok(Self {
            addr,
            app_env,
            database_url,
            db_max_connections,
            secret_key,
            access_token_leeway_seconds,
            access_token_ttl_seconds,
            request_body_limit_bytes,
            request_timeout_seconds,
        })
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            body_limit_bytes: self.request_body_limit_bytes,
            request_timeout: Duration::from_secs(self.request_timeout_seconds),
        }
    }
}

// Production must be given a real secret; development falls back to a fixed one.
fn resolve_secret(app_env: AppEnv, raw: Option<String>) -> Result<String, ConfigError> {
    match raw.filter(|s| !s.trim().is_empty()) {
        Some(secret) => Ok(secret),
        None if app_env.is_production() => Err(ConfigError::Missing("SECRET_KEY")),
        None => Ok(DEV_SECRET_KEY.to_string()),
    }
}

// TTL must keep `now + ttl` a representable timestamp, or every minted token would fail.
fn parse_ttl(raw: &str, now: i64) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|ttl| expiry_for(now, *ttl).is_some())
        .ok_or(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"))
}
