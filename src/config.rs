use std::env;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub store_url: Option<String>,
    pub store_collection: String,
    pub store_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            store_url: env::var("STORE_URL").ok(),
            store_collection: env::var("STORE_COLLECTION").unwrap_or_else(|_| "orders".to_string()),
            store_timeout_secs: parse_or_default("STORE_TIMEOUT_SECS", 10)?,
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
