use std::{net::SocketAddr, time::Duration};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {name} '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads `USUS_*` variables, loading a `.env` file first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let raw_addr = env_or("USUS_LISTEN_ADDR", "0.0.0.0:8080");
        let listen_addr: SocketAddr = raw_addr.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                name: "USUS_LISTEN_ADDR",
                value: raw_addr.clone(),
                reason: e.to_string(),
            }
        })?;

        let db_path = env_or("USUS_DB_PATH", "./db/usus.db");

        let cors_allow = env_or("USUS_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let raw_timeout = env_or("USUS_REQUEST_TIMEOUT_MS", "30000");
        let timeout_ms: u64 =
            raw_timeout
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                    name: "USUS_REQUEST_TIMEOUT_MS",
                    value: raw_timeout.clone(),
                    reason: e.to_string(),
                })?;

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
