use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://forkify-api.herokuapp.com/api";

/// Server configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: PathBuf,
    pub api_url: String,
    pub static_dir: PathBuf,
    pub results_per_page: usize,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen_addr = lookup("PANTRY_LISTEN_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("PANTRY_LISTEN_ADDR", "must be a valid socket address")
            })?;

        let db_path = lookup("PANTRY_DB_PATH")
            .unwrap_or_else(|| "./pantry.redb".to_string())
            .into();

        let api_url = lookup("PANTRY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(
                "PANTRY_API_URL",
                "must be an http:// or https:// URL",
            ));
        }

        let static_dir = lookup("PANTRY_STATIC_DIR")
            .unwrap_or_else(|| "static".to_string())
            .into();

        let results_per_page = match lookup("PANTRY_RESULTS_PER_PAGE") {
            Some(v) => v
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid(
                    "PANTRY_RESULTS_PER_PAGE",
                    "must be a positive integer",
                ))?,
            None => 10,
        };

        let timeout_secs = match lookup("PANTRY_REQUEST_TIMEOUT_SECS") {
            Some(v) => v.parse::<u64>().map_err(|_| {
                ConfigError::Invalid("PANTRY_REQUEST_TIMEOUT_SECS", "must be a valid u64")
            })?,
            None => 10,
        };

        Ok(Config {
            listen_addr,
            db_path,
            api_url,
            static_dir,
            results_per_page,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}
