use std::net::SocketAddr;

use thiserror::Error;
use tracing::info;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://tons_of_stats.sqlite?mode=rwc";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BIND_ADDRESS: ([u8; 4], u16) = ([0, 0, 0, 0], 3000);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_address: SocketAddr,
    /// Channel that result messages must be posted in. Messages from any channel are processed
    /// when unset.
    pub results_channel: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Call [`dotenvy::dotenv`] beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        info!("Setting up environment");

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let max_connections = parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")?
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let bind_address = parse_var(&lookup, "BIND_ADDRESS")?
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDRESS));
        let results_channel = lookup("RESULT_CHANNEL").filter(|channel| !channel.is_empty());

        Ok(Self {
            database_url,
            max_connections,
            bind_address,
            results_channel,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            bind_address: SocketAddr::from(DEFAULT_BIND_ADDRESS),
            results_channel: None,
        }
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(None),
    }
}
