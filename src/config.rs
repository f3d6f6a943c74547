use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_CATALOG_URL: &str = "https://www.freetogame.com/api/games";

/// Server configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub catalog_url: String,
    pub refresh_interval: Duration,
    pub stream_tick: Duration,
    pub fetch_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    /// PORT defaults to 8080; the server listens on all interfaces.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match lookup("PORT") {
            Some(p) if !p.trim().is_empty() => p
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", "must be a valid port number"))?,
            _ => 8080,
        };

        let catalog_url = lookup("CATALOG_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());

        Ok(Config {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            catalog_url,
            refresh_interval: secs(&lookup, "REFRESH_INTERVAL_SECS", 3600)?,
            stream_tick: secs(&lookup, "STREAM_TICK_SECS", 3)?,
            fetch_timeout: secs(&lookup, "FETCH_TIMEOUT_SECS", 30)?,
        })
    }
}

fn secs(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u64,
) -> Result<Duration, ConfigError> {
    let value = match lookup(var) {
        Some(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid(var, "must be a whole number of seconds"))?,
        _ => default,
    };
    if value == 0 {
        return Err(ConfigError::Invalid(var, "must be greater than zero"));
    }
    Ok(Duration::from_secs(value))
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}
