use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATA_BASE_URL: &str = "https://www.football-data.co.uk/mmz4281";
pub const DEFAULT_SEASON: &str = "2324";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime settings, read from the environment after `.env` is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_base_url: String,
    pub season: String,
    pub http_timeout: Duration,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_base_url: DEFAULT_DATA_BASE_URL.to_string(),
            season: DEFAULT_SEASON.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_base_url = lookup("MOMENTUM_DATA_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_BASE_URL.to_string());

        let season = lookup("MOMENTUM_SEASON")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SEASON.to_string());

        let timeout_secs = parse_or_default(
            "MOMENTUM_HTTP_TIMEOUT_SECS",
            lookup("MOMENTUM_HTTP_TIMEOUT_SECS"),
            DEFAULT_HTTP_TIMEOUT_SECS,
        );
        let port = parse_or_default("MOMENTUM_PORT", lookup("MOMENTUM_PORT"), DEFAULT_PORT);

        Self {
            data_base_url,
            season,
            http_timeout: Duration::from_secs(timeout_secs),
            port,
        }
    }
}

fn parse_or_default<T: FromStr + Copy + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}='{}', using {}", key, value, default);
            default
        }),
        None => default,
    }
}
