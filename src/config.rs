use crate::error::ShelfError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Environment keys recognised by the config layer.
const ENV_KEYS: &[&str] = &[
    "DATABASE_URL",
    "LOGLEVEL",
    "LISTEN_ADDR",
    "POLL_COUNT",
    "POLL_INTERVAL_MS",
    "MAX_CONNECTIONS",
    "PAGE_TITLE",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Postgres connection string. Checked per request, not at startup.
    pub database_url: Option<String>,
    pub loglevel: String,
    pub listen_addr: String,
    pub poll_count: usize,
    pub poll_interval_ms: u64,
    pub max_connections: u32,
    pub page_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            loglevel: "info".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            poll_count: 10,
            poll_interval_ms: 1000,
            max_connections: 5,
            page_title: "Welcome to Shelfcast".to_string(),
        }
    }
}

impl Config {
    /// Build from defaults overlaid with process environment. Any value that
    /// fails to parse is an error; nothing falls back to a default.
    pub fn from_env() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(ENV_KEYS))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validated connection string, or a configuration error when it is
    /// absent, blank, or not a postgres URL.
    pub fn require_database_url(&self) -> Result<&str, ShelfError> {
        let raw = self
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ShelfError::MissingDatabaseUrl)?;
        let parsed =
            Url::parse(raw).map_err(|e| ShelfError::InvalidDatabaseUrl(e.to_string()))?;
        match parsed.scheme() {
            "postgres" | "postgresql" => Ok(raw),
            other => Err(ShelfError::InvalidDatabaseUrl(format!(
                "unsupported scheme `{other}`"
            ))),
        }
    }
}
