//! Server configuration from environment variables.
//!
//! Optional integrations switch off when their credentials are unset:
//! without `GEONAMES_USERNAME` place names resolve from the built-in table
//! only, and without `LLM_API_KEY` plans come from the mock recommender.

use std::net::SocketAddr;
use std::time::Duration;

use crate::geocoding::GeoNamesConfig;
use crate::recommend::LlmConfig;
use crate::sessions::SessionConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: String,
    /// `None` disables the geocoding service.
    pub geonames: Option<GeoNamesConfig>,
    /// `None` selects the mock recommender.
    pub llm: Option<LlmConfig>,
    pub sessions: SessionConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_var(
            "LAYOVER_BIND_ADDR",
            get("LAYOVER_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;
        let static_dir =
            get("LAYOVER_STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        let geonames = get("GEONAMES_USERNAME").map(|username| {
            let config = GeoNamesConfig::new(username);
            match get("GEONAMES_BASE_URL") {
                Some(url) => config.with_base_url(url),
                None => config,
            }
        });

        let llm = get("LLM_API_KEY").map(|key| {
            let mut config = LlmConfig::new(key);
            if let Some(url) = get("LLM_BASE_URL") {
                config = config.with_base_url(url);
            }
            if let Some(model) = get("LLM_MODEL") {
                config = config.with_model(model);
            }
            config
        });

        let mut sessions = SessionConfig::default();
        if let Some(secs) = get("SESSION_TTL_SECS") {
            let secs: u64 = parse_var("SESSION_TTL_SECS", secs)?;
            sessions.time_to_idle = Duration::from_secs(secs);
        }
        if let Some(capacity) = get("SESSION_MAX_CAPACITY") {
            sessions.max_capacity = parse_var("SESSION_MAX_CAPACITY", capacity)?;
        }

        Ok(Self {
            bind_addr,
            static_dir,
            geonames,
            llm,
            sessions,
        })
    }
}

fn parse_var<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        reason: e.to_string(),
        value,
    })
}
