//! Process configuration read from the environment (and `.env` via dotenvy).

use std::time::Duration;
use tracing::warn;

use crate::infra::cwa::DEFAULT_BASE_URL;
use crate::locations::Location;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// CWA credential; `None` when unset or empty.
    pub api_key: Option<String>,
    pub port: u16,
    pub default_location: Location,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            port: DEFAULT_PORT,
            default_location: Location::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads `CWA_API_KEY`, `PORT`, `DEFAULT_LOCATION`, `CWA_API_BASE_URL` and
    /// `CWA_TIMEOUT_SECS` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source. Unparseable values
    /// are logged and replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_key = lookup("CWA_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, default = DEFAULT_PORT, "Invalid PORT, using default");
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let default_location = match lookup("DEFAULT_LOCATION") {
            Some(name) => Location::lookup(name.trim()).unwrap_or_else(|| {
                warn!(value = %name, "DEFAULT_LOCATION is not a known location, using 臺北市");
                defaults.default_location
            }),
            None => defaults.default_location,
        };

        let base_url = lookup("CWA_API_BASE_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(defaults.base_url);

        let request_timeout = match lookup("CWA_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, default = DEFAULT_TIMEOUT_SECS, "Invalid CWA_TIMEOUT_SECS, using default");
                    defaults.request_timeout
                }
            },
            None => defaults.request_timeout,
        };

        Self {
            api_key,
            port,
            default_location,
            base_url,
            request_timeout,
        }
    }
}
