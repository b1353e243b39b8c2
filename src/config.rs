//! Server configuration, read from the environment.
//!
//! | Variable         | Default            |
//! |------------------|--------------------|
//! | `DATABASE_URL`   | `sqlite::memory:`  |
//! | `BIND_ADDRESS`   | `0.0.0.0:3000`     |
//! | `API_KEYS`       | none, comma list   |
//! | `CACHE_TTL_SECS` | `300`, `0` disables |

use std::collections::HashSet;
use std::env;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    /// Keys accepted in the `api_key` query parameter.
    pub api_keys: HashSet<String>,
    /// How long identical queries are answered from memory.
    pub cache_ttl: Duration,
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; unset or blank variables take their
    /// defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str, default: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let api_keys = lookup("API_KEYS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(String::from)
            .collect();

        let cache_ttl = lookup("CACHE_TTL_SECS")
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .map_or(DEFAULT_CACHE_TTL, Duration::from_secs);

        Self {
            database_url: read("DATABASE_URL", DEFAULT_DATABASE_URL),
            bind_address: read("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            api_keys,
            cache_ttl,
        }
    }
}
