//! Configuration loading and representation.
//!
//! Everything is read from environment variables at process start and treated
//! as injected configuration afterwards; nothing below the binary reads the
//! environment directly.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use accounts_auth::ApiKey;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Which operation answers `GET {prefix}/users`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GetUsersMode {
    /// Credential check with a JSON body on a GET request.
    #[default]
    Login,
    /// Lookup by the `userId` query parameter.
    Lookup,
}

impl core::str::FromStr for GetUsersMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "login" => Ok(Self::Login),
            "lookup" => Ok(Self::Lookup),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres { url: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Prefix for every route, without a trailing slash (may be empty).
    pub route_prefix: String,
    pub table_name: String,
    pub api_key: Option<ApiKey>,
    pub get_users_mode: GetUsersMode,
    pub store: StoreBackend,
    pub store_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            route_prefix: "/api/accounts".to_string(),
            table_name: "users".to_string(),
            api_key: None,
            get_users_mode: GetUsersMode::Login,
            store: StoreBackend::Memory,
            store_timeout: Duration::from_millis(5000),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map).
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let bind_addr = match get("ACCOUNTS_BIND_ADDR") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "ACCOUNTS_BIND_ADDR",
                value: v,
            })?,
            None => defaults.bind_addr,
        };

        let route_prefix = get("ACCOUNTS_ROUTE_PREFIX")
            .map(|p| normalize_prefix(&p))
            .unwrap_or(defaults.route_prefix);

        let table_name = get("ACCOUNTS_TABLE_NAME")
            .map(|t| t.trim().to_string())
            .unwrap_or(defaults.table_name);

        let api_key = get("ACCOUNTS_API_KEY").map(ApiKey::new);

        let get_users_mode = match get("ACCOUNTS_GET_USERS_MODE") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "ACCOUNTS_GET_USERS_MODE",
                value: v,
            })?,
            None => defaults.get_users_mode,
        };

        let store = match get("ACCOUNTS_STORE").as_deref().map(str::trim) {
            None | Some("memory") => StoreBackend::Memory,
            Some("postgres") => StoreBackend::Postgres {
                url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "ACCOUNTS_STORE",
                    value: other.to_string(),
                });
            }
        };

        let store_timeout = match get("ACCOUNTS_STORE_TIMEOUT_MS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "ACCOUNTS_STORE_TIMEOUT_MS",
                        value: v,
                    });
                }
            },
            None => defaults.store_timeout,
        };

        Ok(Self {
            bind_addr,
            route_prefix,
            table_name,
            api_key,
            get_users_mode,
            store,
            store_timeout,
        })
    }
}

/// Ensure a leading slash and strip trailing ones (`"api/"` → `"/api"`, `"/"` → `""`).
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
