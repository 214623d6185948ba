//! Runtime configuration read from the process environment.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use log::warn;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_DB_PATH: &str = "price_estimator.sqlite3";
pub const DEFAULT_SCHEMA_PATH: &str = "sql/schema.sql";
pub const DEFAULT_MODEL_PATH: &str = "models/house_price_linear.json";
pub const DEFAULT_WORKERS: usize = 8;
/// Upper bound on rows handed to the model in one call.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub db_path: String,
    pub schema_path: String,
    pub model_path: String,
    pub workers: usize,
    pub chunk_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Snapshot of the `PRICE_ESTIMATOR_*` variables, with defaults for
    /// anything unset or unparsable.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            bind: parsed_or(&lookup, "PRICE_ESTIMATOR_BIND", DEFAULT_BIND, || {
                SocketAddr::from(([127, 0, 0, 1], 3000))
            }),
            db_path: env_or("PRICE_ESTIMATOR_DB", DEFAULT_DB_PATH),
            schema_path: env_or("PRICE_ESTIMATOR_SCHEMA", DEFAULT_SCHEMA_PATH),
            model_path: env_or("PRICE_ESTIMATOR_MODEL", DEFAULT_MODEL_PATH),
            workers: parsed_or(&lookup, "PRICE_ESTIMATOR_WORKERS", "8", || DEFAULT_WORKERS).max(1),
            chunk_size: parsed_or(&lookup, "PRICE_ESTIMATOR_CHUNK_SIZE", "500", || {
                DEFAULT_CHUNK_SIZE
            })
            .max(1),
        }
    }
}

fn parsed_or<T, F, D>(lookup: &F, key: &str, shown_default: &str, default: D) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
    D: FnOnce() -> T,
{
    match lookup(key) {
        None => default(),
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{key}={raw:?} is not valid, using {shown_default}");
            default()
        }),
    }
}
