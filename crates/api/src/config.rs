//! Environment-driven process configuration.

use std::path::PathBuf;
use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    /// Absent means "run on the in-memory stores" (dev fallback).
    pub database_url: Option<String>,
    /// Dev-mode schema sync on startup.
    pub sync_schema: bool,
    /// Directory of built client assets, served with an index.html
    /// fallback for client-side routing.
    pub static_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", "3001"),
            database_url: env::var("DATABASE_URL").ok(),
            sync_schema: try_load("SYNC_SCHEMA", "false"),
            static_dir: PathBuf::from(try_load::<String>("STATIC_DIR", "public")),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
