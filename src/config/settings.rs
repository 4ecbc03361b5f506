use crate::config::env::{self, EnvKey};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::str::FromStr;

/// Which movie repository backs the service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "json" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            other => Err(anyhow!("Unknown movie store `{other}`, expected `memory` or `postgres`")),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub store: StoreBackend,
    pub database_url: Option<String>,
    pub seed_path: String,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let store = env::get(EnvKey::MovieStore)
            .map(|raw| raw.parse::<StoreBackend>())
            .unwrap_or(Ok(StoreBackend::default()))?;

        let database_url = match store {
            StoreBackend::Postgres => Some(
                env::get(EnvKey::DatabaseUrl)
                    .context("DATABASE_URL must be set for the postgres movie store")?,
            ),
            StoreBackend::Memory => env::get(EnvKey::DatabaseUrl).ok(),
        };

        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            store,
            database_url,
            seed_path: env::get_or(EnvKey::MoviesSeedPath, "data/movies.json"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_store_backend_names() {
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!(" Postgres ".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!("pg".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert!("mysql".parse::<StoreBackend>().is_err());
    }
}
