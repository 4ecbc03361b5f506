use crate::config::settings::{AppConfig, StoreBackend};
use crate::infrastructure::db::pool;
use crate::modules::movie::repository::{InMemoryMovieRepository, MovieRepository, PgMovieRepository};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub movies: Arc<dyn MovieRepository>,
}

impl AppState {
    pub fn new(config: AppConfig, movies: Arc<dyn MovieRepository>) -> Self {
        Self { config, movies }
    }

    /// Builds the movie repository selected by `config.store`.
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        let movies: Arc<dyn MovieRepository> = match config.store {
            StoreBackend::Memory => {
                info!(seed = %config.seed_path, "Using in-memory movie store");
                Arc::new(InMemoryMovieRepository::from_json_file(&config.seed_path).await?)
            }
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL is required for the postgres movie store")?;
                let db = pool::connect_to_db(url)
                    .await
                    .context("Failed to connect to PostgreSQL")?;
                pool::apply_schema(&db)
                    .await
                    .context("Failed to apply movie schema")?;
                info!("Using PostgreSQL movie store");
                Arc::new(PgMovieRepository::new(db))
            }
        };

        Ok(Self::new(config, movies))
    }
}
