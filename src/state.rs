use std::sync::Arc;

use sea_orm::{ConnectOptions, Database};
use sqlx::postgres::PgPool;

use crate::config::Config;
use crate::services::{ComparisonService, DiffRunner};
use crate::store::{DiffStore, PgStore};

/// Application state shared across all handlers and the runner
#[derive(Clone)]
pub struct AppState {
    /// Persistence for diffs and job statuses
    pub store: Arc<dyn DiffStore>,
    pub comparison: Arc<ComparisonService>,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState backed by PostgreSQL
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        // Connect to PostgreSQL with SQLx (for migrations)
        let pg_pool = PgPool::connect(&config.database_url)
            .await
            .map_err(|e| AppStateError::Postgres(e.to_string()))?;

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pg_pool)
            .await
            .map_err(|e| AppStateError::Migration(e.to_string()))?;
        pg_pool.close().await;

        // Connect to PostgreSQL with SeaORM
        let mut opt = ConnectOptions::new(&config.database_url);
        opt.max_connections(20)
            .min_connections(1)
            .sqlx_logging(true);

        let db = Database::connect(opt)
            .await
            .map_err(|e| AppStateError::Postgres(e.to_string()))?;

        Self::with_store(config, Arc::new(PgStore::new(db)))
    }

    /// Create AppState with a custom store (for testing)
    pub fn with_store(config: Config, store: Arc<dyn DiffStore>) -> Result<Self, AppStateError> {
        let comparison = ComparisonService::from_config(&config)
            .map_err(|e| AppStateError::HttpClient(e.to_string()))?;

        Ok(Self {
            store,
            comparison: Arc::new(comparison),
            config,
        })
    }

    /// Runner wired to this state's comparison service and store
    pub fn runner(&self) -> DiffRunner {
        DiffRunner::new(self.comparison.clone(), self.store.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("PostgreSQL connection error: {0}")]
    Postgres(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}
