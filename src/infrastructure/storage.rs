use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::domain::repositories::{CounterRepository, TeamRepository};
use crate::infrastructure::repositories::{
    InMemoryStore, PostgresCounterRepository, PostgresTeamRepository,
};

/// Errors raised while opening the PostgreSQL backend
#[derive(Debug, Error)]
pub enum StorageSetupError {
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Connects to PostgreSQL and brings the schema up to date
pub async fn connect_postgres(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, StorageSetupError> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(StorageSetupError::Connect)?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database connected and migrated");

    Ok(pool)
}

/// The pair of repositories the services run on
#[derive(Clone)]
pub struct Repositories {
    pub teams: Arc<dyn TeamRepository>,
    pub counters: Arc<dyn CounterRepository>,
}

impl Repositories {
    /// Both repositories backed by one shared in-memory store
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            teams: store.clone(),
            counters: store,
        }
    }

    /// Both repositories backed by the given PostgreSQL pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            teams: Arc::new(PostgresTeamRepository::new(pool.clone())),
            counters: Arc::new(PostgresCounterRepository::new(pool)),
        }
    }
}
