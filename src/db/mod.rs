mod error;
mod postgres;
mod progress;
mod sql_common;
mod sqlite;

pub use error::{EngineError, EngineErrorKind};
pub use postgres::PostgresEngine;
pub use progress::{ProgressStore, NO_WATERMARK, PROGRESS_NAMESPACE, WATERMARK_KEY};
pub use sqlite::SqliteEngine;


/// Executes SQL against the target database.
#[async_trait::async_trait]
pub trait DbEngine: Send {
    async fn begin(&mut self) -> Result<(), EngineError>;
    /// Runs inside the open transaction if there is one.
    async fn execute(&mut self, sql: &str) -> Result<(), EngineError>;
    async fn commit(&mut self) -> Result<(), EngineError>;
    async fn rollback(&mut self) -> Result<(), EngineError>;

    /// Execute every statement in one transaction. The first failure rolls the
    /// whole batch back and is returned.
    async fn execute_in_transaction(&mut self, statements: &[String]) -> Result<(), EngineError> {
        self.begin().await?;

        for statement in statements {
            tracing::debug!("Executing: {statement}");
            if let Err(e) = self.execute(statement).await {
                tracing::debug!("Rolling back transaction...");
                if let Err(rollback_error) = self.rollback().await {
                    tracing::error!("Rollback failed: {rollback_error}");
                }
                return Err(e);
            }
        }

        self.commit().await
    }
}


/// Namespaced key-value area living inside the target database.
#[async_trait::async_trait]
pub trait KeyValueStore: Send {
    /// Create the backing table if it's missing.
    async fn ensure_store(&mut self) -> Result<(), EngineError>;
    /// Whether the backing table is there. Never creates it.
    async fn store_exists(&mut self) -> Result<bool, EngineError>;
    async fn get(&mut self, namespace: &str, key: &str) -> Result<Option<String>, EngineError>;
    async fn set(&mut self, namespace: &str, key: &str, value: &str) -> Result<(), EngineError>;
}


pub enum EngineBackend {
    Postgres(PostgresEngine),
    Sqlite(SqliteEngine),
}

impl EngineBackend {
    pub fn name(&self) -> &'static str {
        match self {
            EngineBackend::Postgres(_) => "postgres",
            EngineBackend::Sqlite(_) => "sqlite",
        }
    }
}

#[async_trait::async_trait]
impl DbEngine for EngineBackend {
    async fn begin(&mut self) -> Result<(), EngineError> {
        match self {
            EngineBackend::Postgres(engine) => engine.begin().await,
            EngineBackend::Sqlite(engine) => engine.begin().await,
        }
    }

    async fn execute(&mut self, sql: &str) -> Result<(), EngineError> {
        match self {
            EngineBackend::Postgres(engine) => engine.execute(sql).await,
            EngineBackend::Sqlite(engine) => engine.execute(sql).await,
        }
    }

    async fn commit(&mut self) -> Result<(), EngineError> {
        match self {
            EngineBackend::Postgres(engine) => engine.commit().await,
            EngineBackend::Sqlite(engine) => engine.commit().await,
        }
    }

    async fn rollback(&mut self) -> Result<(), EngineError> {
        match self {
            EngineBackend::Postgres(engine) => engine.rollback().await,
            EngineBackend::Sqlite(engine) => engine.rollback().await,
        }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for EngineBackend {
    async fn ensure_store(&mut self) -> Result<(), EngineError> {
        match self {
            EngineBackend::Postgres(engine) => engine.ensure_store().await,
            EngineBackend::Sqlite(engine) => engine.ensure_store().await,
        }
    }

    async fn store_exists(&mut self) -> Result<bool, EngineError> {
        match self {
            EngineBackend::Postgres(engine) => engine.store_exists().await,
            EngineBackend::Sqlite(engine) => engine.store_exists().await,
        }
    }

    async fn get(&mut self, namespace: &str, key: &str) -> Result<Option<String>, EngineError> {
        match self {
            EngineBackend::Postgres(engine) => engine.get(namespace, key).await,
            EngineBackend::Sqlite(engine) => engine.get(namespace, key).await,
        }
    }

    async fn set(&mut self, namespace: &str, key: &str, value: &str) -> Result<(), EngineError> {
        match self {
            EngineBackend::Postgres(engine) => engine.set(namespace, key, value).await,
            EngineBackend::Sqlite(engine) => engine.set(namespace, key, value).await,
        }
    }
}
