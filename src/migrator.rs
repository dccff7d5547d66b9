use crate::db::{DbEngine, EngineError, KeyValueStore, ProgressStore};
use crate::migration::{Migration, MigrationSource, MigrationsConfig};
use crate::parser::ParseError;
use crate::SquallError;


#[derive(Debug, Clone)]
pub struct MigrateOptions {
    pub migrations: MigrationsConfig,
    /// Print a start banner and one line per applied migration.
    pub log: bool,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        MigrateOptions { migrations: MigrationsConfig::default(), log: true }
    }
}


/// Applies pending migrations against `engine` and tracks progress in the
/// same database.
pub struct Migrator<'a, E: DbEngine + KeyValueStore> {
    engine: &'a mut E,
    progress: ProgressStore,
    options: MigrateOptions,
}

impl<'a, E: DbEngine + KeyValueStore> Migrator<'a, E> {
    pub fn new(engine: &'a mut E, options: MigrateOptions) -> Self {
        Migrator { engine, progress: ProgressStore::default(), options }
    }

    pub fn with_progress_store(mut self, progress: ProgressStore) -> Self {
        self.progress = progress;
        self
    }

    pub async fn list_migrations(&self) -> Result<Vec<Migration>, ParseError> {
        self.options.migrations.load().await
    }

    pub async fn current_watermark(&mut self) -> Result<i64, EngineError> {
        self.progress.watermark(&mut *self.engine).await
    }

    /// Filter, split and execute one migration in its own transaction.
    pub async fn apply(&mut self, migration: &Migration) -> Result<(), EngineError> {
        let statements = migration.statements();
        self.engine.execute_in_transaction(&statements).await
    }

    /// The migrations a [`run`](Self::run) would apply right now.
    pub async fn plan(&mut self) -> Result<Vec<Migration>, SquallError> {
        let migrations = self.list_migrations().await?;
        if migrations.is_empty() {
            return Ok(vec![]);
        }
        let watermark = self.current_watermark().await?;

        Ok(migrations.into_iter().filter(|m| m.id > watermark).collect())
    }

    /// Apply every migration above the watermark, then move the watermark to the
    /// last migration's ID. Returns `false` when there are no migrations at all.
    ///
    /// A failing migration is rolled back and aborts the run with the watermark
    /// untouched; migrations applied before it in the same run stay committed.
    pub async fn run(&mut self) -> Result<bool, SquallError> {
        let migrations = self.list_migrations().await?;
        let Some(last) = migrations.last() else {
            tracing::debug!("No migrations found, nothing to do");
            return Ok(false);
        };

        let watermark = self.current_watermark().await?;
        tracing::debug!("Current watermark: {watermark}");

        if self.options.log {
            tracing::info!("🌩️ Running migrations...");
        }

        for migration in &migrations {
            if migration.id <= watermark {
                tracing::debug!("Skipping {} (already applied)", migration.name);
                continue;
            }

            if self.options.log {
                tracing::info!("\t⚡ {}", migration.name);
            }
            self.apply(migration).await?;
        }

        if last.id < watermark {
            tracing::warn!(
                "Last migration {} is below the watermark {watermark}, keeping the watermark",
                last.id
            );
        }
        self.progress
            .set_watermark(&mut *self.engine, last.id.max(watermark))
            .await?;

        Ok(true)
    }
}


/// Run all pending migrations in one call.
pub async fn migrate<E>(engine: &mut E, options: MigrateOptions) -> Result<bool, SquallError>
where
    E: DbEngine + KeyValueStore,
{
    Migrator::new(engine, options).run().await
}
