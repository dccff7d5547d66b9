use crate::db::{self, DbEngine, KeyValueStore, ProgressStore};
use crate::migration::{Migration, MigrationsConfig};
use crate::migrator::{MigrateOptions, Migrator};
use crate::{ux, SquallError};

use serde::Serialize;
use std::path::PathBuf;


#[derive(Debug, Serialize)]
pub struct UpReport {
    pub migrated: bool,
    pub watermark: i64,
}

#[derive(Debug, Serialize)]
pub struct PlannedMigration {
    pub id: i64,
    pub name: String,
    pub statements: Vec<String>,
}

impl From<&Migration> for PlannedMigration {
    fn from(migration: &Migration) -> Self {
        PlannedMigration {
            id: migration.id,
            name: migration.name.clone(),
            statements: migration.statements().to_strings(),
        }
    }
}


fn options(migration_dir: &str, log: bool) -> MigrateOptions {
    MigrateOptions {
        migrations: MigrationsConfig::FromSource(PathBuf::from(migration_dir)),
        log,
    }
}

/// Ensures the database is reachable and the progress table exists.
pub async fn peck(backend: &mut db::EngineBackend) -> Result<(), SquallError> {
    tracing::info!("Pecking {} database...", backend.name());
    backend.execute("SELECT 1").await?;
    backend.ensure_store().await?;
    tracing::info!("Pecking successful 🌩️");

    Ok(())
}

/// Applies pending migrations from `migration_dir`.
pub async fn up<E>(
    engine: &mut E,
    migration_dir: &str,
    log: bool,
) -> Result<UpReport, SquallError>
where
    E: DbEngine + KeyValueStore,
{
    tracing::info!("Loading migrations from '{migration_dir}'");
    let migrated = Migrator::new(&mut *engine, options(migration_dir, log)).run().await?;

    let watermark = ProgressStore::default().watermark(engine).await?;
    if migrated {
        tracing::info!("Migrations complete, last applied ID is {watermark} 🌩️");
    } else {
        tracing::info!("No migrations found in '{migration_dir}'");
    }

    Ok(UpReport { migrated, watermark })
}

/// Lists the migrations `up` would apply.
pub async fn plan<E>(
    engine: &mut E,
    migration_dir: &str,
) -> Result<Vec<PlannedMigration>, SquallError>
where
    E: DbEngine + KeyValueStore,
{
    tracing::info!("Loading migrations from '{migration_dir}'");
    let pending = Migrator::new(&mut *engine, options(migration_dir, false)).plan().await?;

    ux::show_migration_plan(&pending);

    Ok(pending.iter().map(PlannedMigration::from).collect())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{EngineBackend, SqliteEngine, NO_WATERMARK};
    use std::fs;

    async fn backend() -> EngineBackend {
        EngineBackend::Sqlite(SqliteEngine::connect("sqlite::memory:").await.unwrap())
    }

    #[tokio::test]
    async fn peck_creates_progress_table() {
        let mut backend = backend().await;
        assert!(!backend.store_exists().await.unwrap());
        peck(&mut backend).await.unwrap();
        assert!(backend.store_exists().await.unwrap());

        let watermark = ProgressStore::default().watermark(&mut backend).await.unwrap();
        assert_eq!(watermark, NO_WATERMARK);
    }

    #[tokio::test]
    async fn plan_then_up() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1.init.sql"), "create table a (x);\n# seed\ninsert into a values (1);").unwrap();
        fs::write(dir.path().join("2.more.sql"), "create table b (y);").unwrap();
        let dir_str = dir.path().to_str().unwrap();

        let mut backend = backend().await;

        let pending = plan(&mut backend, dir_str).await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].name, "1.init.sql");
        assert_eq!(pending[0].statements, vec!["create table a (x)", "insert into a values (1)"]);

        let report = up(&mut backend, dir_str, false).await.unwrap();
        assert!(report.migrated);
        assert_eq!(report.watermark, 2);

        assert!(plan(&mut backend, dir_str).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn up_without_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        let mut backend = backend().await;
        let report = up(&mut backend, missing.to_str().unwrap(), false).await.unwrap();

        assert!(!report.migrated);
        assert_eq!(report.watermark, NO_WATERMARK);
    }
}
