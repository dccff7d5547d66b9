use crate::migration::Migration;
use crate::parser::{ParseError, ParseErrorKind};

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::task::JoinSet;


pub const DEFAULT_DIRECTORY: &str = "./migrations";


/// Anything that can hand over an ordered set of migrations.
#[async_trait::async_trait]
pub trait MigrationSource: Send + Sync {
    async fn load(&self) -> Result<Vec<Migration>, ParseError>;
}


/// Loads one migration per regular file in `root`.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        DirectorySource { root: root.as_ref().to_path_buf() }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ParseError {
    ParseError { kind: ParseErrorKind::Io { path: path.to_path_buf(), source } }
}

#[async_trait::async_trait]
impl MigrationSource for DirectorySource {
    /// Missing directory means no migrations. Files are read concurrently and
    /// returned sorted by ID (then name).
    async fn load(&self) -> Result<Vec<Migration>, ParseError> {
        let root = self.root.as_path();
        if !fs::try_exists(root).await.map_err(|e| io_error(root, e))? {
            tracing::debug!("Migration directory {:?} does not exist", root);
            return Ok(vec![]);
        }

        let mut entries = fs::read_dir(root)
            .await
            .map_err(|e| io_error(root, e))?;
        let mut reads = JoinSet::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(root, e))?
        {
            let path = entry.path();
            let metadata = fs::metadata(&path).await.map_err(|e| io_error(&path, e))?;
            if !metadata.is_file() {
                tracing::debug!("Skipping non-file: {:?}", path);
                continue;
            }

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => return Err(ParseError { kind: ParseErrorKind::InvalidFileName(path) }),
            };
            if name.starts_with('.') {
                tracing::debug!("Skipping hidden file: {:?}", path);
                continue;
            }

            // Fail before any read if the name carries no usable ID.
            let id = super::parse_id_from_name(&name)?;

            reads.spawn(async move {
                let content = fs::read_to_string(&path)
                    .await
                    .map_err(|e| io_error(&path, e))?;
                Ok::<_, ParseError>(Migration::new(id, name, content))
            });
        }

        let mut migrations = Vec::with_capacity(reads.len());
        while let Some(joined) = reads.join_next().await {
            migrations.push(joined??);
        }

        migrations.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.name.cmp(&b.name)));
        tracing::debug!("Loaded {} migration(s) from {:?}", migrations.len(), root);

        Ok(migrations)
    }
}


/// Where the engine gets its migrations from, resolved once per run.
#[derive(Debug, Clone)]
pub enum MigrationsConfig {
    FromSource(PathBuf),
    Literal(Vec<Migration>),
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        MigrationsConfig::FromSource(PathBuf::from(DEFAULT_DIRECTORY))
    }
}

impl From<Vec<Migration>> for MigrationsConfig {
    fn from(migrations: Vec<Migration>) -> Self {
        MigrationsConfig::Literal(migrations)
    }
}

impl From<&str> for MigrationsConfig {
    fn from(root: &str) -> Self {
        MigrationsConfig::FromSource(PathBuf::from(root))
    }
}

impl From<PathBuf> for MigrationsConfig {
    fn from(root: PathBuf) -> Self {
        MigrationsConfig::FromSource(root)
    }
}

#[async_trait::async_trait]
impl MigrationSource for MigrationsConfig {
    async fn load(&self) -> Result<Vec<Migration>, ParseError> {
        match self {
            MigrationsConfig::FromSource(root) => DirectorySource::new(root).load().await,
            // Caller-supplied order is kept as is.
            MigrationsConfig::Literal(migrations) => Ok(migrations.clone()),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    #[tokio::test]
    async fn missing_directory_yields_no_migrations() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path().join("nope"));
        assert!(source.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn loads_files_sorted_by_numeric_id() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("10.later.sql"), "select 10;").unwrap();
        std_fs::write(dir.path().join("2.second.sql"), "select 2;").unwrap();
        std_fs::write(dir.path().join("0.init.sql"), "create table a (x);").unwrap();
        std_fs::write(dir.path().join(".gitkeep"), "").unwrap();
        std_fs::create_dir(dir.path().join("3.not_a_file")).unwrap();

        let migrations = DirectorySource::new(dir.path()).load().await.unwrap();

        let ids: Vec<i64> = migrations.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![0, 2, 10]);
        assert_eq!(migrations[0].name, "0.init.sql");
        assert_eq!(migrations[0].content, "create table a (x);");
        assert_eq!(migrations[2].content, "select 10;");
    }

    #[tokio::test]
    async fn malformed_id_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("1.ok.sql"), "select 1;").unwrap();
        std_fs::write(dir.path().join("init.sql"), "select 2;").unwrap();

        let err = DirectorySource::new(dir.path()).load().await.unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidMigrationId(ref n) if n == "init.sql"));
    }

    #[tokio::test]
    async fn literal_config_keeps_given_order() {
        let migrations = vec![
            Migration::new(5, "five", "select 5"),
            Migration::new(1, "one", "select 1"),
        ];
        let config = MigrationsConfig::from(migrations.clone());
        assert_eq!(config.load().await.unwrap(), migrations);
    }

    #[tokio::test]
    async fn source_config_reads_directory() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("1.a.sql"), "select 1;").unwrap();

        let config = MigrationsConfig::from(dir.path().to_path_buf());
        let migrations = config.load().await.unwrap();
        assert_eq!(migrations, vec![Migration::new(1, "1.a.sql", "select 1;")]);
    }
}
