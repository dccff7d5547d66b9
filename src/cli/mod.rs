pub mod commands;
pub mod error;
pub mod output;
pub mod ux;

use crate::db;
use crate::migration::DEFAULT_DIRECTORY;
pub use clap::{Parser, Subcommand, ValueEnum};


/// User-facing enum to select engine
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    Sqlite,
    Postgres,
}

impl Engine {
    pub async fn into_backend(self, conn_str: &str) -> Result<db::EngineBackend, db::EngineError> {
        match self {
            Engine::Sqlite => Ok(db::EngineBackend::Sqlite(db::SqliteEngine::connect(conn_str).await?)),
            Engine::Postgres => Ok(db::EngineBackend::Postgres(db::PostgresEngine::connect(conn_str).await?)),
        }
    }
}


#[derive(Parser)]
#[command(name = "squall", version, about = "Squall applies numbered SQL migration files, in order, exactly once.")]
pub struct Cli {
    #[arg(
        long = "db",
        help = "Database connection string, e.g.:
    sqlite://app.db
    postgresql://<username>:<password>@<host>:<port>/<database>\n",
        env = "DB_CONNECTION_STRING",
        hide_env_values = true
    )]
    pub db_connection_string: String,

    #[arg(
        long = "dir",
        help = "Directory containing migration files named like '<ID>.<description>.sql'",
        env = "MIGRATION_DIRECTORY",
        default_value = DEFAULT_DIRECTORY,
    )]
    pub migration_directory: String,

    #[arg(
        long = "engine",
        value_enum,
        help = "Database engine.",
        default_value_t = Engine::Sqlite,
        env = "ENGINE",
    )]
    pub engine: Engine,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Set level of verbosity. [default: INFO]\n\t-v: DEBUG\n\t-vv: TRACE\n--quiet takes precedence over --verbose."
    )]
    pub verbose: u8,

    #[arg(
        short,
        long,
        action = clap::ArgAction::SetTrue,
        help = "Disable all information logs (only ERROR level logs are shown).\n--quiet takes precedence over --verbose."
    )]
    pub quiet: bool,

    #[arg(
        long,
        action = clap::ArgAction::SetTrue,
        help = "Enable JSON output format. Human readable output is disabled when this flag is set."
    )]
    pub json: bool,

    #[arg(
        long,
        action = clap::ArgAction::SetTrue,
        help = "Don't print the per-migration progress lines."
    )]
    pub no_log: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Test connection to the database and create the progress table.")]
    Peck {},

    #[command(about = "Apply every migration newer than the last applied one.")]
    Up {},

    #[command(about = "List the migrations `up` would apply, without executing them.")]
    Plan {},
}

impl std::fmt::Display for Commands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Commands::Peck { .. } => "peck",
            Commands::Up { .. } => "up",
            Commands::Plan { .. } => "plan",
        };
        write!(f, "{name}")
    }
}
