pub mod cli;
pub mod db;
pub mod migration;
pub mod migrator;
pub mod parser;

pub use cli::error::{SquallError, SquallErrorKind};
pub use cli::{commands, output, ux};
pub use migration::{Migration, MigrationsConfig};
pub use migrator::{migrate, MigrateOptions, Migrator};
pub use parser::{split_statements, without_comments};
