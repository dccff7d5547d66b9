mod source;

pub use source::{DirectorySource, MigrationSource, MigrationsConfig, DEFAULT_DIRECTORY};

use crate::parser::{self, ParseError, ParseErrorKind, StatementCollection};


/// Extract migration ID from file name: "001.create_users.sql" -> 1
pub fn parse_id_from_name(name: &str) -> Result<i64, ParseError> {
    let prefix = name.split('.').next().unwrap_or(name);

    prefix.parse::<i64>().map_err(|_| ParseError {
        kind: ParseErrorKind::InvalidMigrationId(name.to_string()),
    })
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub id: i64,
    pub name: String,
    pub content: String,
}

impl Migration {
    pub fn new(id: i64, name: impl Into<String>, content: impl Into<String>) -> Self {
        Migration { id, name: name.into(), content: content.into() }
    }

    pub fn statements(&self) -> StatementCollection {
        parser::split_statements(&self.content)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_prefix() {
        let cases = [
            ("0.init.sql", 0),
            ("001.create_users.sql", 1),
            ("42.sql", 42),
            ("7", 7),
            ("20240101.add-index.up.sql", 20240101),
        ];
        for (name, id) in cases {
            assert_eq!(parse_id_from_name(name).unwrap(), id, "{name}");
        }
    }

    #[test]
    fn rejects_non_numeric_prefix() {
        for name in ["init.sql", "001_create_users.sql", "", ".hidden", "1a.sql"] {
            let err = parse_id_from_name(name).unwrap_err();
            assert!(matches!(err.kind, ParseErrorKind::InvalidMigrationId(ref n) if n == name));
        }
    }

    #[test]
    fn statements_are_filtered_and_split() {
        let migration = Migration::new(0, "0.sql", "# accounts\ncreate table accounts (username);\nselect 1;");
        assert_eq!(
            migration.statements().to_strings(),
            vec!["create table accounts (username)", "select 1"]
        );
    }
}
