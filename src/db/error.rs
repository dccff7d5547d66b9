use std::error::Error;
use std::fmt;


#[derive(Debug)]
#[non_exhaustive]
pub struct EngineError {
    pub kind: EngineErrorKind
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EngineError: {}", self.kind)
    }
}

impl Error for EngineError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		Some(&self.kind)
	}
}

#[derive(Debug)]
pub enum EngineErrorKind {
    SQLX(sqlx::Error),
    Statement { statement: String, source: sqlx::Error },
    TransactionNotStarted,
}

impl fmt::Display for EngineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SQLX(e) => write!(f, "{e}"),
            Self::Statement { statement, source } => write!(f, "Statement failed: {source}\n---\n{statement}\n---"),
            Self::TransactionNotStarted => write!(f, "Transaction has not been started"),
        }
    }
}

impl Error for EngineErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::SQLX(source) => Some(source),
			Self::Statement { source, .. } => Some(source),
			_ => None,
		}
	}
}

impl From<sqlx::Error> for EngineError {
    fn from(error: sqlx::Error) -> Self {
        EngineError { kind: EngineErrorKind::SQLX(error) }
    }
}

impl EngineError {
    pub fn statement(statement: &str, source: sqlx::Error) -> Self {
        EngineError { kind: EngineErrorKind::Statement { statement: statement.to_string(), source } }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn engine_error_display_formats_correctly() {
        let cases: Vec<(EngineErrorKind, &str)> = vec![
            (EngineErrorKind::SQLX(sqlx::Error::RowNotFound), "no rows returned"),
            (EngineErrorKind::TransactionNotStarted, "Transaction has not been started"),
            (
                EngineErrorKind::Statement {
                    statement: "select nope".into(),
                    source: sqlx::Error::PoolClosed,
                },
                "select nope",
            ),
        ];

        for (kind, expect) in cases {
            let text = kind.to_string();
            assert!(
                text.contains(expect),
                "Expected `{}` in `{}`",
                expect,
                text
            );
        }
    }

    #[test]
    fn engine_error_source_is_accessible() {
        let err = EngineError::statement("select 1", sqlx::Error::PoolClosed);
        let src = err.kind.source().unwrap().to_string();
        assert!(src.contains("closed"));
    }

    #[test]
    fn engine_error_from_sqlx() {
        let sqlx_err = sqlx::Error::RowNotFound;

        let e1: EngineError = sqlx_err.into();

        assert!(matches!(e1.kind, EngineErrorKind::SQLX(_)));
    }
}
