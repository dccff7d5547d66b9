mod comment;
mod error;
mod statement;

pub use comment::{without_comments, COMMENT_MARKER};
pub use error::{ParseError, ParseErrorKind};
pub use statement::{StatementCollection, TERMINATOR};


/// Turn raw migration text into executable statements: comments out, then split.
pub fn split_statements(sql: &str) -> StatementCollection {
    StatementCollection::parse_sql(&without_comments(sql))
}
