use std::error::Error;
use std::fmt;
use std::path::PathBuf;


#[derive(Debug)]
#[non_exhaustive]
pub struct ParseError {
    pub kind: ParseErrorKind
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseError: {}", self.kind)
    }
}

impl Error for ParseError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		Some(&self.kind)
	}
}

#[derive(Debug)]
pub enum ParseErrorKind {
    InvalidFileName(PathBuf),
    InvalidMigrationId(String),
    Io { path: PathBuf, source: std::io::Error },
    Join(tokio::task::JoinError),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileName(path) => write!(f, "Migration file name is not valid UTF-8: '{path:?}'"),
            Self::InvalidMigrationId(name) => write!(f, "Migration ID is not a number: '{name}'"),
            Self::Io { path, .. } => write!(f, "Failed to read: '{path:?}'"),
            Self::Join(e) => write!(f, "Migration loading task failed: {e}"),
        }
    }
}

impl Error for ParseErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Io { source, .. } => Some(source),
			Self::Join(source) => Some(source),
			_ => None,
		}
	}
}

impl From<tokio::task::JoinError> for ParseError {
    fn from(error: tokio::task::JoinError) -> Self {
        ParseError { kind: ParseErrorKind::Join(error) }
    }
}
