use crate::{db::EngineError, parser::ParseError};

use std::error::Error;
use std::fmt;
use tracing::subscriber::SetGlobalDefaultError;


#[derive(Debug)]
pub struct SquallError {
    pub kind: SquallErrorKind
}

impl fmt::Display for SquallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SquallError: {}", self.kind)
    }
}

impl Error for SquallError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
	}
}

#[derive(Debug)]
pub enum SquallErrorKind {
    Engine(EngineError),
    Parse(ParseError),
    SetGlobalDefault(SetGlobalDefaultError),
}

impl fmt::Display for SquallErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(error) => write!(f, "{}", error.kind),
            Self::Parse(error) => write!(f, "{}", error.kind),
            Self::SetGlobalDefault(error) => write!(f, "Failed to set global default subscriber: {}", error),
        }
    }
}

impl Error for SquallErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Engine(source) => Some(source),
            Self::Parse(source) => Some(source),
            Self::SetGlobalDefault(source) => Some(source),
		}
	}
}

impl From<EngineError> for SquallError {
    fn from(error: EngineError) -> Self {
        SquallError { kind: SquallErrorKind::Engine(error) }
    }
}

impl From<SetGlobalDefaultError> for SquallError {
    fn from(error: SetGlobalDefaultError) -> Self {
        SquallError { kind: SquallErrorKind::SetGlobalDefault(error) }
    }
}

impl From<ParseError> for SquallError {
    fn from(error: ParseError) -> Self {
        SquallError { kind: SquallErrorKind::Parse(error) }
    }
}
