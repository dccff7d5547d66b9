// {
//   "command": "up",
//   "status": "success",
//   "data": { "migrated": true, "watermark": 12 },
//   "error": null
// }
use crate::cli::commands::{PlannedMigration, UpReport};
use crate::cli::error::{SquallError, SquallErrorKind};
use serde::Serialize;


#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "message", rename_all = "snake_case")]
pub enum SquallErrorJson {
    Engine(String),
    Parse(String),
    SetGlobalDefault(String),
}

impl From<&SquallError> for SquallErrorJson {
    fn from(e: &SquallError) -> Self {
        let stderr = format!("{}", e.kind);

        match &e.kind {
            SquallErrorKind::Engine(_) => Self::Engine(stderr),
            SquallErrorKind::Parse(_) => Self::Parse(stderr),
            SquallErrorKind::SetGlobalDefault(_) => Self::SetGlobalDefault(stderr),
        }
    }
}


#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CommandData {
    Peck {},
    Up(UpReport),
    Plan(Vec<PlannedMigration>),
}


#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SquallStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct SquallOutput<T: Serialize> {
    pub command: String,
    pub status: SquallStatus,
    pub data: Option<T>,
    pub error: Option<SquallErrorJson>,
}

impl<T: Serialize> SquallOutput<T> {
    pub fn from_result(command: String, result: Result<T, SquallError>) -> Self {
        match result {
            Ok(data) => SquallOutput {
                command,
                status: SquallStatus::Success,
                data: Some(data),
                error: None,
            },
            Err(e) => {
                tracing::error!("{e}");
                SquallOutput {
                    command,
                    status: SquallStatus::Error,
                    data: None,
                    error: Some(SquallErrorJson::from(&e)),
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseError, ParseErrorKind};

    #[test]
    fn serializes_error_to_expected_json() {
        let err = SquallError {
            kind: SquallErrorKind::Parse(ParseError {
                kind: ParseErrorKind::InvalidMigrationId("x.sql".into()),
            }),
        };
        let output = SquallOutput::<CommandData>::from_result("up".into(), Err(err));
        let s = serde_json::to_string(&output).unwrap();
        assert_eq!(
            s,
            r#"{"command":"up","status":"error","data":null,"error":{"type":"parse","message":"Migration ID is not a number: 'x.sql'"}}"#
        );
    }

    #[test]
    fn serializes_success_to_expected_json() {
        let data = CommandData::Up(UpReport { migrated: true, watermark: 3 });
        let output = SquallOutput::from_result("up".into(), Ok(data));
        assert_eq!(output.status, SquallStatus::Success);

        let s = serde_json::to_string(&output).unwrap();
        assert_eq!(
            s,
            r#"{"command":"up","status":"success","data":{"migrated":true,"watermark":3},"error":null}"#
        );
    }
}
