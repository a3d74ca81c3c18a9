pub mod bills;
pub mod editor;
pub mod export;
pub mod profile;
pub mod settings;

use serde::Serialize;

use crate::error::{Error, ValidationErrors};

/// What the UI receives when a command fails: either field errors to show
/// next to the inputs, or a message for an alert.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum CommandError {
    Validation(ValidationErrors),
    Message(String),
}

impl From<ValidationErrors> for CommandError {
    fn from(errors: ValidationErrors) -> Self {
        CommandError::Validation(errors)
    }
}

impl From<Error> for CommandError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(errors) => CommandError::Validation(errors),
            other => CommandError::Message(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(err: anyhow::Error) -> Self {
        CommandError::Message(err.to_string())
    }
}
