use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Unknown persona '{0}' in persona_providers")]
    UnknownPersona(String),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Failure of a single generative call.
///
/// `Unavailable` and `Timeout` are transient; `Rejected` and
/// `MalformedResponse` are not worth retrying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResponderError {
    #[error("Responder unavailable: {0}")]
    Unavailable(String),

    #[error("Responder timed out after {0:?}")]
    Timeout(Duration),

    #[error("Responder rejected the request: {0}")]
    Rejected(String),

    #[error("Malformed responder output: {0}")]
    MalformedResponse(String),
}

impl ResponderError {
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ResponderError::Unavailable(_) | ResponderError::Timeout(_)
        )
    }
}

impl From<std::io::Error> for ResponderError {
    fn from(e: std::io::Error) -> Self {
        ResponderError::Unavailable(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Synthesis call failed: {0}")]
    Responder(String),

    #[error("Synthesis produced no usable action lines")]
    ParseEmpty,
}

#[derive(Error, Debug)]
pub enum OrchestrationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write report: {0}")]
    WriteReport(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
