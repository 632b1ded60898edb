//! Error types for the odid command line tool.

use opendroneid_message::MessageError;
use thiserror::Error;

/// Errors that can occur while decoding input or building a profile.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Message error: {0}")]
    Message(#[from] MessageError),

    /// A profile value was rejected by the codec.
    #[error("Configuration error in {field}: {source}")]
    Config {
        field: &'static str,
        #[source]
        source: MessageError,
    },

    /// An input line could not be decoded.
    #[error("Input {index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: MessageError,
    },

    #[error("Profile defines no messages")]
    EmptyProfile,
}

impl CliError {
    /// Attach a profile field name to a codec error.
    pub fn config(field: &'static str) -> impl FnOnce(MessageError) -> CliError {
        move |source| CliError::Config { field, source }
    }
}
