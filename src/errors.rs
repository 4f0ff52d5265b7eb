use std::path::PathBuf;

use thiserror::Error;

/// Failure of a call to the remote chat or appointments endpoint.
///
/// The conversation never shows these to the user verbatim; they are folded
/// into fixed bot messages and logged.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {status}")]
    Status { status: u16 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

impl ClientError {
    pub fn network(message: impl Into<String>) -> Self {
        ClientError::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        ClientError::Parse(message.into())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }
}

/// Failure of the durable key-value capability behind the identity store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage I/O failed for '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file '{path}' is not a JSON object")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io { path: path.into(), source }
    }
}

/// Invalid value in the environment-driven configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Variable '{name}' must be a non-negative integer (got '{value}')")]
    NotANumber { name: &'static str, value: String },

    #[error("Variable '{name}' cannot be empty")]
    Empty { name: &'static str },
}
