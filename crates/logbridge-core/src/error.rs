//! Error types for logbridge

use thiserror::Error;

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Error type for bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    /// A record batch arrived for a resource whose logger was never created
    #[error("create the logger before logging: {resource}")]
    LoggerNotFound { resource: String },

    /// A resource identifier failed validation on revive
    #[error("invalid resource identifier: {0}")]
    InvalidResource(String),

    /// A log level could not be parsed
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Envelope addressed to a channel nobody serves
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    /// Method not part of the channel's protocol
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    /// No command registered under this name
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Command invoked with arguments of the wrong shape
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The transport rejected a call
    #[error("transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl BridgeError {
    /// Returns an error code suitable for response envelopes
    pub fn error_code(&self) -> u32 {
        match self {
            BridgeError::LoggerNotFound { .. } => 1,
            BridgeError::InvalidResource(_) => 2,
            BridgeError::InvalidLogLevel(_) => 3,
            BridgeError::UnknownChannel(_) => 4,
            BridgeError::UnknownMethod(_) => 5,
            BridgeError::UnknownCommand(_) => 6,
            BridgeError::InvalidArgument(_) => 7,
            BridgeError::Serialization(_) => 8,
            BridgeError::Transport(_) => 9,
            BridgeError::Config(_) => 10,
            BridgeError::Internal(_) => 11,
        }
    }

    /// Create an error from an error code and message (for envelope decoding)
    pub fn from_code(code: u32, message: String) -> Self {
        match code {
            1 => BridgeError::LoggerNotFound { resource: message },
            2 => BridgeError::InvalidResource(message),
            3 => BridgeError::InvalidLogLevel(message),
            4 => BridgeError::UnknownChannel(message),
            5 => BridgeError::UnknownMethod(message),
            6 => BridgeError::UnknownCommand(message),
            7 => BridgeError::InvalidArgument(message),
            8 => BridgeError::Serialization(message),
            9 => BridgeError::Transport(message),
            10 => BridgeError::Config(message),
            _ => BridgeError::Internal(message),
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BridgeError {
    fn from(err: toml::de::Error) -> Self {
        BridgeError::Config(err.to_string())
    }
}
