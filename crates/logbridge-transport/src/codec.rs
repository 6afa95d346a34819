//! JSON encoding for envelopes and record batches

use logbridge_core::BridgeError;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Failure to move an envelope or record batch across the wire
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("cannot encode message: {0}")]
    Serialization(String),

    #[error("cannot decode message: {0}")]
    Deserialization(String),

    /// A script line that is not a JSON value
    #[error("malformed script: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Io => CodecError::Serialization(err.to_string()),
            _ => CodecError::Deserialization(err.to_string()),
        }
    }
}

// Crossing into the bridge, every codec failure is a code 8 error.
impl From<CodecError> for BridgeError {
    fn from(err: CodecError) -> Self {
        BridgeError::Serialization(err.to_string())
    }
}

/// Byte-level encoding used by the dispatcher
pub trait Codec: Send + Sync {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError>;
}

/// Compact JSON, one message per buffer or per line
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }

    /// Encode a message as a single line of JSON
    pub fn encode_string<T: Serialize>(&self, value: &T) -> Result<String, CodecError> {
        Ok(serde_json::to_string(value)?)
    }

    /// Decode a newline-delimited script of messages, skipping blank lines
    ///
    /// Fails on the first malformed line, reporting its 1-based line number.
    pub fn decode_lines<T: DeserializeOwned>(&self, data: &str) -> Result<Vec<T>, CodecError> {
        let mut messages = Vec::new();
        for (idx, line) in data.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let message = serde_json::from_str(line)
                .map_err(|e| CodecError::InvalidFormat(format!("line {}: {e}", idx + 1)))?;
            messages.push(message);
        }
        Ok(messages)
    }
}

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(value)?)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        Ok(serde_json::from_slice(data)?)
    }
}
