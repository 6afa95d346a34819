//! Request and response envelopes exchanged between the two processes

use logbridge_core::{BridgeError, BridgeResult};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Request envelope addressed to a channel and method
///
/// Envelopes without a request id are one-way notifications and get no response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Service identifier the receiver routes on (e.g. "MainThreadLogger")
    pub channel: String,

    /// Method name within the channel (e.g. "$log")
    pub method: String,

    /// Serialized method arguments (JSON)
    #[serde(default)]
    pub payload: serde_json::Value,

    /// Optional request ID for correlation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

impl RequestEnvelope {
    /// Create a new request envelope
    pub fn new(
        channel: impl Into<String>,
        method: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            channel: channel.into(),
            method: method.into(),
            payload,
            request_id: None,
        }
    }

    /// Create from a serializable payload
    pub fn from_typed<T: Serialize>(
        channel: impl Into<String>,
        method: impl Into<String>,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(channel, method, serde_json::to_value(payload)?))
    }

    /// Set request ID
    pub fn with_request_id(mut self, id: u64) -> Self {
        self.request_id = Some(id);
        self
    }

    /// Whether the sender expects no response
    pub fn is_notification(&self) -> bool {
        self.request_id.is_none()
    }

    /// Deserialize the payload to a typed value
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.payload)
    }
}

/// Response status indicating success or failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Response to a [`RequestEnvelope`] carrying a request id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub status: ResponseStatus,

    /// Result value (on success)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,

    /// [`BridgeError::error_code`] (on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<u32>,

    /// Error message (on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Request ID of the originating request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<u64>,
}

impl ResponseEnvelope {
    /// Create a success response with payload
    pub fn success(payload: serde_json::Value) -> Self {
        Self {
            status: ResponseStatus::Success,
            payload: Some(payload),
            error_code: None,
            error_message: None,
            request_id: None,
        }
    }

    /// Create an error response
    pub fn error(code: u32, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            payload: None,
            error_code: Some(code),
            error_message: Some(message.into()),
            request_id: None,
        }
    }

    /// Create an error response from a bridge error
    pub fn from_error(err: &BridgeError) -> Self {
        Self::error(err.error_code(), err.to_string())
    }

    /// Build the response for a handler result
    pub fn from_result(result: BridgeResult<serde_json::Value>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(err) => Self::from_error(&err),
        }
    }

    /// Set request ID for correlation
    pub fn with_request_id(mut self, id: Option<u64>) -> Self {
        self.request_id = id;
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    /// Turn the response back into the result the remote handler produced
    pub fn into_result(self) -> BridgeResult<serde_json::Value> {
        match self.status {
            ResponseStatus::Success => Ok(self.payload.unwrap_or(serde_json::Value::Null)),
            ResponseStatus::Error => Err(BridgeError::from_code(
                self.error_code.unwrap_or(0),
                self.error_message.unwrap_or_default(),
            )),
        }
    }
}
