//! Typed messages of the logger protocol
//!
//! Inbound (extension host to main): `$createLogger` and `$log` on
//! [`MAIN_THREAD_LOGGER`]. Outbound (main to extension host): `$setLevel` on
//! [`EXT_HOST_LOG_LEVEL_SERVICE`].

use crate::RequestEnvelope;
use logbridge_core::{
    BridgeError, BridgeResult, LogLevel, LogRecord, LoggerOptions, ResourceId, UriComponents,
};
use serde::{Deserialize, Serialize};

/// Channel served by the main-side logger bridge
pub const MAIN_THREAD_LOGGER: &str = "MainThreadLogger";

/// Channel served by the extension host's level tracker
pub const EXT_HOST_LOG_LEVEL_SERVICE: &str = "ExtHostLogLevelService";

pub const METHOD_CREATE_LOGGER: &str = "$createLogger";
pub const METHOD_LOG: &str = "$log";
pub const METHOD_SET_LEVEL: &str = "$setLevel";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLoggerParams {
    pub file: UriComponents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<LoggerOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogParams {
    pub file: UriComponents,
    /// Applied in order
    pub messages: Vec<LogRecord>,
}

/// A call on the [`MAIN_THREAD_LOGGER`] channel
#[derive(Debug, Clone, PartialEq)]
pub enum MainThreadLoggerRequest {
    CreateLogger(CreateLoggerParams),
    Log(LogParams),
}

impl MainThreadLoggerRequest {
    pub fn create_logger(file: UriComponents, options: Option<LoggerOptions>) -> Self {
        Self::CreateLogger(CreateLoggerParams { file, options })
    }

    pub fn log(file: UriComponents, messages: Vec<LogRecord>) -> Self {
        Self::Log(LogParams { file, messages })
    }

    pub fn method(&self) -> &'static str {
        match self {
            Self::CreateLogger(_) => METHOD_CREATE_LOGGER,
            Self::Log(_) => METHOD_LOG,
        }
    }

    /// Decode an inbound envelope, checking channel and method
    pub fn from_envelope(envelope: &RequestEnvelope) -> BridgeResult<Self> {
        if envelope.channel != MAIN_THREAD_LOGGER {
            return Err(BridgeError::UnknownChannel(envelope.channel.clone()));
        }
        match envelope.method.as_str() {
            METHOD_CREATE_LOGGER => Ok(Self::CreateLogger(envelope.payload_as()?)),
            METHOD_LOG => Ok(Self::Log(envelope.payload_as()?)),
            other => Err(BridgeError::UnknownMethod(other.to_string())),
        }
    }

    pub fn to_envelope(&self) -> BridgeResult<RequestEnvelope> {
        let envelope = match self {
            Self::CreateLogger(params) => {
                RequestEnvelope::from_typed(MAIN_THREAD_LOGGER, METHOD_CREATE_LOGGER, params)
            }
            Self::Log(params) => RequestEnvelope::from_typed(MAIN_THREAD_LOGGER, METHOD_LOG, params),
        }?;
        Ok(envelope)
    }
}

/// `$setLevel` notification; `resource == None` addresses the global level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetLevelNotification {
    pub level: LogLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<UriComponents>,
}

impl SetLevelNotification {
    pub fn new(level: LogLevel, resource: Option<&ResourceId>) -> Self {
        Self {
            level,
            resource: resource.map(ResourceId::to_components),
        }
    }

    pub fn to_envelope(&self) -> BridgeResult<RequestEnvelope> {
        Ok(RequestEnvelope::from_typed(
            EXT_HOST_LOG_LEVEL_SERVICE,
            METHOD_SET_LEVEL,
            self,
        )?)
    }

    pub fn from_envelope(envelope: &RequestEnvelope) -> BridgeResult<Self> {
        if envelope.channel != EXT_HOST_LOG_LEVEL_SERVICE {
            return Err(BridgeError::UnknownChannel(envelope.channel.clone()));
        }
        if envelope.method != METHOD_SET_LEVEL {
            return Err(BridgeError::UnknownMethod(envelope.method.clone()));
        }
        Ok(envelope.payload_as()?)
    }
}

#[cfg(test)]
#[path = "protocol/protocol_tests.rs"]
mod protocol_tests;
