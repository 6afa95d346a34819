//! logbridge-core - Core types, service contracts, and event plumbing
//!
//! This crate provides the foundational types shared by both sides of the bridge:
//! - [`LogLevel`], [`LogRecord`] and [`LoggerOptions`] for the data model
//! - [`ResourceId`] and its wire shape [`UriComponents`]
//! - [`Emitter`], [`Subscription`] and [`DisposableStore`] for event wiring
//! - The service traits the bridge consumes ([`LoggerRegistry`], [`GlobalLogService`], ...)
//! - [`BridgeError`] for error handling
//! - [`BridgeConfig`] for configuration

mod config;
mod error;
mod event;
mod record;
mod resource;
mod services;

pub use config::BridgeConfig;
pub use error::{BridgeError, BridgeResult};
pub use event::{DisposableStore, Emitter, Subscription};
pub use record::{LogRecord, LoggerBacking, LoggerOptions};
pub use resource::{ResourceId, UriComponents};
pub use services::{
    EnvironmentService, ExtHostLogLevelProxy, GlobalLogService, Logger, LoggerLevelChange,
    LoggerRegistry, MainThreadLoggerShape,
};

use serde::{Deserialize, Serialize};

/// Log levels, ordered from most to least verbose
///
/// A record at level `L` passes a threshold `T` when `L >= T`. `Off` as a
/// threshold silences everything; `Off` is never a valid record level.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }

    /// Parse a level name, ignoring case
    ///
    /// Only recognized names are accepted; `critical` is an alias for `error`
    /// and `warning` for `warn`. Returns `None` for anything else.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" | "critical" => Some(LogLevel::Error),
            "off" => Some(LogLevel::Off),
            _ => None,
        }
    }

    /// Canonical lowercase name, the inverse of [`LogLevel::parse`]
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    /// Whether a record at `level` passes this threshold
    pub fn allows(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= *self
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = BridgeError;

    /// Strict counterpart of [`LogLevel::parse`]
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        LogLevel::parse(name).ok_or_else(|| BridgeError::InvalidLogLevel(name.to_string()))
    }
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BridgeConfig, BridgeError, BridgeResult, DisposableStore, Emitter, EnvironmentService,
        ExtHostLogLevelProxy, GlobalLogService, LogLevel, LogRecord, Logger, LoggerLevelChange,
        LoggerOptions, LoggerRegistry, MainThreadLoggerShape, ResourceId, Subscription,
        UriComponents,
    };
}
