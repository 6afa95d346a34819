//! Log records and logger creation options

use crate::LogLevel;
use serde::{Deserialize, Serialize};

/// A single message destined for one logger
///
/// Serialized as the two-element array `[level, message]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(LogLevel, String)", into = "(LogLevel, String)")]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl From<(LogLevel, String)> for LogRecord {
    fn from((level, message): (LogLevel, String)) -> Self {
        Self { level, message }
    }
}

impl From<LogRecord> for (LogLevel, String) {
    fn from(record: LogRecord) -> Self {
        (record.level, record.message)
    }
}

/// Where a logger's records end up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoggerBacking {
    /// Forwarded to the process log subscriber
    #[default]
    File,
    /// Retained in memory only
    Memory,
}

/// Options for creating a logger
///
/// Interpretation belongs to the logger registry; the bridge forwards them as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggerOptions {
    /// Identifier used for registration, independent of the resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human-readable name shown to users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Hide the logger from user-facing listings
    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub backing: LoggerBacking,

    /// Initial per-logger level override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,

    /// Extension that owns the logger
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_id: Option<String>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_backing(mut self, backing: LoggerBacking) -> Self {
        self.backing = backing;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn with_extension_id(mut self, extension_id: impl Into<String>) -> Self {
        self.extension_id = Some(extension_id.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}
