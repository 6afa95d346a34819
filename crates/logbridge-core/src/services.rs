//! Service contracts shared by the bridge and its collaborators

use crate::{
    BridgeResult, LogLevel, LogRecord, LoggerOptions, ResourceId, Subscription, UriComponents,
};
use async_trait::async_trait;
use std::sync::Arc;

/// A named sink bound to one resource
pub trait Logger: Send + Sync {
    /// Resource this logger is registered under
    fn resource(&self) -> &ResourceId;

    /// Effective threshold: the per-logger override, or the global level
    fn level(&self) -> LogLevel;

    /// Write one message; records below [`Logger::level`] are discarded
    fn log(&self, level: LogLevel, message: &str);
}

/// Payload of a per-logger level change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerLevelChange {
    pub resource: ResourceId,
    pub level: LogLevel,
}

/// Owner of logger instances keyed by resource
#[async_trait]
pub trait LoggerRegistry: Send + Sync {
    /// Create the logger for `resource`, or return the existing one
    ///
    /// `suppress_registration` keeps the logger out of the user-visible
    /// registrations; it is set when creation is requested on behalf of a
    /// remote process.
    async fn create_logger(
        &self,
        resource: ResourceId,
        options: Option<LoggerOptions>,
        suppress_registration: bool,
    ) -> BridgeResult<Arc<dyn Logger>>;

    fn get_logger(&self, resource: &ResourceId) -> Option<Arc<dyn Logger>>;

    fn on_did_change_log_level(
        &self,
        listener: Box<dyn Fn(&LoggerLevelChange) + Send + Sync>,
    ) -> Subscription;
}

/// Process-wide log level
pub trait GlobalLogService: Send + Sync {
    fn level(&self) -> LogLevel;

    fn set_level(&self, level: LogLevel);

    fn on_did_change_log_level(
        &self,
        listener: Box<dyn Fn(&LogLevel) + Send + Sync>,
    ) -> Subscription;
}

/// The parts of process environment the test-control commands consult
pub trait EnvironmentService: Send + Sync {
    fn is_extension_development(&self) -> bool;

    fn extension_tests_location(&self) -> Option<&ResourceId>;
}

/// Outbound calls from the main side to the extension host
///
/// Notifications are one-way: implementations deal with delivery failures
/// themselves and never report them to the caller.
pub trait ExtHostLogLevelProxy: Send + Sync {
    /// `resource == None` addresses the global level
    fn set_level(&self, level: LogLevel, resource: Option<ResourceId>);
}

/// Inbound calls from the extension host to the main side
#[async_trait]
pub trait MainThreadLoggerShape: Send + Sync {
    async fn create_logger(
        &self,
        file: UriComponents,
        options: Option<LoggerOptions>,
    ) -> BridgeResult<()>;

    fn log(&self, file: UriComponents, messages: Vec<LogRecord>) -> BridgeResult<()>;
}
