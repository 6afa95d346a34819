//! # logbridge
//!
//! Logging bridge between a main process and an extension host.
//!
//! The extension host asks the main process to create loggers and sends it
//! batches of records; the main process tells the extension host whenever a
//! log level changes, globally or for one logger.
//!
//! ## Wiring a bridge
//!
//! ```
//! use logbridge::prelude::*;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> BridgeResult<()> {
//! let log_service = Arc::new(LogService::new(LogLevel::Info));
//! let loggers = Arc::new(LoggerService::new(log_service.clone()));
//! let (proxy, mut outbound) = ChannelLogLevelProxy::channel();
//!
//! let bridge = MainThreadLogger::new(
//!     BridgeContext::new(log_service.clone(), loggers.clone()),
//!     Arc::new(proxy),
//! );
//!
//! let file = UriComponents::new("file", "/logs/exthost/tasks.log");
//! bridge.create_logger(file.clone(), None).await?;
//! bridge.log(file, vec![LogRecord::new(LogLevel::Info, "started")])?;
//!
//! log_service.set_level(LogLevel::Debug);
//! let notification = SetLevelNotification::from_envelope(&outbound.recv().await.unwrap())?;
//! assert_eq!(notification.level, LogLevel::Debug);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`logbridge_core`] - Data model, errors, events, and service traits
//! - [`logbridge_transport`] - Codec, envelopes, and the wire protocol
//! - [`logbridge_logging`] - The main-side log level and logger registry
//! - [`logbridge_runtime`] - The bridge, RPC dispatcher, and test commands

// Re-export core types
pub use logbridge_core::{
    BridgeConfig, BridgeError, BridgeResult, DisposableStore, Emitter, EnvironmentService,
    ExtHostLogLevelProxy, GlobalLogService, LogLevel, LogRecord, Logger, LoggerBacking,
    LoggerLevelChange, LoggerOptions, LoggerRegistry, MainThreadLoggerShape, ResourceId,
    Subscription, UriComponents,
};

// Re-export transport types
pub use logbridge_transport::{
    ChannelLogLevelProxy, Codec, CodecError, JsonCodec, MainThreadLoggerRequest, RequestEnvelope,
    ResponseEnvelope, ResponseStatus, SetLevelNotification,
};

// Re-export the logging subsystem
pub use logbridge_logging::{
    LogService, LoggerRegistration, LoggerService, RegistryLogger, ReloadHandle, init_logging,
};

// Re-export the bridge
pub use logbridge_runtime::{
    BridgeContext, CommandHandler, CommandsRegistry, GET_LOG_LEVEL_COMMAND, MainThreadLogger,
    RpcDispatcher, SET_LOG_LEVEL_COMMAND, ServicesAccessor, get_log_level,
    register_extension_test_commands, set_log_level,
};

/// Wire protocol constants
pub mod protocol {
    pub use logbridge_transport::{
        CreateLoggerParams, EXT_HOST_LOG_LEVEL_SERVICE, LogParams, MAIN_THREAD_LOGGER,
        METHOD_CREATE_LOGGER, METHOD_LOG, METHOD_SET_LEVEL,
    };
}

// Re-export common dependencies that embedders need
pub use async_trait::async_trait;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use logbridge::prelude::*;` to import commonly used types.
///
/// This includes:
/// - Service traits: `GlobalLogService`, `LoggerRegistry`, `MainThreadLoggerShape`
/// - The bridge and its context: `MainThreadLogger`, `BridgeContext`
/// - The default services: `LogService`, `LoggerService`
/// - Wire types: `UriComponents`, `LogRecord`, `SetLevelNotification`
pub mod prelude {
    pub use crate::{
        BridgeConfig, BridgeContext, BridgeError, BridgeResult, ChannelLogLevelProxy,
        CommandsRegistry, GlobalLogService, LogLevel, LogRecord, LogService, LoggerOptions,
        LoggerRegistry, LoggerService, MainThreadLogger, MainThreadLoggerShape, ResourceId,
        RpcDispatcher, ServicesAccessor, SetLevelNotification, UriComponents, async_trait,
    };

    pub use serde::{Deserialize, Serialize};
}
