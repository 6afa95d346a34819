//! logbridge-logging - Main-side logging subsystem
//!
//! This crate provides:
//! - [`LogService`], the process-wide log level
//! - [`LoggerService`], the registry of loggers keyed by resource
//! - [`RegistryLogger`], the loggers it hands out
//! - [`init_logging`] and [`ReloadHandle`] for the process `tracing` subscriber

mod init;
mod log_service;
mod logger_service;
mod reload;

pub use init::init_logging;
pub use log_service::LogService;
pub use logger_service::{
    LoggerRegistration, LoggerService, MEMORY_LOGGER_CAPACITY, RegistryLogger,
};
pub use logbridge_core::LogLevel;
pub use reload::ReloadHandle;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, LogService, LoggerService, RegistryLogger, init_logging};
}
