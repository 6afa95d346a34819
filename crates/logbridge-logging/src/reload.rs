//! Dynamic log level reloading support

use crate::logger_service::LOGGER_TARGET;
use logbridge_core::{BridgeError, BridgeResult, LogLevel};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::reload;

type FilterHandle = reload::Handle<Targets, tracing_subscriber::Registry>;

/// Handle for swapping the level filter of the process subscriber
pub struct ReloadHandle {
    handle: Mutex<Option<FilterHandle>>,
}

impl ReloadHandle {
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }

    /// Get the global reload handle
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    /// Set the reload handle (called by [`crate::init_logging`])
    pub fn set_handle(&self, handle: FilterHandle) {
        *self.handle.lock() = Some(handle);
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.lock().is_some()
    }

    /// Reload the filter to use a new log level
    pub fn reload_level(&self, level: LogLevel) -> BridgeResult<()> {
        let guard = self.handle.lock();
        let handle = guard
            .as_ref()
            .ok_or_else(|| BridgeError::Internal("reload handle not initialized".to_string()))?;
        handle
            .reload(process_filter(level))
            .map_err(|e| BridgeError::Internal(format!("failed to reload filter: {e}")))
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Process filter for a global level
///
/// Records from file-backed loggers pass at every level: they were already
/// filtered against the logger's effective level, which may be more verbose
/// than the global one.
pub(crate) fn process_filter(level: LogLevel) -> Targets {
    Targets::new()
        .with_default(level_filter(level))
        .with_target(LOGGER_TARGET, LevelFilter::TRACE)
}

/// Convert a bridge level into a `tracing` filter
pub(crate) fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}
