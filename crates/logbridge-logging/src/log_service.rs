//! Process-wide log level

use crate::ReloadHandle;
use logbridge_core::{Emitter, GlobalLogService, LogLevel, Subscription};
use std::sync::atomic::{AtomicU8, Ordering};

/// Global log level of the main process
///
/// Listeners are notified only when the level actually changes. When built
/// with a [`ReloadHandle`], every change is also applied to the process
/// `tracing` filter.
pub struct LogService {
    level: AtomicU8,
    on_did_change_log_level: Emitter<LogLevel>,
    reload: Option<&'static ReloadHandle>,
}

impl LogService {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level: AtomicU8::new(level as u8),
            on_did_change_log_level: Emitter::new(),
            reload: None,
        }
    }

    /// Keep the process subscriber's filter in step with this service
    pub fn with_reload_handle(mut self, handle: &'static ReloadHandle) -> Self {
        self.reload = Some(handle);
        self
    }
}

impl Default for LogService {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl GlobalLogService for LogService {
    fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    fn set_level(&self, level: LogLevel) {
        let previous = LogLevel::from_u8(self.level.swap(level as u8, Ordering::SeqCst));
        if previous == level {
            return;
        }

        if let Some(reload) = self.reload
            && let Err(e) = reload.reload_level(level)
        {
            tracing::debug!(error = %e, "process log filter not updated");
        }

        tracing::debug!(from = %previous, to = %level, "global log level changed");
        self.on_did_change_log_level.fire(&level);
    }

    fn on_did_change_log_level(
        &self,
        listener: Box<dyn Fn(&LogLevel) + Send + Sync>,
    ) -> Subscription {
        self.on_did_change_log_level.subscribe(listener)
    }
}
