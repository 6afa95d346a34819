//! Logger registry keyed by resource

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use logbridge_core::{
    BridgeError, BridgeResult, Emitter, GlobalLogService, LogLevel, Logger, LoggerBacking,
    LoggerLevelChange, LoggerOptions, LoggerRegistry, ResourceId, Subscription,
};
use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::Arc;

/// `tracing` target of records written by file-backed loggers
///
/// The process filter lets this target through at every level; the logger's
/// own effective level decides what reaches it.
pub(crate) const LOGGER_TARGET: &str = "logbridge::logger";

/// Lines a memory-backed logger retains; older lines are dropped first
pub const MEMORY_LOGGER_CAPACITY: usize = 10_000;

/// A logger owned by [`LoggerService`]
pub struct RegistryLogger {
    resource: ResourceId,
    options: LoggerOptions,
    global: Arc<dyn GlobalLogService>,
    level_override: RwLock<Option<LogLevel>>,
    lines: Mutex<VecDeque<String>>,
}

impl RegistryLogger {
    fn new(
        resource: ResourceId,
        options: LoggerOptions,
        global: Arc<dyn GlobalLogService>,
    ) -> Self {
        Self {
            level_override: RwLock::new(options.log_level),
            resource,
            options,
            global,
            lines: Mutex::new(VecDeque::new()),
        }
    }

    /// Options the logger was created with
    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    pub fn level_override(&self) -> Option<LogLevel> {
        *self.level_override.read()
    }

    /// Lines retained by a memory-backed logger, oldest first
    pub fn contents(&self) -> Vec<String> {
        self.lines.lock().iter().cloned().collect()
    }

    fn replace_override(&self, level: Option<LogLevel>) -> Option<LogLevel> {
        std::mem::replace(&mut *self.level_override.write(), level)
    }

    fn emit(&self, level: LogLevel, message: &str) {
        let resource = self.resource.to_string();
        match level {
            LogLevel::Trace => tracing::trace!(target: LOGGER_TARGET, %resource, "{message}"),
            LogLevel::Debug => tracing::debug!(target: LOGGER_TARGET, %resource, "{message}"),
            LogLevel::Info => tracing::info!(target: LOGGER_TARGET, %resource, "{message}"),
            LogLevel::Warn => tracing::warn!(target: LOGGER_TARGET, %resource, "{message}"),
            LogLevel::Error => tracing::error!(target: LOGGER_TARGET, %resource, "{message}"),
            LogLevel::Off => {}
        }
    }
}

impl Logger for RegistryLogger {
    fn resource(&self) -> &ResourceId {
        &self.resource
    }

    fn level(&self) -> LogLevel {
        self.level_override().unwrap_or_else(|| self.global.level())
    }

    fn log(&self, level: LogLevel, message: &str) {
        if !self.level().allows(level) {
            return;
        }
        match self.options.backing {
            LoggerBacking::File => self.emit(level, message),
            LoggerBacking::Memory => {
                let mut lines = self.lines.lock();
                if lines.len() == MEMORY_LOGGER_CAPACITY {
                    lines.pop_front();
                }
                lines.push_back(format!("[{level}] {message}"));
            }
        }
    }
}

/// User-visible record of a logger created through the normal path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerRegistration {
    pub resource: ResourceId,
    pub name: Option<String>,
    pub hidden: bool,
    pub extension_id: Option<String>,
}

/// Registry of loggers keyed by resource
///
/// Creation is idempotent: the first call for a resource decides the logger's
/// options and later calls get the same instance back.
pub struct LoggerService {
    global: Arc<dyn GlobalLogService>,
    loggers: DashMap<ResourceId, Arc<RegistryLogger>>,
    registrations: DashMap<ResourceId, LoggerRegistration>,
    on_did_change_log_level: Emitter<LoggerLevelChange>,
}

impl LoggerService {
    pub fn new(global: Arc<dyn GlobalLogService>) -> Self {
        Self {
            global,
            loggers: DashMap::new(),
            registrations: DashMap::new(),
            on_did_change_log_level: Emitter::new(),
        }
    }

    /// Concrete logger for `resource`
    pub fn get(&self, resource: &ResourceId) -> Option<Arc<RegistryLogger>> {
        self.loggers.get(resource).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }

    /// Effective level of the logger for `resource`
    pub fn log_level(&self, resource: &ResourceId) -> Option<LogLevel> {
        self.get(resource).map(|logger| logger.level())
    }

    /// Override the level of one logger
    ///
    /// Fires a level change when the override actually changes.
    pub fn set_log_level(&self, resource: &ResourceId, level: LogLevel) -> BridgeResult<()> {
        let logger = self.require(resource)?;
        if logger.replace_override(Some(level)) != Some(level) {
            self.fire_change(resource, level);
        }
        Ok(())
    }

    /// Drop the override so the logger follows the global level again
    pub fn reset_log_level(&self, resource: &ResourceId) -> BridgeResult<()> {
        let logger = self.require(resource)?;
        if logger.replace_override(None).is_some() {
            self.fire_change(resource, logger.level());
        }
        Ok(())
    }

    /// Loggers created without suppressed registration, ordered by resource
    pub fn registered_loggers(&self) -> Vec<LoggerRegistration> {
        let mut registrations: Vec<LoggerRegistration> = self
            .registrations
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        registrations.sort_by(|a, b| a.resource.cmp(&b.resource));
        registrations
    }

    fn require(&self, resource: &ResourceId) -> BridgeResult<Arc<RegistryLogger>> {
        self.get(resource).ok_or_else(|| BridgeError::LoggerNotFound {
            resource: resource.to_string(),
        })
    }

    fn fire_change(&self, resource: &ResourceId, level: LogLevel) {
        tracing::debug!(%resource, %level, "logger level changed");
        self.on_did_change_log_level.fire(&LoggerLevelChange {
            resource: resource.clone(),
            level,
        });
    }
}

#[async_trait]
impl LoggerRegistry for LoggerService {
    async fn create_logger(
        &self,
        resource: ResourceId,
        options: Option<LoggerOptions>,
        suppress_registration: bool,
    ) -> BridgeResult<Arc<dyn Logger>> {
        let options = options.unwrap_or_default();

        if !suppress_registration {
            self.registrations
                .entry(resource.clone())
                .or_insert_with(|| LoggerRegistration {
                    resource: resource.clone(),
                    name: options.name.clone(),
                    hidden: options.hidden,
                    extension_id: options.extension_id.clone(),
                });
        }

        let logger = match self.loggers.entry(resource) {
            Entry::Occupied(existing) => {
                if existing.get().options() != &options {
                    tracing::debug!(
                        resource = %existing.key(),
                        "logger already exists; keeping its original options"
                    );
                }
                existing.get().clone()
            }
            Entry::Vacant(vacant) => {
                tracing::debug!(resource = %vacant.key(), backing = ?options.backing, "creating logger");
                let logger = Arc::new(RegistryLogger::new(
                    vacant.key().clone(),
                    options,
                    self.global.clone(),
                ));
                vacant.insert(logger.clone());
                logger
            }
        };

        Ok(logger as Arc<dyn Logger>)
    }

    fn get_logger(&self, resource: &ResourceId) -> Option<Arc<dyn Logger>> {
        self.get(resource).map(|logger| logger as Arc<dyn Logger>)
    }

    fn on_did_change_log_level(
        &self,
        listener: Box<dyn Fn(&LoggerLevelChange) + Send + Sync>,
    ) -> Subscription {
        self.on_did_change_log_level.subscribe(listener)
    }
}

#[cfg(test)]
#[path = "logger_service/logger_service_tests.rs"]
mod logger_service_tests;
