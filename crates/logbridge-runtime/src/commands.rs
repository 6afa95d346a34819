//! Test-control commands for the global log level

use dashmap::DashMap;
use logbridge_core::{BridgeError, BridgeResult, EnvironmentService, GlobalLogService, LogLevel};
use serde_json::Value;
use std::sync::Arc;

pub const SET_LOG_LEVEL_COMMAND: &str = "_extensionTests.setLogLevel";
pub const GET_LOG_LEVEL_COMMAND: &str = "_extensionTests.getLogLevel";

/// Services a command handler may use
#[derive(Clone)]
pub struct ServicesAccessor {
    pub log_service: Arc<dyn GlobalLogService>,
    pub environment: Arc<dyn EnvironmentService>,
}

impl ServicesAccessor {
    pub fn new(
        log_service: Arc<dyn GlobalLogService>,
        environment: Arc<dyn EnvironmentService>,
    ) -> Self {
        Self {
            log_service,
            environment,
        }
    }

    fn extension_tests_running(&self) -> bool {
        self.environment.is_extension_development()
            && self.environment.extension_tests_location().is_some()
    }
}

/// Set the global level from a level name
///
/// Does nothing unless extension tests are running, or when `name` is not a
/// known level.
pub fn set_log_level(accessor: &ServicesAccessor, name: &str) {
    if !accessor.extension_tests_running() {
        tracing::debug!(name, "ignoring setLogLevel outside extension tests");
        return;
    }
    let Some(level) = LogLevel::parse(name) else {
        tracing::debug!(name, "ignoring setLogLevel with unknown level");
        return;
    };
    accessor.log_service.set_level(level);
}

/// Canonical name of the current global level
pub fn get_log_level(accessor: &ServicesAccessor) -> String {
    accessor.log_service.level().as_str().to_string()
}

pub type CommandHandler =
    Arc<dyn Fn(&ServicesAccessor, &[Value]) -> BridgeResult<Value> + Send + Sync>;

/// In-process table of named commands
#[derive(Default)]
pub struct CommandsRegistry {
    commands: DashMap<String, CommandHandler>,
}

impl CommandsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `id`, replacing any previous handler
    pub fn register_command<F>(&self, id: impl Into<String>, handler: F)
    where
        F: Fn(&ServicesAccessor, &[Value]) -> BridgeResult<Value> + Send + Sync + 'static,
    {
        let id = id.into();
        tracing::debug!(command = %id, "registering command");
        self.commands.insert(id, Arc::new(handler));
    }

    /// Remove the handler for `id`; returns whether one was registered
    pub fn unregister(&self, id: &str) -> bool {
        self.commands.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.commands.contains_key(id)
    }

    /// Registered command ids, sorted
    pub fn commands(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.commands.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn execute(
        &self,
        id: &str,
        accessor: &ServicesAccessor,
        args: &[Value],
    ) -> BridgeResult<Value> {
        let handler = self
            .commands
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| BridgeError::UnknownCommand(id.to_string()))?;
        handler(accessor, args)
    }
}

/// Install the `_extensionTests` log level commands
pub fn register_extension_test_commands(registry: &CommandsRegistry) {
    registry.register_command(SET_LOG_LEVEL_COMMAND, |accessor, args| {
        let name = match args.first() {
            Some(Value::String(name)) => name,
            other => {
                return Err(BridgeError::InvalidArgument(format!(
                    "{SET_LOG_LEVEL_COMMAND} expects a level name, got {}",
                    other.map_or_else(|| "nothing".to_string(), Value::to_string)
                )));
            }
        };
        set_log_level(accessor, name);
        Ok(Value::Null)
    });

    registry.register_command(GET_LOG_LEVEL_COMMAND, |accessor, _args| {
        Ok(Value::String(get_log_level(accessor)))
    });
}
