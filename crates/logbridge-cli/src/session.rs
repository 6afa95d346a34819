//! A bridge wired to the default services, driven from the command line

use anyhow::{Context, Result};
use logbridge::{
    BridgeConfig, BridgeContext, ChannelLogLevelProxy, CommandsRegistry, GET_LOG_LEVEL_COMMAND,
    GlobalLogService, JsonCodec, LogService, LoggerService, MainThreadLogger, ReloadHandle,
    RequestEnvelope, ResponseEnvelope, RpcDispatcher, SET_LOG_LEVEL_COMMAND, ServicesAccessor,
    register_extension_test_commands,
};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Replay envelopes on this channel run a test-control command: the method
/// names the command and the payload holds its arguments.
pub const COMMANDS_CHANNEL: &str = "commands";

/// Load a TOML config file, or the defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig> {
    let Some(path) = path else {
        return Ok(BridgeConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    BridgeConfig::from_toml(&text)
        .with_context(|| format!("Invalid config: {}", path.display()))
}

pub struct Session {
    log_service: Arc<LogService>,
    loggers: Arc<LoggerService>,
    dispatcher: RpcDispatcher,
    commands: CommandsRegistry,
    accessor: ServicesAccessor,
    outbound: mpsc::UnboundedReceiver<RequestEnvelope>,
    codec: JsonCodec,
}

impl Session {
    pub fn new(config: BridgeConfig) -> Self {
        let log_service = Arc::new(
            LogService::new(config.initial_level()).with_reload_handle(ReloadHandle::global()),
        );
        let loggers = Arc::new(LoggerService::new(log_service.clone()));
        let (proxy, outbound) = ChannelLogLevelProxy::channel();
        let bridge = Arc::new(MainThreadLogger::new(
            BridgeContext::new(log_service.clone(), loggers.clone()),
            Arc::new(proxy),
        ));

        let commands = CommandsRegistry::new();
        register_extension_test_commands(&commands);
        let accessor = ServicesAccessor::new(log_service.clone(), Arc::new(config));

        Self {
            log_service,
            loggers,
            dispatcher: RpcDispatcher::new(bridge),
            commands,
            accessor,
            outbound,
            codec: JsonCodec::new(),
        }
    }

    /// Run every envelope in a newline-delimited script
    ///
    /// Returns the output as JSON lines: the response to each envelope with a
    /// request id, followed by any `$setLevel` notifications it caused.
    pub async fn replay(&mut self, script: &str) -> Result<Vec<String>> {
        let envelopes: Vec<RequestEnvelope> = self
            .codec
            .decode_lines(script)
            .context("Invalid replay script")?;

        let mut output = Vec::new();
        for envelope in &envelopes {
            let response = self.handle(envelope).await;
            if !envelope.is_notification() {
                output.push(self.codec.encode_string(&response)?);
            }
            for notification in self.drain_notifications() {
                output.push(self.codec.encode_string(&notification)?);
            }
        }

        tracing::info!(
            envelopes = envelopes.len(),
            loggers = self.loggers.len(),
            level = %self.log_service.level(),
            "replay finished"
        );
        Ok(output)
    }

    /// Run `_extensionTests.setLogLevel`, then report the level it left behind
    pub fn set_log_level(&self, name: &str) -> Result<String> {
        self.commands.execute(
            SET_LOG_LEVEL_COMMAND,
            &self.accessor,
            &[Value::String(name.to_string())],
        )?;
        self.get_log_level()
    }

    /// Run `_extensionTests.getLogLevel`
    pub fn get_log_level(&self) -> Result<String> {
        match self
            .commands
            .execute(GET_LOG_LEVEL_COMMAND, &self.accessor, &[])?
        {
            Value::String(level) => Ok(level),
            other => anyhow::bail!("Unexpected getLogLevel result: {other}"),
        }
    }

    async fn handle(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        if envelope.channel != COMMANDS_CHANNEL {
            return self.dispatcher.handle(envelope).await;
        }

        let args = match &envelope.payload {
            Value::Array(args) => args.clone(),
            Value::Null => Vec::new(),
            other => vec![other.clone()],
        };
        let result = self
            .commands
            .execute(&envelope.method, &self.accessor, &args);
        if let Err(e) = &result {
            tracing::warn!(command = %envelope.method, error = %e, "command failed");
        }
        ResponseEnvelope::from_result(result).with_request_id(envelope.request_id)
    }

    fn drain_notifications(&mut self) -> Vec<RequestEnvelope> {
        let mut drained = Vec::new();
        while let Ok(envelope) = self.outbound.try_recv() {
            drained.push(envelope);
        }
        drained
    }
}

#[cfg(test)]
#[path = "session/session_tests.rs"]
mod session_tests;
