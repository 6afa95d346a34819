//! logbridge-runtime - Main-side logger bridge
//!
//! This crate provides:
//! - [`MainThreadLogger`], which creates and writes loggers on behalf of the
//!   extension host and relays level changes back to it
//! - [`RpcDispatcher`] for serving inbound envelopes on a tokio channel
//! - [`CommandsRegistry`] and the extension-test log level commands

mod bridge;
mod commands;
mod dispatch;

pub use bridge::{BridgeContext, MainThreadLogger};
pub use commands::{
    CommandHandler, CommandsRegistry, GET_LOG_LEVEL_COMMAND, SET_LOG_LEVEL_COMMAND,
    ServicesAccessor, get_log_level, register_extension_test_commands, set_log_level,
};
pub use dispatch::RpcDispatcher;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BridgeContext, CommandsRegistry, MainThreadLogger, RpcDispatcher, ServicesAccessor,
        register_extension_test_commands,
    };
}
