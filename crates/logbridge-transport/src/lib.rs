//! logbridge-transport - JSON codec, envelopes, and wire protocol
//!
//! This crate provides:
//! - [`Codec`] trait for encoding/decoding messages
//! - [`JsonCodec`] implementation for JSON transport
//! - [`RequestEnvelope`] and [`ResponseEnvelope`] for message framing
//! - Typed messages for both directions of the logger protocol
//! - [`ChannelLogLevelProxy`], an in-process outbound proxy

mod codec;
mod envelope;
mod protocol;
mod proxy;

pub use codec::{Codec, CodecError, JsonCodec};
pub use envelope::{RequestEnvelope, ResponseEnvelope, ResponseStatus};
pub use protocol::{
    CreateLoggerParams, EXT_HOST_LOG_LEVEL_SERVICE, LogParams, MAIN_THREAD_LOGGER,
    MainThreadLoggerRequest, METHOD_CREATE_LOGGER, METHOD_LOG, METHOD_SET_LEVEL,
    SetLevelNotification,
};
pub use proxy::ChannelLogLevelProxy;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ChannelLogLevelProxy, Codec, CodecError, JsonCodec, MainThreadLoggerRequest,
        RequestEnvelope, ResponseEnvelope, ResponseStatus, SetLevelNotification,
    };
}
