//! In-process outbound proxy backed by a tokio channel

use crate::{RequestEnvelope, SetLevelNotification};
use logbridge_core::{BridgeError, BridgeResult, ExtHostLogLevelProxy, LogLevel, ResourceId};
use tokio::sync::mpsc;

/// [`ExtHostLogLevelProxy`] that queues `$setLevel` envelopes on a channel
///
/// Sending never blocks. If the receiving side has gone away the notification
/// is logged and dropped.
#[derive(Debug, Clone)]
pub struct ChannelLogLevelProxy {
    sender: mpsc::UnboundedSender<RequestEnvelope>,
}

impl ChannelLogLevelProxy {
    pub fn new(sender: mpsc::UnboundedSender<RequestEnvelope>) -> Self {
        Self { sender }
    }

    /// Create a proxy together with the receiver the extension host reads from
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RequestEnvelope>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    fn deliver(&self, level: LogLevel, resource: Option<&ResourceId>) -> BridgeResult<()> {
        let envelope = SetLevelNotification::new(level, resource).to_envelope()?;
        self.sender.send(envelope).map_err(|_| {
            BridgeError::Transport("extension host channel closed".to_string())
        })
    }
}

impl ExtHostLogLevelProxy for ChannelLogLevelProxy {
    fn set_level(&self, level: LogLevel, resource: Option<ResourceId>) {
        if let Err(e) = self.deliver(level, resource.as_ref()) {
            tracing::warn!(
                %level,
                resource = ?resource.map(|r| r.to_string()),
                code = e.error_code(),
                error = %e,
                "dropping $setLevel notification"
            );
        }
    }
}
