//! Routes inbound envelopes to the main-side logger

use logbridge_core::{BridgeResult, MainThreadLoggerShape};
use logbridge_transport::{
    Codec, JsonCodec, MainThreadLoggerRequest, RequestEnvelope, ResponseEnvelope,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Decodes `MainThreadLogger` envelopes and invokes the target
///
/// Envelopes are handled one at a time in arrival order, so calls for the
/// same logger are never reordered.
pub struct RpcDispatcher {
    target: Arc<dyn MainThreadLoggerShape>,
    codec: JsonCodec,
}

impl RpcDispatcher {
    pub fn new(target: Arc<dyn MainThreadLoggerShape>) -> Self {
        Self {
            target,
            codec: JsonCodec::new(),
        }
    }

    /// Handle one envelope and build its response
    ///
    /// The response echoes the request id; failures carry the error code.
    pub async fn handle(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        let result = self.invoke(envelope).await;
        if let Err(err) = &result {
            tracing::warn!(
                channel = %envelope.channel,
                method = %envelope.method,
                code = err.error_code(),
                error = %err,
                "request failed"
            );
        }
        ResponseEnvelope::from_result(result).with_request_id(envelope.request_id)
    }

    /// Handle a JSON-encoded envelope and return the encoded response
    pub async fn handle_bytes(&self, data: &[u8]) -> BridgeResult<Vec<u8>> {
        let envelope: RequestEnvelope = self.codec.decode(data)?;
        let response = self.handle(&envelope).await;
        Ok(self.codec.encode(&response)?)
    }

    /// Serve envelopes until the sender side closes
    ///
    /// Responses go to `responses` for envelopes carrying a request id;
    /// notifications are answered with nothing. Returns the number of
    /// envelopes handled.
    pub async fn serve(
        &self,
        mut requests: mpsc::UnboundedReceiver<RequestEnvelope>,
        responses: Option<mpsc::UnboundedSender<ResponseEnvelope>>,
    ) -> usize {
        let mut handled = 0;
        while let Some(envelope) = requests.recv().await {
            let response = self.handle(&envelope).await;
            handled += 1;

            if envelope.is_notification() {
                continue;
            }
            if let Some(tx) = &responses
                && tx.send(response).is_err()
            {
                tracing::debug!(request_id = ?envelope.request_id, "response receiver closed");
            }
        }
        tracing::debug!(handled, "request channel closed");
        handled
    }

    async fn invoke(&self, envelope: &RequestEnvelope) -> BridgeResult<Value> {
        match MainThreadLoggerRequest::from_envelope(envelope)? {
            MainThreadLoggerRequest::CreateLogger(params) => {
                self.target
                    .create_logger(params.file, params.options)
                    .await?;
            }
            MainThreadLoggerRequest::Log(params) => {
                self.target.log(params.file, params.messages)?;
            }
        }
        Ok(Value::Null)
    }
}
