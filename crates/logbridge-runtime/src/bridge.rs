//! Main-side end of the logger protocol

use async_trait::async_trait;
use logbridge_core::{
    BridgeError, BridgeResult, DisposableStore, ExtHostLogLevelProxy, GlobalLogService,
    LogRecord, LoggerOptions, LoggerRegistry, MainThreadLoggerShape, ResourceId, UriComponents,
};
use std::sync::Arc;

/// Services the bridge is built from
#[derive(Clone)]
pub struct BridgeContext {
    pub log_service: Arc<dyn GlobalLogService>,
    pub logger_registry: Arc<dyn LoggerRegistry>,
}

impl BridgeContext {
    pub fn new(
        log_service: Arc<dyn GlobalLogService>,
        logger_registry: Arc<dyn LoggerRegistry>,
    ) -> Self {
        Self {
            log_service,
            logger_registry,
        }
    }
}

/// Creates and writes loggers for the extension host, and keeps its view of
/// log levels current
///
/// Level relays are installed on construction and released by
/// [`MainThreadLogger::dispose`] (or drop). Each local level change produces
/// exactly one `$setLevel` on the proxy, in the order observed.
pub struct MainThreadLogger {
    logger_registry: Arc<dyn LoggerRegistry>,
    disposables: DisposableStore,
}

impl MainThreadLogger {
    pub fn new(context: BridgeContext, proxy: Arc<dyn ExtHostLogLevelProxy>) -> Self {
        let disposables = DisposableStore::new();

        let global_proxy = proxy.clone();
        disposables.add(
            context
                .log_service
                .on_did_change_log_level(Box::new(move |level| {
                    tracing::debug!(%level, "relaying global log level");
                    global_proxy.set_level(*level, None);
                })),
        );

        disposables.add(
            context
                .logger_registry
                .on_did_change_log_level(Box::new(move |change| {
                    tracing::debug!(resource = %change.resource, level = %change.level, "relaying logger level");
                    proxy.set_level(change.level, Some(change.resource.clone()));
                })),
        );

        Self {
            logger_registry: context.logger_registry,
            disposables,
        }
    }

    /// Release the level relays; later calls do nothing
    pub fn dispose(&self) {
        if self.disposables.dispose() {
            tracing::debug!("logger bridge disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposables.is_disposed()
    }
}

#[async_trait]
impl MainThreadLoggerShape for MainThreadLogger {
    async fn create_logger(
        &self,
        file: UriComponents,
        options: Option<LoggerOptions>,
    ) -> BridgeResult<()> {
        let resource = ResourceId::revive(file)?;
        // The extension host registers its loggers itself
        self.logger_registry
            .create_logger(resource, options, true)
            .await?;
        Ok(())
    }

    fn log(&self, file: UriComponents, messages: Vec<LogRecord>) -> BridgeResult<()> {
        let resource = ResourceId::revive(file)?;
        let Some(logger) = self.logger_registry.get_logger(&resource) else {
            tracing::error!(%resource, dropped = messages.len(), "log received before the logger was created");
            return Err(BridgeError::LoggerNotFound {
                resource: resource.to_string(),
            });
        };

        for record in messages {
            logger.log(record.level, &record.message);
        }
        Ok(())
    }
}

impl Drop for MainThreadLogger {
    fn drop(&mut self) {
        self.dispose();
    }
}
