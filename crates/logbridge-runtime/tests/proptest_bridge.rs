//! Property-based tests for the bridge
//!
//! Whatever batch the extension host sends, the logger sees exactly those
//! records in that order.

use logbridge_core::{
    LogLevel, LogRecord, LoggerBacking, LoggerOptions, MainThreadLoggerShape, ResourceId,
    UriComponents,
};
use logbridge_logging::{LogService, LoggerService};
use logbridge_runtime::{BridgeContext, MainThreadLogger};
use logbridge_transport::ChannelLogLevelProxy;
use proptest::prelude::*;
use std::sync::Arc;

fn arb_record() -> impl Strategy<Value = LogRecord> {
    ((0u8..=4).prop_map(LogLevel::from_u8), "[a-zA-Z0-9 ]{0,24}")
        .prop_map(|(level, message)| LogRecord::new(level, message))
}

fn arb_file() -> impl Strategy<Value = UriComponents> {
    "(/[a-z0-9._-]{1,8}){1,4}".prop_map(|path| UriComponents::new("file", path))
}

proptest! {
    /// Property: create then log applies every record in order
    #[test]
    fn proptest_records_applied_in_order(
        file in arb_file(),
        batches in prop::collection::vec(prop::collection::vec(arb_record(), 0..8), 1..4),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        let log_service = Arc::new(LogService::new(LogLevel::Trace));
        let registry = Arc::new(LoggerService::new(log_service.clone()));
        let (proxy, _outbound) = ChannelLogLevelProxy::channel();
        let bridge = MainThreadLogger::new(
            BridgeContext::new(log_service, registry.clone()),
            Arc::new(proxy),
        );

        let options = LoggerOptions::new().with_backing(LoggerBacking::Memory);
        rt.block_on(bridge.create_logger(file.clone(), Some(options)))
            .expect("create");
        for batch in &batches {
            bridge.log(file.clone(), batch.clone()).expect("log");
        }

        let expected: Vec<String> = batches
            .iter()
            .flatten()
            .map(|r| format!("[{}] {}", r.level, r.message))
            .collect();
        let id = ResourceId::revive(file).expect("valid");
        prop_assert_eq!(registry.get(&id).expect("logger").contents(), expected);
    }

    /// Property: logging to a never-created resource always fails
    #[test]
    fn proptest_log_before_create_fails(
        file in arb_file(),
        records in prop::collection::vec(arb_record(), 0..8),
    ) {
        let log_service = Arc::new(LogService::new(LogLevel::Trace));
        let registry = Arc::new(LoggerService::new(log_service.clone()));
        let (proxy, _outbound) = ChannelLogLevelProxy::channel();
        let bridge = MainThreadLogger::new(
            BridgeContext::new(log_service, registry.clone()),
            Arc::new(proxy),
        );

        prop_assert!(bridge.log(file, records).is_err());
        prop_assert!(registry.is_empty());
    }
}
