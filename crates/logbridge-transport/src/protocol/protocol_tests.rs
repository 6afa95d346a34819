#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn log_file() -> UriComponents {
    UriComponents::new("file", "/logs/exthost/acme.tasks.log")
}

#[test]
fn MainThreadLoggerRequest___from_envelope___decodes_create_logger() {
    let envelope = RequestEnvelope::new(
        MAIN_THREAD_LOGGER,
        METHOD_CREATE_LOGGER,
        serde_json::json!({
            "file": {"scheme": "file", "path": "/logs/exthost/acme.tasks.log"},
            "options": {"name": "Tasks", "hidden": true}
        }),
    );

    let request = MainThreadLoggerRequest::from_envelope(&envelope).unwrap();

    match request {
        MainThreadLoggerRequest::CreateLogger(params) => {
            assert_eq!(params.file, log_file());
            let options = params.options.unwrap();
            assert_eq!(options.name.as_deref(), Some("Tasks"));
            assert!(options.hidden);
        }
        other => panic!("expected CreateLogger, got {other:?}"),
    }
}

#[test]
fn MainThreadLoggerRequest___from_envelope___decodes_log_batch_in_order() {
    let envelope = RequestEnvelope::new(
        MAIN_THREAD_LOGGER,
        METHOD_LOG,
        serde_json::json!({
            "file": {"scheme": "file", "path": "/logs/exthost/acme.tasks.log"},
            "messages": [["info", "a"], ["error", "b"], ["trace", "c"]]
        }),
    );

    let request = MainThreadLoggerRequest::from_envelope(&envelope).unwrap();

    assert_eq!(
        request,
        MainThreadLoggerRequest::log(
            log_file(),
            vec![
                LogRecord::new(LogLevel::Info, "a"),
                LogRecord::new(LogLevel::Error, "b"),
                LogRecord::new(LogLevel::Trace, "c"),
            ]
        )
    );
}

#[test]
fn MainThreadLoggerRequest___from_envelope___wrong_channel_fails() {
    let envelope = RequestEnvelope::new("Other", METHOD_LOG, serde_json::json!({}));

    let result = MainThreadLoggerRequest::from_envelope(&envelope);

    assert!(matches!(result, Err(BridgeError::UnknownChannel(c)) if c == "Other"));
}

#[test]
fn MainThreadLoggerRequest___from_envelope___unknown_method_fails() {
    let envelope = RequestEnvelope::new(MAIN_THREAD_LOGGER, "$dispose", serde_json::json!({}));

    let result = MainThreadLoggerRequest::from_envelope(&envelope);

    assert!(matches!(result, Err(BridgeError::UnknownMethod(m)) if m == "$dispose"));
}

#[test_case(serde_json::json!({}) ; "missing file")]
#[test_case(serde_json::json!({"file": {"scheme": "file"}}) ; "missing messages")]
#[test_case(serde_json::json!({"file": {"scheme": "file"}, "messages": [["loud", "x"]]}) ; "bad level")]
fn MainThreadLoggerRequest___from_envelope___malformed_log_payload_fails(payload: serde_json::Value) {
    let envelope = RequestEnvelope::new(MAIN_THREAD_LOGGER, METHOD_LOG, payload);

    let result = MainThreadLoggerRequest::from_envelope(&envelope);

    assert!(matches!(result, Err(BridgeError::Serialization(_))));
}

#[test]
fn MainThreadLoggerRequest___to_envelope___decodes_back() {
    let request = MainThreadLoggerRequest::create_logger(log_file(), None);

    let envelope = request.to_envelope().unwrap();

    assert_eq!(envelope.method, METHOD_CREATE_LOGGER);
    assert!(envelope.payload.get("options").is_none());
    assert_eq!(
        MainThreadLoggerRequest::from_envelope(&envelope).unwrap(),
        request
    );
}

#[test]
fn SetLevelNotification___global___omits_resource() {
    let envelope = SetLevelNotification::new(LogLevel::Debug, None)
        .to_envelope()
        .unwrap();

    assert_eq!(envelope.channel, EXT_HOST_LOG_LEVEL_SERVICE);
    assert_eq!(envelope.method, METHOD_SET_LEVEL);
    assert_eq!(envelope.payload, serde_json::json!({"level": "debug"}));
    assert!(envelope.is_notification());
}

#[test]
fn SetLevelNotification___per_logger___carries_components() {
    let id = ResourceId::revive(log_file()).unwrap();

    let notification = SetLevelNotification::new(LogLevel::Trace, Some(&id));
    let decoded =
        SetLevelNotification::from_envelope(&notification.to_envelope().unwrap()).unwrap();

    assert_eq!(decoded.level, LogLevel::Trace);
    assert_eq!(decoded.resource, Some(log_file()));
}

#[test]
fn SetLevelNotification___from_envelope___rejects_other_method() {
    let envelope = RequestEnvelope::new(EXT_HOST_LOG_LEVEL_SERVICE, "$log", serde_json::json!({}));

    let result = SetLevelNotification::from_envelope(&envelope);

    assert!(matches!(result, Err(BridgeError::UnknownMethod(_))));
}
