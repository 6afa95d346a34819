#![allow(non_snake_case)]

use super::*;
use logbridge::{ResourceId, SetLevelNotification};
use std::io::Write;

fn tests_running() -> BridgeConfig {
    BridgeConfig::new().with_extension_tests(ResourceId::file("/work/ext/test").unwrap())
}

fn parse(line: &str) -> Value {
    serde_json::from_str(line).unwrap()
}

// load_config tests

#[test]
fn load_config___no_path___defaults() {
    let config = load_config(None).unwrap();

    assert_eq!(config.log_level, "info");
    assert!(!config.extension_development);
}

#[test]
fn load_config___toml_file___parsed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "log_level = \"warn\"\nextension_development = true\nextension_tests_location = \"file:///work/ext/test\""
    )
    .unwrap();

    let config = load_config(Some(file.path())).unwrap();

    assert_eq!(config.log_level, "warn");
    assert!(config.extension_development);
    assert!(config.extension_tests_location.is_some());
}

#[test]
fn load_config___missing_file___fails_with_path() {
    let err = load_config(Some(Path::new("/nonexistent/logbridge.toml"))).unwrap_err();

    assert!(err.to_string().contains("/nonexistent/logbridge.toml"));
}

// replay tests

#[tokio::test]
async fn Session___replay___answers_requests_and_skips_notifications() {
    let mut session = Session::new(BridgeConfig::default());
    let script = r#"
{"channel":"MainThreadLogger","method":"$createLogger","payload":{"file":{"scheme":"file","path":"/logs/a.log"}},"request_id":1}
{"channel":"MainThreadLogger","method":"$log","payload":{"file":{"scheme":"file","path":"/logs/a.log"},"messages":[["info","hello"]]}}
{"channel":"MainThreadLogger","method":"$log","payload":{"file":{"scheme":"file","path":"/logs/b.log"},"messages":[]},"request_id":2}
"#;

    let output = session.replay(script).await.unwrap();

    assert_eq!(output.len(), 2);
    let first = parse(&output[0]);
    assert_eq!(first["status"], "success");
    assert_eq!(first["request_id"], 1);
    let second = parse(&output[1]);
    assert_eq!(second["status"], "error");
    assert_eq!(second["error_code"], 1);
    assert_eq!(second["request_id"], 2);
}

#[tokio::test]
async fn Session___replay___command_prints_response_then_notification() {
    let mut session = Session::new(tests_running());
    let script = r#"{"channel":"commands","method":"_extensionTests.setLogLevel","payload":["debug"],"request_id":5}"#;

    let output = session.replay(script).await.unwrap();

    assert_eq!(output.len(), 2);
    assert_eq!(parse(&output[0])["request_id"], 5);
    let envelope: RequestEnvelope = serde_json::from_str(&output[1]).unwrap();
    let notification = SetLevelNotification::from_envelope(&envelope).unwrap();
    assert_eq!(notification, SetLevelNotification::new(logbridge::LogLevel::Debug, None));
}

#[tokio::test]
async fn Session___replay___unknown_command_is_error_response() {
    let mut session = Session::new(tests_running());
    let script = r#"{"channel":"commands","method":"_extensionTests.nothing","request_id":9}"#;

    let output = session.replay(script).await.unwrap();

    assert_eq!(output.len(), 1);
    assert_eq!(parse(&output[0])["error_code"], 6);
}

#[tokio::test]
async fn Session___replay___invalid_line_fails() {
    let mut session = Session::new(BridgeConfig::default());

    let result = session.replay("{\"channel\":\"MainThreadLogger\"}\nnot json\n").await;

    assert!(result.is_err());
}

#[tokio::test]
async fn Session___replay___empty_script_prints_nothing() {
    let mut session = Session::new(BridgeConfig::default());

    assert!(session.replay("\n\n").await.unwrap().is_empty());
}

// level command tests

#[test]
fn Session___get_log_level___reports_configured_level() {
    let config = BridgeConfig::from_json(br#"{"log_level":"error"}"#).unwrap();
    let session = Session::new(config);

    assert_eq!(session.get_log_level().unwrap(), "error");
}

#[test]
fn Session___set_log_level___applies_under_extension_tests() {
    let session = Session::new(tests_running());

    assert_eq!(session.set_log_level("Trace").unwrap(), "trace");
}

#[test]
fn Session___set_log_level___ignored_outside_extension_tests() {
    let session = Session::new(BridgeConfig::default());

    assert_eq!(session.set_log_level("trace").unwrap(), "info");
}

#[test]
fn Session___set_log_level___unknown_name_keeps_level() {
    let session = Session::new(tests_running());

    assert_eq!(session.set_log_level("loud").unwrap(), "info");
}
