#![allow(non_snake_case)]

use super::*;
use crate::LogService;

fn services(level: LogLevel) -> (Arc<LogService>, LoggerService) {
    let global = Arc::new(LogService::new(level));
    let registry = LoggerService::new(global.clone());
    (global, registry)
}

fn resource(path: &str) -> ResourceId {
    ResourceId::file(path).unwrap()
}

fn memory() -> Option<LoggerOptions> {
    Some(LoggerOptions::new().with_backing(LoggerBacking::Memory))
}

fn record_changes(registry: &LoggerService) -> (Arc<Mutex<Vec<LoggerLevelChange>>>, Subscription) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let sub = registry
        .on_did_change_log_level(Box::new(move |change| sink.lock().push(change.clone())));
    (seen, sub)
}

// create_logger tests

#[tokio::test]
async fn LoggerService___create_logger___makes_logger_lookupable() {
    let (_global, registry) = services(LogLevel::Info);
    let id = resource("/logs/a.log");

    registry.create_logger(id.clone(), None, true).await.unwrap();

    let logger = registry.get_logger(&id).unwrap();
    assert_eq!(logger.resource(), &id);
}

#[tokio::test]
async fn LoggerService___create_logger___twice_returns_same_instance() {
    let (_global, registry) = services(LogLevel::Info);
    let id = resource("/logs/a.log");

    let first = registry.create_logger(id.clone(), memory(), true).await.unwrap();
    let second = registry.create_logger(id.clone(), memory(), true).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn LoggerService___create_logger___different_options_keep_first() {
    let (_global, registry) = services(LogLevel::Info);
    let id = resource("/logs/a.log");

    registry
        .create_logger(id.clone(), Some(LoggerOptions::new().with_name("First")), true)
        .await
        .unwrap();
    registry
        .create_logger(id.clone(), Some(LoggerOptions::new().with_name("Second")), true)
        .await
        .unwrap();

    let logger = registry.get(&id).unwrap();
    assert_eq!(logger.options().name.as_deref(), Some("First"));
}

#[tokio::test]
async fn LoggerService___create_logger___suppressed_is_not_registered() {
    let (_global, registry) = services(LogLevel::Info);

    registry
        .create_logger(resource("/logs/a.log"), None, true)
        .await
        .unwrap();

    assert!(registry.registered_loggers().is_empty());
}

#[tokio::test]
async fn LoggerService___create_logger___unsuppressed_is_registered_with_metadata() {
    let (_global, registry) = services(LogLevel::Info);
    let options = LoggerOptions::new()
        .with_name("Git")
        .with_extension_id("vscode.git")
        .hidden();

    registry
        .create_logger(resource("/logs/git.log"), Some(options), false)
        .await
        .unwrap();

    let registrations = registry.registered_loggers();
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0].name.as_deref(), Some("Git"));
    assert_eq!(registrations[0].extension_id.as_deref(), Some("vscode.git"));
    assert!(registrations[0].hidden);
}

#[tokio::test]
async fn LoggerService___create_logger___initial_override_from_options() {
    let (_global, registry) = services(LogLevel::Info);
    let id = resource("/logs/a.log");

    registry
        .create_logger(id.clone(), Some(LoggerOptions::new().with_log_level(LogLevel::Trace)), true)
        .await
        .unwrap();

    assert_eq!(registry.log_level(&id), Some(LogLevel::Trace));
}

// lookup tests

#[test]
fn LoggerService___get_logger___unknown_resource_is_none() {
    let (_global, registry) = services(LogLevel::Info);

    assert!(registry.get_logger(&resource("/logs/none.log")).is_none());
    assert!(registry.is_empty());
}

// RegistryLogger tests

#[tokio::test]
async fn RegistryLogger___log___memory_backing_keeps_order() {
    let (_global, registry) = services(LogLevel::Trace);
    let id = resource("/logs/a.log");
    let logger = registry.create_logger(id.clone(), memory(), true).await.unwrap();

    logger.log(LogLevel::Info, "one");
    logger.log(LogLevel::Error, "two");
    logger.log(LogLevel::Debug, "three");

    assert_eq!(
        registry.get(&id).unwrap().contents(),
        vec!["[INFO] one", "[ERROR] two", "[DEBUG] three"]
    );
}

#[tokio::test]
async fn RegistryLogger___log___memory_backing_drops_oldest_past_capacity() {
    let (_global, registry) = services(LogLevel::Trace);
    let id = resource("/logs/a.log");
    let logger = registry.create_logger(id.clone(), memory(), true).await.unwrap();

    for n in 0..MEMORY_LOGGER_CAPACITY + 3 {
        logger.log(LogLevel::Info, &format!("m{n}"));
    }

    let contents = registry.get(&id).unwrap().contents();
    assert_eq!(contents.len(), MEMORY_LOGGER_CAPACITY);
    assert_eq!(contents[0], "[INFO] m3");
    assert_eq!(
        contents.last().map(String::as_str),
        Some(format!("[INFO] m{}", MEMORY_LOGGER_CAPACITY + 2).as_str())
    );
}

#[tokio::test]
async fn RegistryLogger___log___filters_below_global_level() {
    let (_global, registry) = services(LogLevel::Warn);
    let id = resource("/logs/a.log");
    let logger = registry.create_logger(id.clone(), memory(), true).await.unwrap();

    logger.log(LogLevel::Info, "dropped");
    logger.log(LogLevel::Warn, "kept");

    assert_eq!(registry.get(&id).unwrap().contents(), vec!["[WARN] kept"]);
}

#[tokio::test]
async fn RegistryLogger___level___follows_global_without_override() {
    let (global, registry) = services(LogLevel::Info);
    let id = resource("/logs/a.log");
    let logger = registry.create_logger(id, None, true).await.unwrap();

    global.set_level(LogLevel::Error);

    assert_eq!(logger.level(), LogLevel::Error);
}

#[tokio::test]
async fn RegistryLogger___level___override_wins_over_global() {
    let (global, registry) = services(LogLevel::Info);
    let id = resource("/logs/a.log");
    let logger = registry.create_logger(id.clone(), None, true).await.unwrap();
    registry.set_log_level(&id, LogLevel::Debug).unwrap();

    global.set_level(LogLevel::Error);

    assert_eq!(logger.level(), LogLevel::Debug);
}

#[tokio::test]
async fn RegistryLogger___log___file_backing_retains_nothing() {
    let (_global, registry) = services(LogLevel::Trace);
    let id = resource("/logs/a.log");
    let logger = registry.create_logger(id.clone(), None, true).await.unwrap();

    logger.log(LogLevel::Info, "to tracing");

    assert!(registry.get(&id).unwrap().contents().is_empty());
}

// level change tests

#[tokio::test]
async fn LoggerService___set_log_level___fires_change_with_resource() {
    let (_global, registry) = services(LogLevel::Info);
    let id = resource("/logs/a.log");
    registry.create_logger(id.clone(), None, true).await.unwrap();
    let (seen, _sub) = record_changes(&registry);

    registry.set_log_level(&id, LogLevel::Trace).unwrap();

    assert_eq!(
        *seen.lock(),
        vec![LoggerLevelChange {
            resource: id,
            level: LogLevel::Trace
        }]
    );
}

#[tokio::test]
async fn LoggerService___set_log_level___unchanged_override_does_not_fire() {
    let (_global, registry) = services(LogLevel::Info);
    let id = resource("/logs/a.log");
    registry.create_logger(id.clone(), None, true).await.unwrap();
    registry.set_log_level(&id, LogLevel::Trace).unwrap();
    let (seen, _sub) = record_changes(&registry);

    registry.set_log_level(&id, LogLevel::Trace).unwrap();

    assert!(seen.lock().is_empty());
}

#[test]
fn LoggerService___set_log_level___unknown_resource_fails() {
    let (_global, registry) = services(LogLevel::Info);

    let result = registry.set_log_level(&resource("/logs/none.log"), LogLevel::Debug);

    assert!(matches!(result, Err(BridgeError::LoggerNotFound { .. })));
}

#[tokio::test]
async fn LoggerService___reset_log_level___fires_with_global_level() {
    let (_global, registry) = services(LogLevel::Warn);
    let id = resource("/logs/a.log");
    registry.create_logger(id.clone(), None, true).await.unwrap();
    registry.set_log_level(&id, LogLevel::Trace).unwrap();
    let (seen, _sub) = record_changes(&registry);

    registry.reset_log_level(&id).unwrap();
    registry.reset_log_level(&id).unwrap();

    assert_eq!(seen.lock().len(), 1);
    assert_eq!(seen.lock()[0].level, LogLevel::Warn);
    assert_eq!(registry.log_level(&id), Some(LogLevel::Warn));
}
