//! Process subscriber setup

use crate::reload::{ReloadHandle, process_filter};
use logbridge_core::LogLevel;
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload;

/// Install a `fmt` subscriber on stderr whose level can be changed at run time
///
/// `level` gates ordinary diagnostics; records written by file-backed
/// loggers are gated by each logger's own level instead. Call once at
/// startup. Returns `false` when another global subscriber was
/// already installed; the existing one is left in place.
pub fn init_logging(level: LogLevel) -> bool {
    let (filter, handle) = reload::Layer::new(process_filter(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return false;
    }
    ReloadHandle::global().set_handle(handle);
    true
}
