use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "./logs/disk-inventory.log";

/// Console logs go to stderr so `scan --json` output stays pipeable. The
/// file layer keeps targets and timestamps for later digging.
pub fn init_logger() -> impl Drop {
    let filter = env::var("TRACING_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter_layer = EnvFilter::new(filter);

    let (log_dir, log_file) = split_log_path(env::var("LOG_FILE_PATH").ok().as_deref());
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(filter_layer)
        .init();

    debug!(
        "Logging to stderr and {}",
        log_dir.join(&log_file).display()
    );

    guard
}

/// Split `LOG_FILE_PATH` into the appender's directory and file name.
/// Unset, blank or directory-only values fall back to the default file.
fn split_log_path(raw: Option<&str>) -> (PathBuf, PathBuf) {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let path = Path::new(raw.unwrap_or(DEFAULT_LOG_FILE));

    match path.file_name() {
        Some(name) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            (dir, PathBuf::from(name))
        }
        None => (path.to_path_buf(), PathBuf::from("disk-inventory.log")),
    }
}
