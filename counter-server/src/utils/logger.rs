//! Logging Infrastructure
//!
//! Structured logging setup for development (stdout) and deployed (daily
//! rolling file) runs. `RUST_LOG` wins over the configured level when set.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger (stdout, `info`)
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// When `log_dir` is given the directory is created if missing and logs roll
/// daily as `counter-server.YYYY-MM-DD`.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok() {
            let file_appender = tracing_appender::rolling::daily(log_path, "counter-server");
            // try_init: tests may have installed a subscriber already
            let _ = subscriber.with_ansi(false).with_writer(file_appender).try_init();
            return;
        }
        eprintln!("Log directory {dir} is not writable, logging to stdout");
    }

    let _ = subscriber.try_init();
}
