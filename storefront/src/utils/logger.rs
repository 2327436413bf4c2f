//! Logging Infrastructure
//!
//! `tracing` setup: `RUST_LOG`-style filtering with an optional daily
//! rolling log file for deployments that want one.

use tracing_subscriber::EnvFilter;

/// Initialize the logger at the default `info` level
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger
///
/// `RUST_LOG` wins when set; otherwise `default_level` (or `info`)
/// applies. When `log_dir` points at an existing directory, output goes to
/// a daily rolling file there instead of stderr.
pub fn init_logger_with_file(default_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.unwrap_or("info")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_dir {
        Some(dir) if std::path::Path::new(dir).exists() => {
            let appender = tracing_appender::rolling::daily(dir, "storefront");
            builder.with_writer(appender).init();
        }
        _ => builder.init(),
    }
}
