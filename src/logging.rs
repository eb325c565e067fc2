use std::io;
use std::path::Path;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_STDOUT_FILTER: &str = "info,llm_request=info";
const FILE_FILTER: &str = "llm_request=debug,info";

/// Installs the global subscriber: stdout filtered by `RUST_LOG` (or a default),
/// plus a daily-rolling file under `log_dir` when one is given.
pub fn configure_logging(log_dir: Option<&Path>) {
    let stdout_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_STDOUT_FILTER));
    let stdout_log = fmt::layer()
        .with_writer(io::stdout)
        .with_filter(stdout_filter);

    let file_log = log_dir.map(|dir| {
        let file_appender = rolling::daily(dir, "topic-forge.log");
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_filter(EnvFilter::new(FILE_FILTER))
    });

    tracing_subscriber::Registry::default()
        .with(stdout_log)
        .with(file_log)
        .init();
}
