use std::io;
use tracing_appender::rolling;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONSOLE_FILTER: &str = "info,dedup=info,filter=info,classify=info";
const DEFAULT_FILE_FILTER: &str = "info,dedup=debug,filter=debug,classify=debug";

pub fn configure_logging() {
    // Console log goes to stderr; stdout carries the JSON output. RUST_LOG
    // overrides the default filter.
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_CONSOLE_FILTER));
    let console_log = fmt::layer()
        .with_writer(io::stderr)
        .with_filter(console_filter);

    // File log configuration
    let file_appender = rolling::daily("logs", "newsdigest.log");
    let file_log = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(EnvFilter::new(DEFAULT_FILE_FILTER));

    tracing_subscriber::Registry::default()
        .with(console_log)
        .with(file_log)
        .init();
}
