//! Tracing subscriber setup for the command-line tool

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a stderr subscriber; `RUST_LOG` overrides the `-v` level
pub fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
