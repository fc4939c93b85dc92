//! Tracing setup for the CLI.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Initializes the global tracing subscriber.
///
/// Logs go to stderr so stdout carries nothing but the result lines. The
/// default level follows the `-v` count; `RUST_LOG` overrides it.
pub fn init_tracing_subscriber(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("failed to set tracing subscriber: {err}"))
}
