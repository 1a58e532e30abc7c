//! Diagnostic logging
//!
//! Log events go to stderr so they never mix with command output on stdout.

use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Log level for a command line verbosity
pub fn level_for(verbosity: u32) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// `RUST_LOG` when set and valid, otherwise the level for `verbosity`
pub fn filter_for(verbosity: u32) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level_for(verbosity).into()))
}

/// Install the global subscriber
pub fn init(verbosity: u32) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter_for(verbosity))
        .finish()
        .try_init()
        .context("failed to install the log subscriber")
}
