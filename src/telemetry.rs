//! Tracing initialisation for the lintsnap binary.
//!
//! Logs go to stderr; stdout carries the relayed diff and nothing else.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps the `-v` count to a default level.
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Installs the global subscriber. `RUST_LOG`, when set, wins over `verbose`.
///
/// Only the first call takes effect.
pub fn init_tracing(verbose: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose).as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
