//! Diagnostic logging to stderr.
//!
//! Stdout carries only the build notices; everything from `tracing` goes to
//! stderr, filtered by `RUST_LOG` (default `warn`).

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `-v` raises the level to `debug`, `-vv` to
/// `trace`, overriding `RUST_LOG`.
pub fn init(verbose: u8) {
    let env_filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
