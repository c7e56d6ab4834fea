// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "PW_LOG";

/// Default filter for a given `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. `PW_LOG` overrides the `-v` level.
pub fn init(verbosity: u8) {
    let fallback = default_directive(verbosity);
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity > 1)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[yare::parameterized(
        quiet   = { 0, "warn" },
        verbose = { 1, "info" },
        debug   = { 2, "debug" },
        more    = { 5, "debug" },
    )]
    fn verbosity_levels(verbosity: u8, expected: &str) {
        assert_eq!(default_directive(verbosity), expected);
    }
}
