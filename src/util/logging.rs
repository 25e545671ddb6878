//! stderr logging setup.
//!
//! The level comes from the `-v` count only. stdout is reserved for command
//! output so it stays parseable by scripts.

use tracing_subscriber::EnvFilter;

/// Map the `-v` count to a filter directive.
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. Safe to call once per process.
pub fn init(verbose: u8) {
    let filter = EnvFilter::new(format!("htpasswd_manager={}", level_for(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
