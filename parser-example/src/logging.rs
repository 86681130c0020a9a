//! Log output for the example binaries.

use tracing_subscriber::EnvFilter;

/// Level filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// `RUST_LOG=parser_framework=trace` shows alternation fallbacks and
/// repeat stops. Returns `false` if a global subscriber was already set.
pub fn init() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}
