//! Quiet tracing subscriber shared by the engine's unit and integration tests.

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

/// Checked in order; the first one set wins.
const LEVEL_VARS: [&str; 2] = ["TEST_LOG", "RUST_LOG"];

/// Service warnings (rejected invitation transitions, unchanged step
/// pointers) stay visible; everything else is silent.
const DEFAULT_DIRECTIVES: &str = "warn";

static INSTALLED: Lazy<bool> = Lazy::new(|| {
    let directives = LEVEL_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string());

    fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_test_writer()
        .without_time()
        .with_target(true)
        .try_init()
        .is_ok()
});

/// Install the test subscriber once per process.
///
/// Returns whether this subscriber is the active global one; false means
/// something else installed a subscriber first.
pub fn init() -> bool {
    *INSTALLED
}
