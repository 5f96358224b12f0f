//! Test logging initialization shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test-writer subscriber once per process.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, defaulting to `warn`.
/// Set `TEST_LOG_JSON=1` to get the production JSON shape, which is
/// useful when checking security event fields.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let json = std::env::var("TEST_LOG_JSON").is_ok_and(|v| v == "1");
        let builder = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time();

        // Never panic if something else already installed a subscriber
        if json {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
