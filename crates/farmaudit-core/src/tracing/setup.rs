//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the farmaudit logging system.
///
/// Reads `FARMAUDIT_LOG` for per-stage log levels.
/// Format: `FARMAUDIT_LOG=farmaudit_analysis::schema=debug,farmaudit=info`
///
/// Falls back to `farmaudit=info` if `FARMAUDIT_LOG` is not set or is invalid.
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_LOG_FILTER);
}

/// Like [`init_tracing`], with a caller-chosen fallback filter
/// (the CLI passes `farmaudit=debug` for `--verbose`).
pub fn init_tracing_with_default(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        // A subscriber installed by the host (tests, embedding tools) wins.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init();
    });
}
