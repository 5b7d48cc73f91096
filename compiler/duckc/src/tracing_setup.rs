//! Tracing subscriber for the driver.
//!
//! - `DUCK_LOG=debug`: spans for detection, disposal classification,
//!   lowering and evaluation.
//! - `DUCK_LOG=duck_types=trace`: every generic instantiation and fallback.
//!
//! `RUST_LOG` is read when `DUCK_LOG` is unset. Without either, no
//! subscriber is installed.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "DUCK_LOG";

/// Install the hierarchical subscriber. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_from_default_env());
        if let Ok(filter) = filter {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        }
    });
}
