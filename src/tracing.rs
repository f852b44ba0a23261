//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize tracing. Safe to call multiple times.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at debug in debug
/// builds and info in release builds, with everything else at warn.
pub fn init() {
    INIT.call_once(|| {
        let default_directives = if cfg!(debug_assertions) {
            "catalog_search=debug,warn"
        } else {
            "catalog_search=info,warn"
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .compact();

        let is_test = std::env::var("NEXTEST").is_ok() || cfg!(test);
        if is_test {
            builder.with_test_writer().finish().set_default();
        } else if let Err(e) = builder.with_writer(std::io::stderr).try_init() {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
