//! Common test utilities and logging infrastructure.
//!
//! Import this module in integration tests and call `init_test_logging()`
//! at the start of tests that want structured output:
//!
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//! ```
//!
//! Set `RUST_LOG=debug` to see the crate's `log` records during a run.

#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialize test logging. Safe to call from every test; only the first
/// call installs the subscriber.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
