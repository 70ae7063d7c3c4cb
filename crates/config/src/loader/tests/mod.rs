//! Tests for the configuration loader.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod dotenv_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Every variable the loader reads, cleared so ambient settings cannot leak in.
pub fn cleared_vars() -> [(&'static str, Option<&'static str>); 6] {
    use crate::constants::*;
    [
        (ENV_BIND_ADDR, None),
        (ENV_LOCALE, None),
        (ENV_LOCALE_FILE, None),
        (ENV_DATASET_FILE, None),
        (ENV_LEGACY_CSV_CHARSET, None),
        (ENV_LOG_FORMAT, None),
    ]
}
