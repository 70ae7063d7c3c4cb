//! Tests for dotenv loading behavior.
//!
//! Responsibilities:
//! - Test that missing `.env` files are silently ignored.
//! - Test that invalid `.env` files return errors without leaking secrets.
//! - Test that `DOTENV_DISABLED=1`/`true` skips dotenv loading.
//!
//! Invariants / Assumptions:
//! - Tests use `env_lock()` to prevent cross-test contamination.
//! - Tests must serialize mutations to process-global state (cwd/env).

use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use super::env_lock;
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;

/// RAII guard for temporarily changing the current working directory.
struct CwdGuard {
    original_dir: PathBuf,
}

impl CwdGuard {
    fn new(temp_dir: &TempDir) -> Self {
        let original_dir = std::env::current_dir().expect("Failed to get current directory");
        std::env::set_current_dir(temp_dir.path()).expect("Failed to set current directory");
        Self { original_dir }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

#[test]
#[serial]
fn test_missing_dotenv_is_ok() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    temp_env::with_var_unset("DOTENV_DISABLED", || {
        let result = ConfigLoader::new().load_dotenv();
        assert!(result.is_ok(), "Missing .env file should be silently ignored");
    });
}

#[test]
#[serial]
fn test_valid_dotenv_is_loaded() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    fs::write(
        temp_dir.path().join(".env"),
        "REPORT_EXPORT_BIND_ADDR=127.0.0.1:4567\n",
    )
    .unwrap();

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", None::<&str>),
            ("REPORT_EXPORT_BIND_ADDR", None),
        ],
        || {
            let config = ConfigLoader::new()
                .load_dotenv()
                .unwrap()
                .from_env()
                .unwrap()
                .build()
                .unwrap();
            assert_eq!(config.bind_addr.port(), 4567);
        },
    );
}

#[test]
#[serial]
fn test_invalid_dotenv_returns_parse_error() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    temp_env::with_var_unset("DOTENV_DISABLED", || {
        match ConfigLoader::new().load_dotenv() {
            Err(ConfigError::DotenvParse { .. }) => {}
            Err(other) => panic!("Invalid .env should return DotenvParse error, got {other}"),
            Ok(_) => panic!("Invalid .env should return DotenvParse error, got Ok"),
        }
    });
}

#[test]
#[serial]
fn test_dotenv_parse_error_does_not_leak_secrets() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    let secret_value = "supersecret_dataset_path_12345";
    fs::write(
        temp_dir.path().join(".env"),
        format!("REPORT_EXPORT_DATASET_FILE={secret_value}\nINVALID_LINE_WITHOUT_EQUALS"),
    )
    .unwrap();

    temp_env::with_var_unset("DOTENV_DISABLED", || {
        let err = ConfigLoader::new()
            .load_dotenv()
            .expect_err("Expected error for invalid .env file");
        let message = err.to_string();
        assert!(!message.contains(secret_value), "leaked: {message}");
        assert!(message.contains(".env"));
        assert!(message.contains("DOTENV_DISABLED"));
    });
}

#[test]
#[serial]
fn test_dotenv_disabled_skips_invalid_file() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    for value in ["1", "true"] {
        temp_env::with_var("DOTENV_DISABLED", Some(value), || {
            assert!(
                ConfigLoader::new().load_dotenv().is_ok(),
                "DOTENV_DISABLED={value} should skip .env loading even if file is invalid"
            );
        });
    }
}
