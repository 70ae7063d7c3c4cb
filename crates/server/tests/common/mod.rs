//! Shared test utilities for report-server integration tests.
//!
//! Invariants:
//! - Commands are hermetic: `DOTENV_DISABLED=1` and no inherited `REPORT_EXPORT_*` values.

use assert_cmd::Command;

/// Remove every `REPORT_EXPORT_*` variable inherited from the host.
pub fn clear_report_env(cmd: &mut Command) {
    for (key, _) in std::env::vars() {
        if key.starts_with("REPORT_EXPORT_") {
            cmd.env_remove(&key);
        }
    }
}

/// Returns a hermetic `report-server` command.
#[allow(dead_code)]
pub fn server_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("report-server");
    cmd.env("DOTENV_DISABLED", "1");
    clear_report_env(&mut cmd);
    cmd
}
