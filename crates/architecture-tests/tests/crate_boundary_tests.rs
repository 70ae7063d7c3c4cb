//! Architecture tests for crate layering.
//!
//! - `report-exporter` is transport-agnostic: no HTTP, runtime, or CLI crates.
//! - `report-config` stays free of the exporter and HTTP stack.

mod common;

use common::find_workspace_root;
use std::fs;

fn dependency_section(crate_dir: &str) -> String {
    let manifest = find_workspace_root()
        .join("crates")
        .join(crate_dir)
        .join("Cargo.toml");
    let content = fs::read_to_string(&manifest)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", manifest.display()));
    let start = content
        .find("[dependencies]")
        .unwrap_or_else(|| panic!("{} has no [dependencies]", manifest.display()));
    let rest = &content[start + "[dependencies]".len()..];
    let end = rest.find("\n[").unwrap_or(rest.len());
    rest[..end].to_string()
}

fn depends_on(section: &str, name: &str) -> bool {
    section.lines().any(|line| {
        let line = line.trim();
        line.starts_with(&format!("{name} ")) || line.starts_with(&format!("{name}="))
    })
}

#[test]
fn test_exporter_has_no_transport_dependencies() {
    let deps = dependency_section("exporter");
    for forbidden in ["axum", "tokio", "tower-http", "clap", "report-config"] {
        assert!(
            !depends_on(&deps, forbidden),
            "report-exporter must not depend on {forbidden}"
        );
    }
}

#[test]
fn test_config_has_no_exporter_or_http_dependencies() {
    let deps = dependency_section("config");
    for forbidden in ["report-exporter", "axum", "tokio", "clap"] {
        assert!(
            !depends_on(&deps, forbidden),
            "report-config must not depend on {forbidden}"
        );
    }
}

#[test]
fn test_server_wires_both_libraries() {
    let deps = dependency_section("server");
    assert!(depends_on(&deps, "report-exporter"));
    assert!(depends_on(&deps, "report-config"));
}
