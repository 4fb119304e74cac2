//! Tests for the vpcgen binary's exit codes and output channels.

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn vpcgen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vpcgen"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run vpcgen")
}

#[test]
fn test_no_arguments_is_usage_error() {
    let out = vpcgen(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));
}

#[test]
fn test_asn_only_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frr.conf");

    let out = vpcgen(&["-o", path.to_str().unwrap(), "65001"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("at least one subnet spec is required"));
    assert!(stderr.contains("Usage"));
    assert!(!path.exists());
}

#[test]
fn test_validation_error_exit_code() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frr.conf");

    let out = vpcgen(&[
        "-o",
        path.to_str().unwrap(),
        "--skip-provision",
        "vpc1:v=10:i=eth0:z=1",
    ]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("vpc1:v=10:i=eth0:z=1"));
    assert!(stderr.contains("unknown parameter 'z=1'"));
    assert!(stderr.contains("note: rejected argument #1: vpc1:v=10:i=eth0:z=1"));
    assert!(!path.exists());
}

#[test]
fn test_rejected_argument_position_counts_asn() {
    let out = vpcgen(&[
        "--dry-run",
        "65001",
        "vpc1:v=10:i=eth0:a=10.0.0.1/32",
        "vpc2:v=9999:i=eth0:a=10.0.0.2/32",
    ]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("note: rejected argument #3: vpc2:v=9999:i=eth0:a=10.0.0.2/32"));
}

#[test]
fn test_hyphen_leading_subnet_name() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frr.conf");

    let out = vpcgen(&[
        "-o",
        path.to_str().unwrap(),
        "--skip-provision",
        "-vpc:v=0:i=eth0:a=10.0.0.1/32",
    ]);

    assert_eq!(out.status.code(), Some(0));
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("route-map -vpc permit 10\n"));
    assert!(written.contains("ip prefix-list -vpc permit 10.0.0.1/32\n"));
}

#[test]
fn test_write_failure_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("frr.conf");

    let out = vpcgen(&[
        "-o",
        path.to_str().unwrap(),
        "--skip-provision",
        "vpc1:v=10:i=eth0:a=10.0.0.1/32",
    ]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error: Failed to write configuration to "));
}

#[test]
fn test_provision_warning_survives_quiet_log_level() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frr.conf");

    // No such parent device, so creation always fails.
    let out = vpcgen(&[
        "-l",
        "error",
        "-o",
        path.to_str().unwrap(),
        "vpc1:v=10:i=nosuchif0:a=10.0.0.1/32",
    ]);

    assert_eq!(out.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("warning: could not provision interface nosuchif0.10"));
    assert!(path.exists());
}

#[test]
fn test_dry_run_prints_config() {
    let out = vpcgen(&["--dry-run", "65001", "vpcA:v=0:i=eth1:i=eth2:a=10.1.1.1/32"]);

    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("route-map vpcA permit 10\n"));
    assert!(stdout.contains("router bgp 65001\n"));
}

#[test]
fn test_skip_provision_writes_file_quietly() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frr.conf");

    let out = vpcgen(&[
        "-o",
        path.to_str().unwrap(),
        "--skip-provision",
        "vpc1:v=10:i=eth0:a=10.0.0.1/32",
    ]);

    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("router bgp 64999\n"));
    assert!(written.contains(" neighbor eth0.10 capability extended-nexthop\n"));
}

#[test]
fn test_help_exits_zero() {
    let out = vpcgen(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
}
