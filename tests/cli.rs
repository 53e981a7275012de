use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Command, Stdio};

fn esvi() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("esvi");
    cmd.env_remove("RUN_MODE").env("RUST_LOG", "esvi=warn");
    cmd
}

// Nothing listens on the returned port once the listener is dropped.
fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[test]
fn should_exit_with_one_on_unknown_flag() {
    esvi()
        .arg("--bogus")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn should_exit_with_one_on_unknown_subcommand() {
    esvi().arg("upgrade").assert().code(1);
}

#[test]
fn should_exit_with_zero_on_help() {
    esvi()
        .arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn should_exit_with_one_without_runtime_client() {
    esvi()
        .args(["-s", "runtime.program=esvi-no-such-client"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Precondition"));
}

#[test]
fn should_exit_with_one_when_cluster_is_unreachable() {
    let url = format!("elasticsearch.url=http://127.0.0.1:{}", closed_port());
    esvi()
        .args(["-s", "runtime.program=true", "-s", &url])
        .args(["-s", "readiness.initial_delay=0"])
        .args(["-s", "readiness.interval=100"])
        .args(["-s", "readiness.timeout=500"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not reachable"));
}

#[test]
fn should_print_run_mode_from_environment() {
    let config_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config");
    let output = esvi()
        .env("RUN_MODE", "testing")
        .args(["-c", config_dir.to_str().unwrap(), "config"])
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();
    let config: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(config["mode"], "testing");
    assert_eq!(config["container"]["name"], "elasticsearch-testing");
}

#[test]
fn should_not_fail_when_reader_goes_away() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_esvi"))
        .arg("config")
        .env_remove("RUN_MODE")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("esvi binary");
    drop(child.stdout.take());
    let output = child.wait_with_output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(0), "{}", stderr);
    assert!(!stderr.contains("panicked"));
}
