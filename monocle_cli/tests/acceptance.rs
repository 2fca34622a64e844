//! Acceptance tests that run the `monocle` binary against config files only. Nothing here
//! touches a chain.

use abscissa_core::testing::prelude::*;
use once_cell::sync::Lazy;
use std::path::PathBuf;

pub static RUNNER: Lazy<CmdRunner> = Lazy::new(|| CmdRunner::new(env!("CARGO_BIN_EXE_monocle")));

fn temp_config() -> PathBuf {
    std::env::temp_dir()
        .join(format!("monocle-cli-{}", uuid::Uuid::new_v4()))
        .join("config.toml")
}

#[test]
fn init_writes_default_config() {
    let path = temp_config();
    let path_arg = path.to_string_lossy().to_string();

    let mut runner = RUNNER.clone();
    runner
        .args(&["config", "init", "--path", &path_arg])
        .status()
        .expect_success();
    assert!(path.exists());

    let mut runner = RUNNER.clone();
    runner
        .args(&["config", "init", "--path", &path_arg])
        .status()
        .expect_code(1);

    let mut runner = RUNNER.clone();
    runner
        .args(&["config", "init", "--path", &path_arg, "--overwrite"])
        .status()
        .expect_success();

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn lists_configured_chains() {
    let path = temp_config();
    let path_arg = path.to_string_lossy().to_string();

    let mut runner = RUNNER.clone();
    runner
        .args(&["config", "init", "--path", &path_arg])
        .status()
        .expect_success();

    let mut runner = RUNNER.clone();
    let mut cmd = runner
        .args(&["-c", &path_arg, "-o", "text", "chains", "list"])
        .capture_stdout()
        .run();
    cmd.stdout().expect_line("cosmoshub-4 (default)");
    cmd.stdout().expect_line("osmosis-1");
    cmd.wait().unwrap().expect_success();

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn unknown_chain_fails() {
    let mut runner = RUNNER.clone();
    runner
        .args(&["chains", "show", "juno-1"])
        .status()
        .expect_code(1);
}

#[test]
fn malformed_tx_hash_fails_before_querying() {
    let mut runner = RUNNER.clone();
    runner
        .args(&["tendermint", "tx", "not-a-hash"])
        .status()
        .expect_code(1);
}
