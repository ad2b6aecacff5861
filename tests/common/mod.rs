//! Common test helpers shared across integration tests

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not all helpers are used by every test file

use std::path::PathBuf;
use std::process::{Command, Output};

/// Helper to get the compiled example binary path
pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_callrun-example"))
}

/// Helper to create a temporary directory for tests
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Helper to create a Command with test environment
/// Clears `CALLRUN_LOG` so log lines never mix into asserted output
pub fn test_command() -> Command {
    let mut cmd = Command::new(get_binary_path());
    cmd.env_remove("CALLRUN_LOG");
    cmd
}

/// Run the example binary with `args` and capture its output
pub fn run_example(args: &[&str]) -> Output {
    test_command()
        .args(args)
        .output()
        .expect("Failed to execute command")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Package version for testing --version flag
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
