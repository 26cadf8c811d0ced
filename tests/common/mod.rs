//! Shared helpers for the CLI end-to-end tests

use std::path::Path;
use std::process::Command;

/// Command for the compiled `nodescript` binary
pub fn nodescript() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nodescript"))
}

/// Write a file under `root`, creating intermediate directories
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
