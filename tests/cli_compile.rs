//! E2E tests for one-shot compilation

mod common;

use common::{nodescript, stderr_of, stdout_of, write_file};
use std::fs;
use tempfile::tempdir;

#[test]
fn compile_single_file() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a.ns", "x = 1\n");

    let output = nodescript()
        .args(["--output", "a.ns", "a.js"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("a.ns -> a.js"));
    assert_eq!(
        fs::read_to_string(dir.path().join("a.js")).unwrap(),
        "let x = 1;\n"
    );
}

#[test]
fn compile_directory_tree() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "src/x.ns", "a = 1\n");
    write_file(dir.path(), "src/y.txt", "not a source\n");
    write_file(dir.path(), "src/sub/z.ns", "b = 2\n");

    let output = nodescript()
        .args(["--output", "src", "lib"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(
        fs::read_to_string(dir.path().join("lib/x.js")).unwrap(),
        "let a = 1;\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("lib/sub/z.js")).unwrap(),
        "let b = 2;\n"
    );
    assert!(!dir.path().join("lib/y.txt").exists());
    assert!(!dir.path().join("lib/y.js").exists());

    // One progress line per compiled file.
    let stdout = stdout_of(&output);
    assert_eq!(stdout.lines().count(), 2, "stdout: {stdout}");
}

#[cfg(unix)]
#[test]
fn compile_preserves_permission_bits() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    write_file(dir.path(), "tool.ns", "x = 1\n");
    fs::set_permissions(
        dir.path().join("tool.ns"),
        fs::Permissions::from_mode(0o755),
    )
    .unwrap();

    let output = nodescript()
        .args(["--output", "tool.ns", "tool.js"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let mode = fs::metadata(dir.path().join("tool.js"))
        .unwrap()
        .permissions()
        .mode()
        & 0o777;
    assert_eq!(mode, 0o755);
}

#[test]
fn compile_twice_is_byte_identical() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a.ns", "x = 1\ny = x + 1\n");

    for _ in 0..2 {
        let output = nodescript()
            .args(["--output", "a.ns", "a.js"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        assert!(output.status.success());
    }

    assert_eq!(
        fs::read_to_string(dir.path().join("a.js")).unwrap(),
        "let x = 1;\nlet y = x + 1;\n"
    );
}

#[test]
fn compile_syntax_error_fails_run() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "bad.ns", "x = 'unclosed\n");

    let output = nodescript()
        .args(["--output", "bad.ns", "bad.js"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("syntax error"));
    assert!(!dir.path().join("bad.js").exists());
}

#[test]
fn compile_directory_aborts_on_first_failure() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "src/bad.ns", "x = (1\n");
    write_file(dir.path(), "src/good.ns", "y = 2\n");

    let output = nodescript()
        .args(["--output", "src", "lib"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    // One-shot mode propagates the first failure; traversal order decides how
    // far the batch got, so only the exit and the message are guaranteed.
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("syntax error"));
    assert!(!dir.path().join("lib/bad.js").exists());
}

#[test]
fn compile_two_bare_positionals() {
    // Without --output the pair still falls through to the engine.
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a.ns", "x = 1\n");

    let output = nodescript()
        .args(["a.ns", "b.js"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(
        fs::read_to_string(dir.path().join("b.js")).unwrap(),
        "let x = 1;\n"
    );
}

#[test]
fn compile_empty_directory_writes_nothing() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();

    let output = nodescript()
        .args(["--output", "src", "lib"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stdout_of(&output).is_empty());
    assert!(!dir.path().join("lib").exists());
}
