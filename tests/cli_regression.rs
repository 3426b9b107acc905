// End-to-end behaviour of the lintsnap binary.
// Requires: assert_cmd, predicates, tempfile in [dev-dependencies]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn lintsnap(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lintsnap").unwrap();
    cmd.current_dir(dir)
        .env_remove("LINTSNAP_DIR")
        .env_remove("LINTSNAP_DIFF")
        .env_remove("RUST_LOG");
    cmd
}

fn workdir() -> TempDir {
    tempfile::tempdir().unwrap()
}

// ============================================================================
// snapshot / exec
// ============================================================================

#[test]
fn snapshot_stores_command_stdout() {
    let dir = workdir();

    lintsnap(dir.path())
        .args(["snapshot", "echo", "hello"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read(dir.path().join("snapshot")).unwrap(), b"hello\n");
}

#[test]
fn snapshot_is_binary_safe() {
    let dir = workdir();

    lintsnap(dir.path())
        .args(["snapshot", "printf", "\\377\\000abc\\n"])
        .assert()
        .success();

    assert_eq!(
        fs::read(dir.path().join("snapshot")).unwrap(),
        vec![0xff, 0x00, b'a', b'b', b'c', b'\n']
    );
}

#[test]
fn exec_with_same_output_prints_empty_diff() {
    let dir = workdir();
    lintsnap(dir.path()).args(["snapshot", "echo", "hello"]).assert().success();

    lintsnap(dir.path())
        .args(["exec", "echo", "hello"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read(dir.path().join("new_snapshot")).unwrap(), b"hello\n");
}

#[test]
fn exec_with_changed_output_prints_unified_diff() {
    let dir = workdir();
    lintsnap(dir.path()).args(["snapshot", "echo", "hello"]).assert().success();

    lintsnap(dir.path())
        .args(["exec", "echo", "world"])
        .assert()
        .success()
        .stdout(
            contains("---")
                .and(contains("+++ new_snapshot"))
                .and(contains("@@"))
                .and(contains("\n-hello\n"))
                .and(contains("\n+world\n")),
        );

    assert_eq!(fs::read(dir.path().join("snapshot")).unwrap(), b"hello\n");
    assert_eq!(fs::read(dir.path().join("new_snapshot")).unwrap(), b"world\n");
}

#[test]
fn exec_without_snapshot_fails() {
    let dir = workdir();

    lintsnap(dir.path())
        .args(["exec", "echo", "hello"])
        .assert()
        .failure()
        .stderr(contains("lintsnap::store::missing"));
}

#[test]
fn exec_ignores_wrapped_command_failure() {
    let dir = workdir();
    lintsnap(dir.path())
        .args(["snapshot", "sh", "-c", "echo one; exit 2"])
        .assert()
        .success();

    lintsnap(dir.path())
        .args(["exec", "sh", "-c", "echo two; exit 2"])
        .assert()
        .success()
        .stdout(contains("-one").and(contains("+two")));
}

#[test]
fn command_flags_reach_the_wrapped_command() {
    let dir = workdir();

    lintsnap(dir.path())
        .args(["snapshot", "sh", "-c", "echo \"$0\"", "--flag"])
        .assert()
        .success();

    assert_eq!(fs::read(dir.path().join("snapshot")).unwrap(), b"--flag\n");
}

#[test]
fn dir_option_relocates_snapshot_files() {
    let dir = workdir();

    lintsnap(dir.path())
        .args(["--dir", "lint", "snapshot", "echo", "hello"])
        .assert()
        .success();

    assert!(dir.path().join("lint").join("snapshot").is_file());
    assert!(!dir.path().join("snapshot").exists());
}

#[test]
fn broken_diff_program_is_reported() {
    let dir = workdir();
    lintsnap(dir.path()).args(["snapshot", "echo", "hello"]).assert().success();

    lintsnap(dir.path())
        .args(["--diff-program", "lintsnap-no-such-diff", "exec", "echo", "hello"])
        .assert()
        .failure()
        .stderr(contains("lintsnap-no-such-diff"));
}

// ============================================================================
// mode dispatch
// ============================================================================

#[test]
fn invalid_mode_exits_with_status_one() {
    let dir = workdir();

    lintsnap(dir.path())
        .arg("bogus")
        .assert()
        .code(1)
        .stdout(contains("Invalid command 'bogus'"));
}

#[test]
fn invalid_mode_help_is_rejected() {
    let dir = workdir();

    lintsnap(dir.path())
        .arg("help")
        .assert()
        .code(1)
        .stdout(contains("Invalid command 'help'"));
}

// ============================================================================
// report
// ============================================================================

const ORIGINAL: &str = "---original output 1\n+++original output 2\n   original output 3\n";

fn report_with(dir: &Path, output: &str) -> assert_cmd::assert::Assert {
    lintsnap(dir)
        .args(["report", "printf", "%s", output])
        .assert()
}

#[test]
fn report_without_snapshot_creates_it() {
    let dir = workdir();

    report_with(dir.path(), ORIGINAL)
        .code(66)
        .stdout(ORIGINAL)
        .stderr(
            contains("Snapshot file not found. Creating a new snapshot file.").and(contains(
                "Run this command later again to check if new errors are introduced.",
            )),
        );

    assert_eq!(fs::read_to_string(dir.path().join("snapshot")).unwrap(), ORIGINAL);
}

#[test]
fn report_new_errors_fails_and_keeps_snapshot() {
    let dir = workdir();
    fs::write(dir.path().join("snapshot"), ORIGINAL).unwrap();

    report_with(dir.path(), &format!("{ORIGINAL}+++new output 1\n"))
        .code(1)
        .stderr(contains("+++new output 1\n").and(contains(
            "ERROR: diff command reported that the command may have produced new errors. Fix it or update the snapshot.",
        )));

    assert_eq!(fs::read_to_string(dir.path().join("snapshot")).unwrap(), ORIGINAL);
}

#[test]
fn report_fewer_errors_updates_snapshot() {
    let dir = workdir();
    fs::write(dir.path().join("snapshot"), ORIGINAL).unwrap();
    let fewer = "---original output 1\n   original output 3\n";

    report_with(dir.path(), fewer)
        .success()
        .stderr("")
        .stdout(
            contains("Congratulations! It looks like that you fixed some errors.")
                .and(contains("Saving the new snapshot.")),
        );

    assert_eq!(fs::read_to_string(dir.path().join("snapshot")).unwrap(), fewer);
}

#[test]
fn report_no_changes_is_quiet() {
    let dir = workdir();
    fs::write(dir.path().join("snapshot"), ORIGINAL).unwrap();

    report_with(dir.path(), ORIGINAL)
        .success()
        .stderr("")
        .stdout(ORIGINAL);
}

#[test]
fn report_removed_and_added_thanks_but_fails() {
    let dir = workdir();
    fs::write(dir.path().join("snapshot"), ORIGINAL).unwrap();

    report_with(
        dir.path(),
        "+++new output 1\n---original output 1\n+++original output 2\n",
    )
    .code(1)
    .stdout(contains(
        "Thank you! It looks like that you fixed some errors. But you also introduced new errors. Fix it!",
    ));

    assert_eq!(fs::read_to_string(dir.path().join("snapshot")).unwrap(), ORIGINAL);
}

#[test]
fn report_compares_binary_output_line_by_line() {
    let dir = workdir();
    fs::write(dir.path().join("snapshot"), b"\0old\n").unwrap();

    lintsnap(dir.path())
        .args(["report", "printf", "\\000old\\n\\000new\\n"])
        .assert()
        .code(1)
        .stderr(contains("new\n").and(contains(
            "ERROR: diff command reported that the command may have produced new errors. Fix it or update the snapshot.",
        )))
        .stderr(contains("lintsnap::diff::malformed").not());

    assert_eq!(fs::read(dir.path().join("snapshot")).unwrap(), b"\0old\n");
}
