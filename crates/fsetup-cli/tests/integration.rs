#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fsetup() -> Command {
    Command::cargo_bin("fsetup").unwrap()
}

// ---------------------------------------------------------------------------
// Usage and validation exit codes
// ---------------------------------------------------------------------------

#[test]
fn help_exits_one() {
    fsetup()
        .arg("--help")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("run"));
}

#[test]
fn version_exits_zero() {
    fsetup().arg("--version").assert().code(0);
}

#[test]
fn missing_arguments_exit_two() {
    fsetup().arg("run").assert().code(2);
    fsetup().args(["run", "MyApp"]).assert().code(2);
}

#[test]
fn unknown_flag_exits_two() {
    fsetup()
        .args(["run", "MyApp", "web", "--bogus"])
        .assert()
        .code(2);
}

#[test]
fn invalid_channel_exits_two() {
    fsetup()
        .args(["run", "MyApp", "web", "--channel", "nightly"])
        .assert()
        .code(2);
}

#[test]
fn conflicting_language_flags_exit_two() {
    fsetup()
        .args(["run", "MyApp", "ios", "--template", "plugin", "--swift", "--objc"])
        .assert()
        .code(2);
}

#[test]
fn unsupported_platform_exits_two_and_names_token() {
    fsetup()
        .args(["run", "MyApp", "ios", "solaris"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("solaris"))
        .stderr(predicate::str::contains("macos"));
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

#[test]
fn dry_run_succeeds_and_mutates_nothing() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("projects");

    fsetup()
        .env("HOME", home.path())
        .args([
            "run",
            "MyApp",
            "ios",
            "android",
            "osx",
            "--dry-run",
            "--dir",
        ])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("ios,android,macos"))
        .stdout(predicate::str::contains("package: myapp"))
        .stdout(predicate::str::contains("dry-run: git clone"));

    assert!(!out.exists(), "dry run must not create the output directory");
    assert!(
        !home.path().join(".zprofile").exists(),
        "dry run must not touch the shell profile"
    );
    assert!(
        !home.path().join("development").exists(),
        "dry run must not create the SDK root"
    );
}

#[test]
fn dry_run_reports_platform_aliases_resolved() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("projects");

    fsetup()
        .env("HOME", home.path())
        .args(["run", "My App!", "WIN", "web", "--dry-run", "--dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("windows,web"))
        .stdout(predicate::str::contains("package: my_app_"));
}
