//! Post-sync validation via `flutter doctor`.
//!
//! The summary lines are parsed by their check markers into structured
//! issues; raw substring matching is kept only as the documented fallback
//! for the Android license check ([`has_license_issue`]). Doctor problems
//! never fail the run.

use crate::confirm::Confirm;
use crate::error::Result;
use crate::exec::Driver;
use crate::paths;
use crate::types::Platform;
use std::path::Path;

const LICENSE_MARKER: &str = "Some Android licenses not accepted";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorIssue {
    pub severity: IssueSeverity,
    pub summary: String,
}

/// Parse the `[✓]` / `[!]` / `[✗]` check-summary lines of doctor output.
pub fn parse_issues(output: &str) -> Vec<DoctorIssue> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let (severity, rest) = if let Some(rest) = line.strip_prefix("[!]") {
                (IssueSeverity::Warning, rest)
            } else if let Some(rest) = line.strip_prefix("[✗]") {
                (IssueSeverity::Error, rest)
            } else {
                return None;
            };
            Some(DoctorIssue {
                severity,
                summary: rest.trim().to_string(),
            })
        })
        .collect()
}

/// Fallback detection for the Android license issue. Substring match on
/// the raw output; doctor does not expose this in the summary line.
pub fn has_license_issue(output: &str) -> bool {
    output.contains(LICENSE_MARKER)
}

/// Run `flutter doctor -v` and report findings. Offers to accept Android
/// licenses when the issue shows up and android is a target platform.
pub fn run_doctor(
    driver: &Driver,
    sdk_root: &Path,
    platforms: &[Platform],
    confirm: &dyn Confirm,
) -> Result<()> {
    let flutter = paths::flutter_bin(sdk_root);
    let flutter = flutter.to_string_lossy();

    let output = match driver.run(&flutter, &["doctor", "-v"], None) {
        Ok(out) => out,
        Err(e) => {
            println!("  warning: flutter doctor could not run: {e}");
            return Ok(());
        }
    };

    if output.success() {
        println!("  ok: flutter doctor passed");
        return Ok(());
    }

    let combined = format!("{}\n{}", output.stdout, output.stderr);
    let issues = parse_issues(&combined);
    if issues.is_empty() {
        println!("  warning: flutter doctor reported problems");
    } else {
        println!("  warning: flutter doctor found {} issue(s):", issues.len());
        for issue in &issues {
            let tag = match issue.severity {
                IssueSeverity::Warning => "!",
                IssueSeverity::Error => "x",
            };
            println!("    [{tag}] {}", issue.summary);
        }
    }

    if has_license_issue(&combined) && platforms.contains(&Platform::Android) {
        if confirm.confirm("Accept the Android SDK licenses now (runs 'flutter doctor --android-licenses')?") {
            if driver
                .run(&flutter, &["doctor", "--android-licenses"], None)
                .is_err()
            {
                println!("  warning: license acceptance failed; run it manually later");
            }
        } else {
            println!("  note: run 'flutter doctor --android-licenses' later to accept licenses");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::testing::ScriptedConfirm;
    use crate::confirm::DenyAll;
    use crate::exec::testing::FakeRunner;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
[✓] Flutter (Channel stable, 3.24.0)
[!] Android toolchain - develop for Android devices
    ✗ Some Android licenses not accepted. To resolve this, run: flutter doctor --android-licenses
[✗] Xcode - develop for iOS and macOS
[✓] Chrome - develop for the web
";

    #[test]
    fn parses_marker_lines_into_issues() {
        let issues = parse_issues(SAMPLE);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, IssueSeverity::Warning);
        assert!(issues[0].summary.starts_with("Android toolchain"));
        assert_eq!(issues[1].severity, IssueSeverity::Error);
        assert!(issues[1].summary.starts_with("Xcode"));
    }

    #[test]
    fn license_fallback_matches_raw_output() {
        assert!(has_license_issue(SAMPLE));
        assert!(!has_license_issue("[✓] all good"));
    }

    #[test]
    fn accepted_license_prompt_runs_license_flow() {
        let dir = TempDir::new().unwrap();
        let runner = FakeRunner::new().on("doctor -v", 1, SAMPLE);
        let driver = Driver::new(&runner, false);
        let confirm = ScriptedConfirm::new(true);
        run_doctor(&driver, dir.path(), &[Platform::Android], &confirm).unwrap();
        assert_eq!(confirm.prompts.borrow().len(), 1);
        assert!(runner
            .calls()
            .iter()
            .any(|c| c.contains("doctor --android-licenses")));
    }

    #[test]
    fn declined_license_prompt_mutates_nothing() {
        let dir = TempDir::new().unwrap();
        let runner = FakeRunner::new().on("doctor -v", 1, SAMPLE);
        let driver = Driver::new(&runner, false);
        run_doctor(&driver, dir.path(), &[Platform::Android], &DenyAll).unwrap();
        assert!(!runner
            .calls()
            .iter()
            .any(|c| c.contains("--android-licenses")));
    }

    #[test]
    fn license_prompt_skipped_without_android_platform() {
        let dir = TempDir::new().unwrap();
        let runner = FakeRunner::new().on("doctor -v", 1, SAMPLE);
        let driver = Driver::new(&runner, false);
        let confirm = ScriptedConfirm::new(true);
        run_doctor(&driver, dir.path(), &[Platform::Web], &confirm).unwrap();
        assert!(confirm.prompts.borrow().is_empty());
    }

    #[test]
    fn passing_doctor_asks_nothing() {
        let dir = TempDir::new().unwrap();
        let runner = FakeRunner::new();
        let driver = Driver::new(&runner, false);
        let confirm = ScriptedConfirm::new(true);
        run_doctor(&driver, dir.path(), &[Platform::Android], &confirm).unwrap();
        assert!(confirm.prompts.borrow().is_empty());
    }
}
