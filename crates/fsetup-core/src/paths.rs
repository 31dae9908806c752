use crate::error::{Result, SetupError};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// SDK location
// ---------------------------------------------------------------------------

pub const SDK_REPO_URL: &str = "https://github.com/flutter/flutter.git";
pub const SDK_DIR: &str = "development/flutter";
pub const SHELL_PROFILE: &str = ".zprofile";

pub fn home_dir() -> Result<PathBuf> {
    home::home_dir().ok_or(SetupError::HomeNotFound)
}

/// Root of the SDK checkout: `$HOME/development/flutter`.
pub fn sdk_root() -> Result<PathBuf> {
    Ok(home_dir()?.join(SDK_DIR))
}

pub fn sdk_bin_dir(root: &Path) -> PathBuf {
    root.join("bin")
}

pub fn flutter_bin(root: &Path) -> PathBuf {
    sdk_bin_dir(root).join("flutter")
}

pub fn dart_bin(root: &Path) -> PathBuf {
    sdk_bin_dir(root).join("dart")
}

/// Shell profile that receives the PATH export line.
pub fn shell_profile() -> Result<PathBuf> {
    Ok(home_dir()?.join(SHELL_PROFILE))
}

/// The exact line appended (once) to the shell profile.
pub fn path_export_line(root: &Path) -> String {
    format!("export PATH=\"{}/bin:$PATH\"", root.display())
}

// ---------------------------------------------------------------------------
// Generated project layout
// ---------------------------------------------------------------------------

pub const VSCODE_DIR: &str = ".vscode";
pub const VSCODE_SETTINGS: &str = ".vscode/settings.json";
pub const VSCODE_LAUNCH: &str = ".vscode/launch.json";
pub const MAKEFILE: &str = "Makefile";
pub const UNIT_TEST_DIR: &str = "test/unit";
pub const WIDGET_TEST_DIR: &str = "test/widget";
pub const INTEGRATION_TEST_DIR: &str = "integration_test";
pub const UNIT_TEST_FILE: &str = "test/unit/sanity_test.dart";
pub const WIDGET_TEST_FILE: &str = "test/widget/app_widget_test.dart";
pub const INTEGRATION_TEST_FILE: &str = "integration_test/app_test.dart";
pub const ANALYSIS_OPTIONS: &str = "analysis_options.yaml";
pub const CI_WORKFLOW: &str = ".github/workflows/flutter-ci.yml";
pub const ENV_FILE: &str = ".env";
pub const README: &str = "README.md";
pub const MAIN_DART: &str = "lib/main.dart";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdk_paths_compose() {
        let root = Path::new("/home/u/development/flutter");
        assert_eq!(
            flutter_bin(root),
            PathBuf::from("/home/u/development/flutter/bin/flutter")
        );
        assert_eq!(
            dart_bin(root),
            PathBuf::from("/home/u/development/flutter/bin/dart")
        );
    }

    #[test]
    fn export_line_is_verbatim() {
        let root = Path::new("/home/u/development/flutter");
        assert_eq!(
            path_export_line(root),
            "export PATH=\"/home/u/development/flutter/bin:$PATH\""
        );
    }
}
