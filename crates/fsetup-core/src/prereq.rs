//! OS-level prerequisite checks and installs.
//!
//! Every ensure step checks presence before installing and is a no-op when
//! the tool is already there. Hard failures abort the run before any SDK
//! or project mutation; platform-conditional extras only warn.

use crate::error::{Result, SetupError};
use crate::exec::Driver;
use crate::types::Platform;

const HOMEBREW_INSTALL_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";
const REQUIRED_FORMULAE: &[&str] = &["git", "cocoapods"];
const ANDROID_CASKS: &[&str] = &["temurin", "android-commandlinetools"];

pub struct PrerequisiteInstaller<'a> {
    driver: &'a Driver<'a>,
    platforms: &'a [Platform],
}

impl<'a> PrerequisiteInstaller<'a> {
    pub fn new(driver: &'a Driver<'a>, platforms: &'a [Platform]) -> Self {
        Self { driver, platforms }
    }

    pub fn ensure_all(&self) -> Result<()> {
        self.ensure_xcode_tools()?;
        self.ensure_homebrew()?;
        self.ensure_formulae()?;
        if self.platforms.contains(&Platform::Android) {
            self.ensure_android_tools()?;
        }
        if self.platforms.contains(&Platform::Ios) {
            self.ensure_ios_tools()?;
        }
        Ok(())
    }

    /// The command-line tools install opens a GUI installer that must
    /// finish before anything else can proceed, so a missing install is
    /// fatal after triggering it.
    pub fn ensure_xcode_tools(&self) -> Result<()> {
        if self.probe_ok("xcode-select", &["-p"]) {
            println!("  exists:  Xcode command-line tools");
            return Ok(());
        }
        self.driver.run("xcode-select", &["--install"], None)?;
        if self.driver.is_dry_run() {
            return Ok(());
        }
        println!("  warning: complete the Xcode command-line tools installer, then rerun");
        Err(SetupError::MissingTool(
            "Xcode command-line tools (installation started)".to_string(),
        ))
    }

    pub fn ensure_homebrew(&self) -> Result<()> {
        if which::which("brew").is_ok() {
            println!("  exists:  Homebrew");
            self.configure_homebrew_path();
            return Ok(());
        }
        println!("  installing: Homebrew");
        let script = format!("curl -fsSL {HOMEBREW_INSTALL_URL} | NONINTERACTIVE=1 /bin/bash");
        self.driver
            .run_checked("/bin/bash", &["-c", script.as_str()], None)?;
        self.configure_homebrew_path();
        Ok(())
    }

    fn configure_homebrew_path(&self) {
        // Apple Silicon installs outside the default PATH.
        if std::path::Path::new("/opt/homebrew/bin/brew").exists() {
            if let Err(e) = self.driver.run("/opt/homebrew/bin/brew", &["shellenv"], None) {
                println!("  warning: Homebrew path configuration failed: {e}");
            }
        }
    }

    pub fn ensure_formulae(&self) -> Result<()> {
        for &formula in REQUIRED_FORMULAE {
            if self.probe_ok("brew", &["list", formula]) {
                println!("  exists:  {formula}");
                continue;
            }
            println!("  installing: {formula}");
            self.driver
                .run_checked("brew", &["install", formula], None)
                .map_err(|_| SetupError::MissingTool(formula.to_string()))?;
        }
        Ok(())
    }

    /// Android toolchain casks. Failures are tolerated: the SDK itself is
    /// usable and `flutter doctor` will surface what's missing.
    pub fn ensure_android_tools(&self) -> Result<()> {
        for &cask in ANDROID_CASKS {
            if self.probe_ok("brew", &["list", "--cask", cask]) {
                println!("  exists:  {cask}");
                continue;
            }
            println!("  installing: {cask}");
            let result = self.driver.run("brew", &["install", "--cask", cask], None);
            match result {
                Ok(out) if out.success() => {}
                _ => println!("  warning: failed to install {cask}"),
            }
        }
        Ok(())
    }

    pub fn ensure_ios_tools(&self) -> Result<()> {
        let result = self.driver.run("pod", &["repo", "update"], None);
        match result {
            Ok(out) if out.success() => println!("  exists:  CocoaPods repo up to date"),
            _ => println!("  warning: CocoaPods repo update failed (not fatal)"),
        }
        Ok(())
    }

    /// Presence probe: spawn failures count as "not present".
    fn probe_ok(&self, program: &str, args: &[&str]) -> bool {
        matches!(self.driver.probe(program, args, None), Ok(out) if out.success())
    }
}
