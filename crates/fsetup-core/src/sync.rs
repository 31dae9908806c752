//! SDK checkout synchronization.
//!
//! A small state machine over the local SDK git working tree: an absent
//! root is cloned, a fast-forwardable checkout is advanced, and a diverged
//! checkout becomes a decision point. The common case (no local commits)
//! never prompts; a hard reset only happens after the divergence magnitude
//! has been reported and the injected [`Confirm`] capability has said yes.

use crate::confirm::Confirm;
use crate::error::{Result, SetupError};
use crate::exec::Driver;
use crate::paths;
use crate::types::{Channel, UpdateMode};
use std::path::{Path, PathBuf};

/// Terminal state of a synchronization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Fresh clone into an absent root.
    Cloned,
    /// Root deleted and cloned fresh (`reclone` mode).
    Recloned,
    /// Local branch fast-forwarded (or already up to date).
    FastForwarded,
    /// Diverged and `skip` mode: reported, nothing mutated.
    SkippedDiverged,
    /// Diverged; user approved discarding local history.
    ResetToRemote { local_ahead: u32, remote_ahead: u32 },
    /// Diverged; user declined the reset. Nothing mutated.
    DeclinedReset { local_ahead: u32, remote_ahead: u32 },
}

pub struct SdkSynchronizer<'a> {
    driver: &'a Driver<'a>,
    confirm: &'a dyn Confirm,
    root: PathBuf,
    channel: Channel,
    update_mode: UpdateMode,
}

impl<'a> SdkSynchronizer<'a> {
    pub fn new(
        driver: &'a Driver<'a>,
        confirm: &'a dyn Confirm,
        root: impl Into<PathBuf>,
        channel: Channel,
        update_mode: UpdateMode,
    ) -> Self {
        Self {
            driver,
            confirm,
            root: root.into(),
            channel,
            update_mode,
        }
    }

    /// Bring the checkout to the target channel. See module docs for the
    /// transition table.
    pub fn sync(&self) -> Result<SyncOutcome> {
        if self.update_mode == UpdateMode::Reclone {
            self.driver.remove_dir_all(&self.root)?;
            self.clone_sdk()?;
            return Ok(SyncOutcome::Recloned);
        }

        if !self.is_present() {
            self.clone_sdk()?;
            return Ok(SyncOutcome::Cloned);
        }

        self.update()
    }

    /// A checkout counts as present only when it is a git working tree;
    /// a bare directory is treated as absent and cloned over.
    fn is_present(&self) -> bool {
        self.root.join(".git").exists()
    }

    fn clone_sdk(&self) -> Result<()> {
        if let Some(parent) = self.root.parent() {
            self.driver.ensure_dir(parent)?;
        }
        let root = self.root.display().to_string();
        self.driver.run_checked(
            "git",
            &[
                "clone",
                "--depth",
                "1",
                "-b",
                self.channel.as_str(),
                paths::SDK_REPO_URL,
                root.as_str(),
            ],
            None,
        )?;
        Ok(())
    }

    fn update(&self) -> Result<SyncOutcome> {
        let channel = self.channel.as_str();
        let remote_ref = format!("origin/{channel}");

        // Remote URL drift is repaired opportunistically; failure here is
        // not interesting enough to stop the run.
        let _ = self.driver.run(
            "git",
            &["remote", "set-url", "origin", paths::SDK_REPO_URL],
            Some(&self.root),
        );

        self.driver
            .run_checked("git", &["fetch", "origin", "--prune"], Some(&self.root))
            .map_err(|e| self.git_err(format!("fetch failed: {e}")))?;

        // Land on a local branch named after the channel, creating it from
        // the remote tracking branch on first switch.
        let checkout = self
            .driver
            .run("git", &["checkout", channel], Some(&self.root))?;
        if !checkout.success() {
            self.driver
                .run_checked(
                    "git",
                    &["checkout", "-b", channel, remote_ref.as_str()],
                    Some(&self.root),
                )
                .map_err(|e| self.git_err(format!("checkout of '{channel}' failed: {e}")))?;
        }

        let merge = self
            .driver
            .run("git", &["merge", "--ff-only", remote_ref.as_str()], Some(&self.root))?;
        if merge.success() {
            return Ok(SyncOutcome::FastForwarded);
        }

        // Fast-forward refused: local and remote histories have diverged.
        if self.update_mode == UpdateMode::Skip {
            return Ok(SyncOutcome::SkippedDiverged);
        }

        let (remote_ahead, local_ahead) = self.divergence_counts(&remote_ref)?;
        println!(
            "  warning: SDK checkout has diverged from origin (local +{local_ahead} / origin +{remote_ahead})"
        );

        let prompt = format!(
            "Hard-reset local '{channel}' to {remote_ref}, discarding {local_ahead} local commit(s)?"
        );
        if !self.confirm.confirm(&prompt) {
            return Ok(SyncOutcome::DeclinedReset {
                local_ahead,
                remote_ahead,
            });
        }

        self.driver
            .run_checked("git", &["reset", "--hard", remote_ref.as_str()], Some(&self.root))
            .map_err(|e| self.git_err(format!("hard reset failed: {e}")))?;
        Ok(SyncOutcome::ResetToRemote {
            local_ahead,
            remote_ahead,
        })
    }

    /// (remote_ahead, local_ahead) between the remote tracking ref and the
    /// local channel branch. Read-only.
    fn divergence_counts(&self, remote_ref: &str) -> Result<(u32, u32)> {
        let range = format!("{remote_ref}...{}", self.channel.as_str());
        let output = self.driver.probe(
            "git",
            &["rev-list", "--left-right", "--count", range.as_str()],
            Some(&self.root),
        )?;
        let mut parts = output.stdout.split_whitespace();
        let remote = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
        let local = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
        Ok((remote, local))
    }

    fn git_err(&self, message: String) -> SetupError {
        SetupError::Git {
            dir: self.root.clone(),
            message,
        }
    }
}

/// Put the SDK `bin` directory on the search path: prepend it to the
/// process PATH and persist the export line into the shell profile exactly
/// once. Returns true when the profile line was newly added.
pub fn ensure_sdk_on_path(driver: &Driver, root: &Path) -> Result<bool> {
    let bin = paths::sdk_bin_dir(root);
    let current = std::env::var("PATH").unwrap_or_default();
    let bin_str = bin.display().to_string();
    if !current.split(':').any(|entry| entry == bin_str) {
        std::env::set_var("PATH", format!("{bin_str}:{current}"));
    }
    driver.ensure_line(&paths::shell_profile()?, &paths::path_export_line(root))
}
