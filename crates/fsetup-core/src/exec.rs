//! Subprocess and filesystem effects behind the dry-run chokepoint.
//!
//! Every externally-mutating operation in the setup flow goes through
//! [`Driver`]: mutating subprocess calls via [`Driver::run`], filesystem
//! mutations via the file helpers. With `dry_run` enabled the driver echoes
//! the action and reports success without touching anything. Read-only
//! probes ([`Driver::probe`]) always execute.
//!
//! The [`CommandRunner`] trait is the injection seam: production code uses
//! [`SystemRunner`]; tests substitute a scripted fake that records calls.

use crate::error::{Result, SetupError};
use crate::io;
use std::path::Path;
use std::process::Command;

// ---------------------------------------------------------------------------
// CommandRunner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CmdOutput {
    pub fn ok() -> Self {
        Self {
            status: 0,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }
}

pub trait CommandRunner {
    /// Run a program to completion, capturing output. `Err` only for spawn
    /// failures; a non-zero exit is reported through `CmdOutput::status`.
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<CmdOutput>;
}

/// Runs commands on the real system.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<CmdOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        let output = cmd.output().map_err(|e| SetupError::Spawn {
            program: program.to_string(),
            source: e,
        })?;
        Ok(CmdOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

pub struct Driver<'a> {
    runner: &'a dyn CommandRunner,
    dry_run: bool,
}

impl<'a> Driver<'a> {
    pub fn new(runner: &'a dyn CommandRunner, dry_run: bool) -> Self {
        Self { runner, dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Run a mutating command. Echoed instead of executed under dry-run.
    pub fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<CmdOutput> {
        if self.dry_run {
            println!("  dry-run: {}", render(program, args));
            return Ok(CmdOutput::ok());
        }
        tracing::debug!(command = %render(program, args), "exec");
        self.runner.run(program, args, cwd)
    }

    /// Run a mutating command and fail on a non-zero exit.
    pub fn run_checked(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<CmdOutput> {
        let output = self.run(program, args, cwd)?;
        if !output.success() {
            return Err(SetupError::CommandFailed {
                program: program.to_string(),
                status: output.status,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }

    /// Run a read-only probe. Always executes, even under dry-run.
    pub fn probe(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<CmdOutput> {
        tracing::debug!(command = %render(program, args), "probe");
        self.runner.run(program, args, cwd)
    }

    pub fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        if self.dry_run {
            println!("  dry-run: write {}", path.display());
            return Ok(());
        }
        io::atomic_write(path, data)
    }

    pub fn ensure_dir(&self, path: &Path) -> Result<()> {
        if self.dry_run {
            println!("  dry-run: mkdir -p {}", path.display());
            return Ok(());
        }
        io::ensure_dir(path)
    }

    pub fn remove_dir_all(&self, path: &Path) -> Result<()> {
        if self.dry_run {
            println!("  dry-run: rm -rf {}", path.display());
            return Ok(());
        }
        if path.exists() {
            std::fs::remove_dir_all(path)?;
        }
        Ok(())
    }

    /// Idempotently ensure `line` is present in the file at `path`.
    /// Returns true if the line would be (or was) added.
    pub fn ensure_line(&self, path: &Path, line: &str) -> Result<bool> {
        if self.dry_run {
            println!("  dry-run: ensure line in {}: {line}", path.display());
            return Ok(false);
        }
        io::ensure_line_in_file(path, line)
    }
}

fn render(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|a| a.to_string()));
    parts.join(" ")
}
