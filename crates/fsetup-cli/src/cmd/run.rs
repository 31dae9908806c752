use anyhow::Context;
use clap::{Args, ValueEnum};
use fsetup_core::{
    bootstrap::Bootstrapper,
    config::RunConfig,
    confirm::TerminalConfirm,
    doctor,
    exec::{Driver, SystemRunner},
    generate::ProjectGenerator,
    paths,
    prereq::PrerequisiteInstaller,
    sync::{ensure_sdk_on_path, SdkSynchronizer, SyncOutcome},
    types::{AndroidLanguage, Channel, IosLanguage, Template, UpdateMode},
};
use std::path::PathBuf;

use crate::output;

#[derive(Args)]
pub struct RunArgs {
    /// Project name (also the directory name under --dir)
    pub project_name: String,

    /// Target platforms: ios, android, macos, linux, windows, web
    /// (aliases: osx, win)
    #[arg(required = true)]
    pub platforms: Vec<String>,

    /// Organization identifier
    #[arg(long, default_value = "com.example")]
    pub org: String,

    /// Flutter release channel
    #[arg(long, value_enum, default_value = "stable")]
    pub channel: ChannelArg,

    /// Output directory for the generated project
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Project template
    #[arg(long, value_enum, default_value = "app")]
    pub template: TemplateArg,

    /// Use Swift for plugin iOS code (default)
    #[arg(long, conflicts_with = "objc")]
    pub swift: bool,

    /// Use Objective-C for plugin iOS code
    #[arg(long)]
    pub objc: bool,

    /// Use Kotlin for plugin Android code (default)
    #[arg(long, conflicts_with = "java")]
    pub kotlin: bool,

    /// Use Java for plugin Android code
    #[arg(long)]
    pub java: bool,

    /// How to reconcile an existing SDK checkout
    #[arg(long = "flutter-update", value_enum, default_value = "reset")]
    pub flutter_update: UpdateModeArg,

    /// Preview actions without executing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ChannelArg {
    Stable,
    Beta,
}

impl From<ChannelArg> for Channel {
    fn from(value: ChannelArg) -> Self {
        match value {
            ChannelArg::Stable => Channel::Stable,
            ChannelArg::Beta => Channel::Beta,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TemplateArg {
    App,
    Plugin,
}

impl From<TemplateArg> for Template {
    fn from(value: TemplateArg) -> Self {
        match value {
            TemplateArg::App => Template::App,
            TemplateArg::Plugin => Template::Plugin,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UpdateModeArg {
    Reset,
    Reclone,
    Skip,
}

impl From<UpdateModeArg> for UpdateMode {
    fn from(value: UpdateModeArg) -> Self {
        match value {
            UpdateModeArg::Reset => UpdateMode::Reset,
            UpdateModeArg::Reclone => UpdateMode::Reclone,
            UpdateModeArg::Skip => UpdateMode::Skip,
        }
    }
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let ios_language = if args.objc {
        IosLanguage::Objc
    } else {
        IosLanguage::Swift
    };
    let android_language = if args.java {
        AndroidLanguage::Java
    } else {
        AndroidLanguage::Kotlin
    };

    let config = RunConfig::new(
        args.project_name,
        &args.platforms,
        args.org,
        args.channel.into(),
        args.dir,
        args.template.into(),
        ios_language,
        android_language,
        args.flutter_update.into(),
        args.dry_run,
    )?;

    println!("Setting up Flutter project: {}", config.project_name);
    output::detail(format!(
        "template: {} | org: {} | channel: {}",
        config.template, config.org, config.channel
    ));
    output::detail(format!(
        "platforms: {} | package: {}",
        config.platforms_csv(),
        config.package_name()
    ));
    output::detail(format!("output: {}", config.project_path().display()));
    if config.dry_run {
        output::warn("dry run: no changes will be made");
    }

    let runner = SystemRunner;
    let driver = Driver::new(&runner, config.dry_run);
    let confirm = TerminalConfirm;

    output::section("Checking prerequisites");
    PrerequisiteInstaller::new(&driver, &config.platforms)
        .ensure_all()
        .context("prerequisites not satisfied")?;

    output::section("Synchronizing Flutter SDK");
    let sdk_root = paths::sdk_root()?;
    let outcome = SdkSynchronizer::new(
        &driver,
        &confirm,
        &sdk_root,
        config.channel,
        config.update_mode,
    )
    .sync()
    .context("SDK synchronization failed")?;
    report_sync_outcome(&outcome);

    if ensure_sdk_on_path(&driver, &sdk_root).context("failed to update shell profile")? {
        output::detail(format!("added:   PATH export to ~/{}", paths::SHELL_PROFILE));
    } else {
        output::detail(format!("exists:  PATH export in ~/{}", paths::SHELL_PROFILE));
    }

    output::section("Validating installation");
    doctor::run_doctor(&driver, &sdk_root, &config.platforms, &confirm)?;

    output::section("Creating project");
    ProjectGenerator::new(&driver, &config, &sdk_root)
        .generate()
        .context("project generation failed")?;

    output::section("Bootstrapping development environment");
    Bootstrapper::new(
        &driver,
        &sdk_root,
        config.project_path(),
        &config.project_name,
        config.package_name(),
    )
    .bootstrap()
    .context("bootstrap failed")?;

    print_next_steps(&config);
    Ok(())
}

fn report_sync_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Cloned => output::detail("cloned:  fresh SDK checkout"),
        SyncOutcome::Recloned => output::detail("cloned:  SDK checkout replaced (reclone)"),
        SyncOutcome::FastForwarded => output::detail("updated: fast-forwarded to origin"),
        SyncOutcome::SkippedDiverged => {
            output::detail("skipped: checkout has diverged (per --flutter-update skip)")
        }
        SyncOutcome::ResetToRemote {
            local_ahead,
            remote_ahead,
        } => output::detail(format!(
            "reset:   discarded {local_ahead} local commit(s), now at origin (+{remote_ahead})"
        )),
        SyncOutcome::DeclinedReset { .. } => {
            output::detail("kept:    local checkout unchanged");
            output::detail("note:    rerun with --flutter-update reclone, or resolve manually");
        }
    }
}

fn print_next_steps(config: &RunConfig) {
    println!("\nSetup complete.\n");
    println!("Next steps:");
    println!("  1. Activate the SDK in your shell:  source ~/{}", paths::SHELL_PROFILE);
    println!("  2. Enter the project:               cd \"{}\"", config.project_path().display());
    println!("  3. Run the app:                     make run");
    println!("  4. Run the tests:                   make test && make analyze");
}
