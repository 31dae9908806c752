mod cmd;
mod output;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use fsetup_core::SetupError;

#[derive(Parser)]
#[command(
    name = "fsetup",
    about = "Provision a Flutter development environment and scaffold a project",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install prerequisites, sync the Flutter SDK, and create a project
    Run(cmd::run::RunArgs),
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayVersion => 0,
                ErrorKind::DisplayHelp => 1,
                _ => 2,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run(args) => cmd::run::run(args),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        let code = match e.downcast_ref::<SetupError>() {
            Some(err) if err.is_validation() => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}
