use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    estante::logging::init().context("init logging")?;

    let cli = estante::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        estante::cli::Command::Shell(args) => {
            estante::app::run_shell(args).await.context("shell")?;
        }
        estante::cli::Command::List(args) => {
            estante::app::run_list(args).await.context("list")?;
        }
    }

    Ok(())
}
