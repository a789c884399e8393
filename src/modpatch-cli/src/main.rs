mod cli;
mod commands;
mod config;
mod file_utils;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modpatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => {
            commands::patch::handle(&cli.patch, &Config::load()?)?;
        }

        Some(Commands::Patch(args)) => {
            commands::patch::handle(&args, &Config::load()?)?;
        }

        Some(Commands::Build(args)) => {
            commands::build::handle(&args, &Config::load()?)?;
        }

        Some(Commands::List) => {
            commands::list::handle();
        }

        Some(Commands::Configure { settings, show }) => {
            commands::configure::handle(settings, show)?;
        }
    }

    Ok(())
}
