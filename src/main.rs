use anyhow::Context;
use clap::Parser;
use tokio::runtime::Handle;

use statecraft::app::Catalogue;
use statecraft::cli::{self, Cli};
use statecraft::config::Config;
use statecraft::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let catalogue = Catalogue::with_user(&config, Handle::current(), cli.command.user_id())
        .context("Failed to build screens")?;

    for line in cli::run(&catalogue, cli.command).await? {
        println!("{}", line);
    }
    Ok(())
}
