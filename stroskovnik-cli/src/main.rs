mod cli;
mod commands;
mod pdf;
mod settings_file;

use clap::Parser;
use cli::{Cli, Commands};
use settings_file::TomlSettingsStore;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "stroskovnik=info,stroskovnik_cli=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let path = match cli.config {
        Some(path) => path,
        None => TomlSettingsStore::default_path()?,
    };
    let store = TomlSettingsStore::new(path);

    match cli.command {
        Commands::Generate(args) => commands::generate(store, args).await,
        Commands::Inspect(args) => commands::inspect(store, args).await,
        Commands::ConfigPath => commands::config_path(&store).await,
    }
}
