use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stroskovnik::domain::parse_arrival_time;
use time::Time;

#[derive(Debug, Parser)]
#[command(name = "stroskovnik")]
#[command(about = "Turn saved stroškovnik pages into monthly attendance sheets")]
pub struct Cli {
    /// Settings file to use instead of the one in the user config directory
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate attendance PDFs from a saved page or a folder of pages
    Generate(GenerateArgs),
    /// Show what would be extracted from a page without writing anything
    Inspect(InspectArgs),
    /// Print settings path and create default file if missing
    ConfigPath,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Saved HTML page, or a folder of them
    pub input: PathBuf,

    /// Output directory, defaults to `output_dir` from the settings
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Persist the overrides above to the settings file
    #[arg(long)]
    pub save: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct OverrideArgs {
    /// Base arrival time, HH:MM
    #[arg(long, value_name = "HH:MM", value_parser = parse_arrival_time)]
    pub arrival_time: Option<Time>,

    /// Maximum arrival offset in minutes, either direction
    #[arg(long, value_name = "MINUTES")]
    pub scattering: Option<u32>,

    /// Also generate the secondary engagement
    #[arg(long)]
    pub secondary: bool,

    #[arg(long, value_name = "NAME")]
    pub secondary_name: Option<String>,

    /// Secondary hours as a percentage of an 8 hour day
    #[arg(long, value_name = "PERCENT")]
    pub secondary_percent: Option<f64>,

    /// Leave breaks out of the secondary schedule
    #[arg(long)]
    pub secondary_no_breaks: bool,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Saved HTML page, or a folder of them
    pub input: PathBuf,

    /// Print the planned schedules as JSON
    #[arg(long)]
    pub json: bool,
}
