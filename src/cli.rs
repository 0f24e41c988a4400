use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Raingen stochastic rainfall generator.
#[derive(Parser)]
#[command(
    name = "raingen",
    version,
    about = "Storm-based stochastic rainfall generator for rain gauges"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Analyse each gauge and write a synthetic series per gauge.
    Generate(GenerateArgs),
    /// Interpolate gauge series onto target points with IDW.
    Interpolate(InterpolateArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "raingen.toml")]
    pub config: PathBuf,

    /// Override `[generate].output` from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override `[generate].requested_length` from config.
    #[arg(short, long)]
    pub length: Option<usize>,
}

/// Arguments for the `interpolate` subcommand.
#[derive(clap::Args)]
pub struct InterpolateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "raingen.toml")]
    pub config: PathBuf,

    /// Override `[interpolate].output` from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override global RNG seed (used when interpolating synthetic series).
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override `[generate].requested_length` for synthetic sources.
    #[arg(short, long)]
    pub length: Option<usize>,
}
