mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "turntable", about = "Frame sequence alignment and normalization tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a frame sequence onto a fixed canvas
    Run(commands::run::RunArgs),
    /// Compute the reference geometry without writing output
    Analyze(commands::analyze::AnalyzeArgs),
    /// Measure how well an already normalized sequence is aligned
    Check(commands::check::CheckArgs),
    /// Print or save the default pipeline config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
