mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{count, filter, import, markers, options, summary};
use tracing_subscriber::EnvFilter;

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Summary(args) => summary::run(&cli, args),
        Commands::Options(args) => options::run(&cli, args),
        Commands::Count(args) => count::run(&cli, args),
        Commands::Filter(args) => filter::run(&cli, args),
        Commands::Markers(args) => markers::run(&cli, args),
        Commands::Import(args) => import::run(&cli, args),
    }
}

/// Log to stderr; RUST_LOG overrides the level picked by -v.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> { run() }
