mod cli;
mod fmt;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Abc(args) => cli::abc(args),
        Commands::Summary(args) => cli::summary(args),
        Commands::Monitor { file, top, format } => cli::monitor(file, *top, *format),
    }
}

/// RUST_LOG 優先；否則依 -v 次數決定層級
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
