//! readalong command line entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::Level;

use readalong::cli::{Cli, Commands, ConfigCommands};

/// Install a stderr log subscriber for the requested verbosity.
#[cfg(not(tarpaulin_include))]
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Resolve {
            index,
            times,
            strict,
            json,
        } => commands::resolve::handle(&index, &times, strict, json),
        Commands::Validate { index } => commands::validate::handle(&index),
        Commands::Play {
            index,
            start,
            rate,
            duration,
            strict,
            json,
        } => commands::play::handle(&index, start, rate, duration, strict, json),
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init { force } => commands::config::handle_init(force),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
