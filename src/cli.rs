//! Command line interface definitions.
//!
//! Lives in the library so completions can be generated from the same
//! definitions the binary parses.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

/// Read-along sync engine: map audio time onto sentence and word timestamps.
#[derive(Debug, Parser)]
#[command(name = "readalong", version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve playback times to sentence/word positions
    Resolve {
        /// Time index JSON file
        index: PathBuf,

        /// Times in seconds
        #[arg(required = true, allow_negative_numbers = true)]
        times: Vec<f64>,

        /// Fail if the index violates ordering invariants
        #[arg(long)]
        strict: bool,

        /// Print one JSON object per time
        #[arg(long)]
        json: bool,
    },

    /// Check a time index for ordering and interval violations
    Validate {
        /// Time index JSON file
        index: PathBuf,
    },

    /// Read along in the terminal against a silent clock
    Play {
        /// Time index JSON file
        index: PathBuf,

        /// Start position in seconds
        #[arg(long, default_value_t = 0.0)]
        start: f64,

        /// Playback speed multiplier (defaults to the configured rate)
        #[arg(long)]
        rate: Option<f64>,

        /// Media duration in seconds (defaults to the end of the last sentence)
        #[arg(long)]
        duration: Option<f64>,

        /// Fail if the index violates ordering invariants
        #[arg(long)]
        strict: bool,

        /// Print sync events as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn resolve_accepts_negative_times() {
        let cli = Cli::try_parse_from(["readalong", "resolve", "index.json", "-1.5", "2"]).unwrap();
        match cli.command {
            Commands::Resolve { times, .. } => assert_eq!(times, vec![-1.5, 2.0]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn verbose_counts_occurrences() {
        let cli = Cli::try_parse_from(["readalong", "-vv", "validate", "index.json"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn play_defaults() {
        let cli = Cli::try_parse_from(["readalong", "play", "index.json"]).unwrap();
        match cli.command {
            Commands::Play {
                start,
                rate,
                duration,
                strict,
                json,
                ..
            } => {
                assert_eq!(start, 0.0);
                assert!(rate.is_none());
                assert!(duration.is_none());
                assert!(!strict);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
