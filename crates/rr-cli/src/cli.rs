//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::add_record::AddRecordArgs;
use crate::commands::import::ImportArgs;
use crate::commands::player::PlayerArgs;
use crate::commands::players::PlayersArgs;

/// Team roster and race results.
///
/// Lists athletes, shows personal bests and result history, and appends
/// new race results to the team's results store.
#[derive(Debug, Parser)]
#[command(name = "rr", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List athletes on the roster.
    Players(PlayersArgs),

    /// Show an athlete's profile, personal bests and results.
    Player(PlayerArgs),

    /// Append a race result.
    AddRecord(AddRecordArgs),

    /// Import rows as JSON lines from stdin.
    Import(ImportArgs),

    /// List the team's best marks per event.
    TeamRecords,

    /// Check the results store and show row counts.
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_record_with_defaults() {
        let cli = Cli::try_parse_from([
            "rr",
            "add-record",
            "--player",
            "p1",
            "--race",
            "Spring Meet",
            "--event",
            "5000m",
            "--time",
            "15:30",
        ])
        .unwrap();

        let Some(Commands::AddRecord(args)) = cli.command else {
            panic!("expected add-record");
        };
        assert_eq!(args.player, "p1");
        assert!(args.date.is_none());
        assert!(args.memo.is_empty());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["rr", "status", "-v", "--config", "rr.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("rr.toml")));
    }
}
