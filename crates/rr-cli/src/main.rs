use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rr_cli::commands::{add_record, import, player, players, status, team_records};
use rr_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so command output stays pipeable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Players(args) => players::run(&mut out, args, &config)?,
        Commands::Player(args) => player::run(&mut out, args, &config)?,
        Commands::AddRecord(args) => {
            add_record::run(&mut out, args, &config)?;
        }
        Commands::Import(args) => {
            import::run(io::stdin().lock(), &mut out, args, &config)?;
        }
        Commands::TeamRecords => team_records::run(&mut out, &config)?,
        Commands::Status => status::run(&mut out, &config)?,
    }

    Ok(())
}
