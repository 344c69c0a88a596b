//! Status command for checking the results store.

use std::io::Write;

use anyhow::Result;

use super::util::open_database;
use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    let counts = db.counts()?;
    tracing::debug!(?counts, "store counts");

    writeln!(writer, "Results store status")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;
    writeln!(writer, "Players: {}", counts.players)?;
    writeln!(writer, "Records: {}", counts.records)?;
    writeln!(writer, "Team records: {}", counts.team_records)?;

    if counts.players == 0 {
        writeln!(writer)?;
        writeln!(
            writer,
            "Hint: Run 'rr import players < players.jsonl' to load the roster."
        )?;
    }

    Ok(())
}
