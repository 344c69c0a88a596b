//! Add-record command for appending a race result.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Args;

use rr_core::{Event, PlayerId, parse_duration};
use rr_db::{NewRecord, RecordRow};

use super::util::{open_database, parse_date};
use crate::Config;

#[derive(Debug, Args)]
pub struct AddRecordArgs {
    /// Player ID.
    #[arg(long)]
    pub player: String,

    /// Race name.
    #[arg(long)]
    pub race: String,

    /// Event: 1500m, 3000m, 5000m, 10000m, half, marathon, or any other name.
    #[arg(long)]
    pub event: String,

    /// Finish time, e.g. 15:30 or 1:05:30.
    #[arg(long)]
    pub time: String,

    /// Race date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<String>,

    /// Notes on conditions, pacing, etc.
    #[arg(long, default_value = "")]
    pub memo: String,
}

pub fn run<W: Write>(writer: &mut W, args: &AddRecordArgs, config: &Config) -> Result<RecordRow> {
    let race_name = args.race.trim();
    if race_name.is_empty() {
        bail!("race name cannot be empty");
    }
    let time = args.time.trim();
    if time.is_empty() {
        bail!("time cannot be empty");
    }
    let event: Event = args
        .event
        .parse()
        .with_context(|| format!("invalid event: {:?}", args.event))?;
    let player_id = PlayerId::new(args.player.as_str()).context("invalid player")?;
    let date = match args.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => Local::now().date_naive(),
    };

    let mut db = open_database(config)?;
    let Some(player) = db.get_player(player_id.as_str())? else {
        bail!("player not found: {player_id}");
    };

    // Stored as entered either way; only parseable times count towards bests.
    if let Err(err) = parse_duration(time) {
        tracing::warn!(%err, "storing result with unparseable time");
        writeln!(
            writer,
            "Warning: {time:?} is not a M:SS or H:MM:SS time and will not count towards personal bests."
        )?;
    }

    let row = db.add_record(&NewRecord {
        player_id,
        race_name: race_name.to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        section: event.to_string(),
        time: time.to_string(),
        memo: args.memo.trim().to_string(),
    })?;

    writeln!(
        writer,
        "Recorded {} {} for {} at {} on {}",
        row.section,
        row.time,
        player.display_label(),
        row.race_name,
        row.date
    )?;
    writeln!(writer, "Record ID: {}", row.record_id)?;
    Ok(row)
}
