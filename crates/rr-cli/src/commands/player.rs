//! Player command: profile, targets, personal bests and result history.

use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Serialize;

use rr_core::{
    BestRecord, Event, Player, ProgressionPoint, ResultRecord, best_per_category, categories,
    progression,
};
use rr_db::{Database, RecordRow};

use super::util::{open_database, truncate};
use crate::Config;

#[derive(Debug, Args)]
pub struct PlayerArgs {
    /// Player ID.
    pub id: String,

    /// Event for the progression section. Defaults to the athlete's first event.
    #[arg(long)]
    pub event: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Everything shown on an athlete's page.
#[derive(Debug, Serialize)]
pub struct PlayerDetail {
    pub player: Player,
    pub bests: BTreeMap<String, BestRecord>,
    pub progression_event: Option<String>,
    pub progression: Vec<ProgressionPoint>,
    /// Newest first.
    pub records: Vec<RecordRow>,
}

/// Loads a player and derives bests and progression from their records.
pub fn build_detail(db: &Database, id: &str, event: Option<&str>) -> Result<PlayerDetail> {
    let Some(player) = db.get_player(id)? else {
        bail!("player not found: {id}");
    };

    let mut records = db.list_records(Some(id))?;
    let results: Vec<ResultRecord> = records.iter().map(RecordRow::to_result_record).collect();
    let bests = best_per_category(&results);

    let progression_event = match event {
        Some(event) => Some(
            event
                .parse::<Event>()
                .with_context(|| format!("invalid event: {event:?}"))?
                .to_string(),
        ),
        None => categories(&results).first().map(|c| (*c).to_string()),
    };
    let progression = progression_event
        .as_deref()
        .map(|event| progression(&results, event))
        .unwrap_or_default();

    records.reverse();
    tracing::debug!(
        player = %player.id,
        records = records.len(),
        bests = bests.len(),
        "built player detail"
    );

    Ok(PlayerDetail {
        player,
        bests,
        progression_event,
        progression,
        records,
    })
}

pub fn run<W: Write>(writer: &mut W, args: &PlayerArgs, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    let detail = build_detail(&db, &args.id, args.event.as_deref())?;

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&detail)?)?;
    } else {
        write_detail(writer, &detail)?;
    }
    Ok(())
}

/// Writes the human-readable athlete page.
pub fn write_detail<W: Write>(writer: &mut W, detail: &PlayerDetail) -> io::Result<()> {
    let player = &detail.player;
    writeln!(writer, "{}", player.name)?;
    writeln!(writer, "ID:           {}", player.id)?;
    writeln!(
        writer,
        "Registration: {}",
        player.registration_number.as_deref().unwrap_or("-")
    )?;
    writeln!(
        writer,
        "Affiliation:  {}",
        player.affiliation.as_deref().unwrap_or("-")
    )?;
    writeln!(
        writer,
        "Category:     {}",
        player.category.as_deref().unwrap_or("-")
    )?;
    if let Some(comment) = player.comment.as_deref().filter(|c| !c.trim().is_empty()) {
        writeln!(writer, "Comment:      {comment}")?;
    }
    writeln!(writer)?;

    writeln!(writer, "TARGETS")?;
    let targets = player.targets.entries();
    if targets.is_empty() {
        writeln!(writer, "None set.")?;
    }
    for (event, time) in targets {
        writeln!(writer, "- {event}: {time}")?;
    }
    writeln!(writer)?;

    if detail.records.is_empty() {
        writeln!(writer, "No records yet.")?;
        return Ok(());
    }

    writeln!(writer, "PERSONAL BESTS")?;
    if detail.bests.is_empty() {
        writeln!(writer, "No results with a valid time.")?;
    }
    for best in detail.bests.values() {
        writeln!(
            writer,
            "- {}: {} ({} {})",
            best.category, best.display_time, best.date, best.competition_name
        )?;
    }
    writeln!(writer)?;

    if let Some(event) = &detail.progression_event {
        writeln!(writer, "PROGRESSION: {event}")?;
        if detail.progression.is_empty() {
            writeln!(writer, "No results with a valid time.")?;
        }
        for point in &detail.progression {
            let line = format!(
                "{:<10}  {:<10}  {:>9.2}s  {}",
                point.date, point.display_time, point.duration_seconds, point.competition_name
            );
            writeln!(writer, "{}", line.trim_end())?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "RECORDS")?;
    let header = format!(
        "{:<10}  {:<13}  {:<10}  {:<22}  {}",
        "Date", "Event", "Time", "Race", "Memo"
    );
    writeln!(writer, "{header}")?;
    writeln!(
        writer,
        "──────────  ─────────────  ──────────  ──────────────────────  ────"
    )?;
    for record in &detail.records {
        let line = format!(
            "{:<10}  {:<13}  {:<10}  {:<22}  {}",
            record.date,
            truncate(&record.section, 13),
            truncate(&record.time, 10),
            truncate(&record.race_name, 22),
            record.memo
        );
        writeln!(writer, "{}", line.trim_end())?;
    }

    Ok(())
}
