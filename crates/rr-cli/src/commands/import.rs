//! Import command for loading sheet rows into the local `SQLite` store.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use clap::{Args, ValueEnum};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use rr_core::Player;
use rr_db::{RecordRow, TeamRecordRow};

use super::util::open_database;
use crate::Config;

/// Which worksheet the rows belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportKind {
    Players,
    Records,
    TeamRecords,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Kind of rows on stdin.
    #[arg(value_enum)]
    pub kind: ImportKind,
}

pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    args: &ImportArgs,
    config: &Config,
) -> Result<usize> {
    let mut db = open_database(config)?;
    let (read, written, noun) = match args.kind {
        ImportKind::Players => {
            let players: Vec<Player> = parse_lines(reader)?;
            (players.len(), db.upsert_players(&players)?, "players")
        }
        ImportKind::Records => {
            let imported: Vec<ImportRecord> = parse_lines(reader)?;
            let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            let records: Vec<RecordRow> = imported
                .into_iter()
                .map(|record| record.into_row(&now))
                .collect();
            (records.len(), db.insert_records(&records)?, "records")
        }
        ImportKind::TeamRecords => {
            let records: Vec<TeamRecordRow> = parse_lines(reader)?;
            (records.len(), db.upsert_team_records(&records)?, "team records")
        }
    };

    tracing::debug!(read, written, kind = ?args.kind, "import finished");
    writeln!(writer, "Imported {written} of {read} {noun}")?;
    Ok(written)
}

/// Parses one JSON object per line, skipping blank lines.
fn parse_lines<T: DeserializeOwned, R: BufRead>(reader: R) -> Result<Vec<T>> {
    let mut rows = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let row = serde_json::from_str(trimmed)
            .with_context(|| format!("invalid row on line {}", idx + 1))?;
        rows.push(row);
    }
    Ok(rows)
}

/// A `records` sheet row. Timestamps are optional in hand-written files.
#[derive(Debug, Deserialize)]
struct ImportRecord {
    record_id: String,
    player_id: String,
    race_name: String,
    date: String,
    section: String,
    time: String,
    #[serde(default)]
    memo: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl ImportRecord {
    fn into_row(self, now: &str) -> RecordRow {
        let created_at = self.created_at.unwrap_or_else(|| now.to_string());
        let updated_at = self.updated_at.unwrap_or_else(|| created_at.clone());
        RecordRow {
            record_id: self.record_id,
            player_id: self.player_id,
            race_name: self.race_name,
            date: self.date,
            section: self.section,
            time: self.time,
            memo: self.memo,
            created_at,
            updated_at,
        }
    }
}
