//! Storage layer for the team results tracker.
//!
//! The team's shared results sheet is kept as a local `SQLite` database with
//! one table per worksheet: `players`, `records` and `team_records`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! Wrap it in a `Mutex` or open one instance per thread for shared access.
//!
//! # Schema
//!
//! Column names follow the sheet headers (`section`, `time`, `race_name`, ...)
//! so rows can be exported back unchanged. Times are stored exactly as entered;
//! parsing happens in `rr_core` when bests are computed.
//!
//! Timestamps (`created_at`, `updated_at`) are TEXT in RFC 3339 UTC with
//! millisecond precision, e.g. `2024-01-15T10:30:00.000Z`.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use rr_core::{Player, PlayerId, ResultRecord, Targets, ValidationError};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored row failed validation.
    #[error("invalid row in {table}: {source}")]
    InvalidRow {
        table: &'static str,
        #[source]
        source: ValidationError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// A stored race result, one row of the `records` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
    pub record_id: String,
    pub player_id: String,
    pub race_name: String,
    pub date: String,
    pub section: String,
    pub time: String,
    #[serde(default)]
    pub memo: String,
    pub created_at: String,
    pub updated_at: String,
}

impl RecordRow {
    /// The fields the best-record aggregator works on.
    pub fn to_result_record(&self) -> ResultRecord {
        ResultRecord::new(&self.section, &self.time, &self.date, &self.race_name)
    }
}

/// A result to append. Identity and timestamps are assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub player_id: PlayerId,
    pub race_name: String,
    pub date: String,
    pub section: String,
    pub time: String,
    pub memo: String,
}

/// The team's best mark for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecordRow {
    pub section: String,
    pub time: String,
    pub player_name: String,
    pub race_name: String,
    pub date: String,
}

/// Row totals reported by `rr status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCounts {
    /// Players not marked deleted.
    pub players: i64,
    pub records: i64,
    pub team_records: i64,
}

const PLAYER_COLUMNS: &str = "
    id, name, registration_number, affiliation, category, comment,
    target_1500m, target_3000m, target_5000m, target_10000m, target_half, target_full,
    is_deleted
";

const RECORD_COLUMNS: &str =
    "record_id, player_id, race_name, date, section, time, memo, created_at, updated_at";

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS players (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                registration_number TEXT,
                affiliation TEXT,
                category TEXT,
                comment TEXT,
                target_1500m TEXT,
                target_3000m TEXT,
                target_5000m TEXT,
                target_10000m TEXT,
                target_half TEXT,
                target_full TEXT,
                is_deleted INTEGER NOT NULL DEFAULT 0
            );

            -- Records table: one row per race result
            -- date: ISO 8601 date (e.g., '2024-01-15')
            -- section: event label (e.g., '5000m')
            -- time: display string as entered, not validated
            CREATE TABLE IF NOT EXISTS records (
                record_id TEXT PRIMARY KEY,
                player_id TEXT NOT NULL,
                race_name TEXT NOT NULL,
                date TEXT NOT NULL,
                section TEXT NOT NULL,
                time TEXT NOT NULL,
                memo TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_records_player ON records(player_id);
            CREATE INDEX IF NOT EXISTS idx_records_date ON records(date);

            CREATE TABLE IF NOT EXISTS team_records (
                section TEXT PRIMARY KEY,
                time TEXT NOT NULL,
                player_name TEXT NOT NULL,
                race_name TEXT NOT NULL,
                date TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Inserts or updates players by ID.
    ///
    /// Updating keeps a player's position in the roster order.
    pub fn upsert_players(&mut self, players: &[Player]) -> Result<usize, DbError> {
        if players.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut written = 0;
        {
            let mut stmt = tx.prepare(
                "
                INSERT INTO players
                (id, name, registration_number, affiliation, category, comment,
                 target_1500m, target_3000m, target_5000m, target_10000m, target_half, target_full,
                 is_deleted)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    registration_number = excluded.registration_number,
                    affiliation = excluded.affiliation,
                    category = excluded.category,
                    comment = excluded.comment,
                    target_1500m = excluded.target_1500m,
                    target_3000m = excluded.target_3000m,
                    target_5000m = excluded.target_5000m,
                    target_10000m = excluded.target_10000m,
                    target_half = excluded.target_half,
                    target_full = excluded.target_full,
                    is_deleted = excluded.is_deleted
                ",
            )?;
            for player in players {
                written += stmt.execute(params![
                    player.id.as_str(),
                    player.name,
                    player.registration_number,
                    player.affiliation,
                    player.category,
                    player.comment,
                    player.targets.m1500,
                    player.targets.m3000,
                    player.targets.m5000,
                    player.targets.m10000,
                    player.targets.half,
                    player.targets.full,
                    player.is_deleted,
                ])?;
            }
        }
        tx.commit()?;
        Ok(written)
    }

    /// Lists players that are not deleted, in roster order.
    pub fn list_players(&self) -> Result<Vec<Player>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE is_deleted = 0 ORDER BY rowid ASC"
        ))?;
        let rows = stmt.query_map([], raw_player)?;
        let mut players = Vec::new();
        for row in rows {
            players.push(row?.into_player()?);
        }
        Ok(players)
    }

    /// Looks up a player by ID. Deleted players are not found.
    pub fn get_player(&self, id: &str) -> Result<Option<Player>, DbError> {
        let raw = self
            .conn
            .query_row(
                &format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ? AND is_deleted = 0"),
                [id],
                raw_player,
            )
            .optional()?;
        raw.map(RawPlayer::into_player).transpose()
    }

    /// Appends a result with a fresh record ID, stamped with the current time.
    pub fn add_record(&mut self, record: &NewRecord) -> Result<RecordRow, DbError> {
        self.add_record_at(record, Utc::now())
    }

    fn add_record_at(
        &mut self,
        record: &NewRecord,
        now: DateTime<Utc>,
    ) -> Result<RecordRow, DbError> {
        let now = format_timestamp(now);
        let row = RecordRow {
            record_id: Uuid::new_v4().to_string(),
            player_id: record.player_id.to_string(),
            race_name: record.race_name.clone(),
            date: record.date.clone(),
            section: record.section.clone(),
            time: record.time.clone(),
            memo: record.memo.clone(),
            created_at: now.clone(),
            updated_at: now,
        };
        self.conn.execute(
            &format!("INSERT INTO records ({RECORD_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"),
            params![
                row.record_id,
                row.player_id,
                row.race_name,
                row.date,
                row.section,
                row.time,
                row.memo,
                row.created_at,
                row.updated_at,
            ],
        )?;
        tracing::debug!(record_id = %row.record_id, player_id = %row.player_id, "record appended");
        Ok(row)
    }

    /// Inserts a batch of existing records, ignoring duplicates by record ID.
    pub fn insert_records(&mut self, records: &[RecordRow]) -> Result<usize, DbError> {
        if records.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT OR IGNORE INTO records ({RECORD_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ))?;
            for record in records {
                inserted += stmt.execute(params![
                    record.record_id,
                    record.player_id,
                    record.race_name,
                    record.date,
                    record.section,
                    record.time,
                    record.memo,
                    record.created_at,
                    record.updated_at,
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Lists records ordered by race date, then entry time.
    ///
    /// With `player_id`, only that player's records are returned.
    pub fn list_records(&self, player_id: Option<&str>) -> Result<Vec<RecordRow>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {RECORD_COLUMNS}
            FROM records
            WHERE ?1 IS NULL OR player_id = ?1
            ORDER BY date ASC, created_at ASC, rowid ASC
            "
        ))?;
        let rows = stmt.query_map([player_id], record_row)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Inserts or replaces team records by event.
    pub fn upsert_team_records(&mut self, records: &[TeamRecordRow]) -> Result<usize, DbError> {
        if records.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut written = 0;
        {
            let mut stmt = tx.prepare(
                "
                INSERT INTO team_records (section, time, player_name, race_name, date)
                VALUES (?, ?, ?, ?, ?)
                ON CONFLICT(section) DO UPDATE SET
                    time = excluded.time,
                    player_name = excluded.player_name,
                    race_name = excluded.race_name,
                    date = excluded.date
                ",
            )?;
            for record in records {
                written += stmt.execute(params![
                    record.section,
                    record.time,
                    record.player_name,
                    record.race_name,
                    record.date,
                ])?;
            }
        }
        tx.commit()?;
        Ok(written)
    }

    /// Lists team records in insertion order.
    pub fn list_team_records(&self) -> Result<Vec<TeamRecordRow>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT section, time, player_name, race_name, date
            FROM team_records
            ORDER BY rowid ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(TeamRecordRow {
                section: row.get(0)?,
                time: row.get(1)?,
                player_name: row.get(2)?,
                race_name: row.get(3)?,
                date: row.get(4)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Counts rows per table.
    pub fn counts(&self) -> Result<StoreCounts, DbError> {
        let players = self.conn.query_row(
            "SELECT COUNT(*) FROM players WHERE is_deleted = 0",
            [],
            |row| row.get(0),
        )?;
        let records = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        let team_records = self
            .conn
            .query_row("SELECT COUNT(*) FROM team_records", [], |row| row.get(0))?;
        Ok(StoreCounts {
            players,
            records,
            team_records,
        })
    }
}

/// Player columns as read, before ID validation.
struct RawPlayer {
    id: String,
    name: String,
    registration_number: Option<String>,
    affiliation: Option<String>,
    category: Option<String>,
    comment: Option<String>,
    targets: Targets,
    is_deleted: bool,
}

impl RawPlayer {
    fn into_player(self) -> Result<Player, DbError> {
        let id = PlayerId::new(self.id).map_err(|source| DbError::InvalidRow {
            table: "players",
            source,
        })?;
        Ok(Player {
            id,
            name: self.name,
            registration_number: self.registration_number,
            affiliation: self.affiliation,
            category: self.category,
            comment: self.comment,
            targets: self.targets,
            is_deleted: self.is_deleted,
        })
    }
}

fn raw_player(row: &Row<'_>) -> rusqlite::Result<RawPlayer> {
    Ok(RawPlayer {
        id: row.get(0)?,
        name: row.get(1)?,
        registration_number: row.get(2)?,
        affiliation: row.get(3)?,
        category: row.get(4)?,
        comment: row.get(5)?,
        targets: Targets {
            m1500: row.get(6)?,
            m3000: row.get(7)?,
            m5000: row.get(8)?,
            m10000: row.get(9)?,
            half: row.get(10)?,
            full: row.get(11)?,
        },
        is_deleted: row.get(12)?,
    })
}

fn record_row(row: &Row<'_>) -> rusqlite::Result<RecordRow> {
    Ok(RecordRow {
        record_id: row.get(0)?,
        player_id: row.get(1)?,
        race_name: row.get(2)?,
        date: row.get(3)?,
        section: row.get(4)?,
        time: row.get(5)?,
        memo: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
