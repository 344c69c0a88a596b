//! Race results and per-event personal bests.
//!
//! Everything here is a pure function over borrowed input: nothing is
//! mutated and no state is kept between calls.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};

use crate::time::{ParseFailure, parse_duration};

/// One timed result as entered by a human.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Event bucket, e.g. `5000m` or `Half Marathon`. Compared by exact string.
    pub category: String,
    /// Time as entered, `M:SS[.ff]` or `H:MM:SS[.ff]`. May be malformed.
    pub display_time: String,
    /// ISO 8601 date (`YYYY-MM-DD`).
    pub date: String,
    pub competition_name: String,
}

impl ResultRecord {
    pub fn new(
        category: impl Into<String>,
        display_time: impl Into<String>,
        date: impl Into<String>,
        competition_name: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            display_time: display_time.into(),
            date: date.into(),
            competition_name: competition_name.into(),
        }
    }

    /// Parses the display time into seconds.
    pub fn duration(&self) -> Result<f64, ParseFailure> {
        parse_duration(&self.display_time)
    }
}

/// The fastest parseable result within one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestRecord {
    pub category: String,
    /// The winning record's time exactly as it was entered.
    pub display_time: String,
    pub duration_seconds: f64,
    pub date: String,
    pub competition_name: String,
}

impl BestRecord {
    fn from_record(record: &ResultRecord, duration_seconds: f64) -> Self {
        Self {
            category: record.category.clone(),
            display_time: record.display_time.clone(),
            duration_seconds,
            date: record.date.clone(),
            competition_name: record.competition_name.clone(),
        }
    }
}

/// Selects the minimum-duration record of every category.
///
/// Records whose time does not parse are skipped. A category with no
/// parseable records gets no entry. When several records tie on the minimum,
/// the first one in input order wins.
pub fn best_per_category(records: &[ResultRecord]) -> BTreeMap<String, BestRecord> {
    let mut bests: BTreeMap<String, BestRecord> = BTreeMap::new();

    for record in records {
        let duration = match record.duration() {
            Ok(duration) => duration,
            Err(err) => {
                tracing::debug!(category = %record.category, %err, "skipping unparseable result");
                continue;
            }
        };

        match bests.entry(record.category.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(BestRecord::from_record(record, duration));
            }
            Entry::Occupied(mut slot) => {
                // Strictly faster only: ties keep the earlier record.
                if duration < slot.get().duration_seconds {
                    slot.insert(BestRecord::from_record(record, duration));
                }
            }
        }
    }

    bests
}

/// Distinct categories in order of first appearance.
pub fn categories(records: &[ResultRecord]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for record in records {
        if !seen.contains(&record.category.as_str()) {
            seen.push(&record.category);
        }
    }
    seen
}

/// One point of an athlete's results-over-time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionPoint {
    pub date: String,
    pub duration_seconds: f64,
    pub display_time: String,
    pub competition_name: String,
}

/// Parseable results of one category ordered by date.
///
/// Results on the same date keep their input order.
pub fn progression(records: &[ResultRecord], category: &str) -> Vec<ProgressionPoint> {
    let mut points: Vec<ProgressionPoint> = records
        .iter()
        .filter(|record| record.category == category)
        .filter_map(|record| {
            let duration_seconds = record.duration().ok()?;
            Some(ProgressionPoint {
                date: record.date.clone(),
                duration_seconds,
                display_time: record.display_time.clone(),
                competition_name: record.competition_name.clone(),
            })
        })
        .collect();
    points.sort_by(|a, b| a.date.cmp(&b.date));
    points
}
