//! Team records command.

use std::io::Write;

use anyhow::Result;

use super::util::{open_database, truncate};
use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    let records = db.list_team_records()?;

    writeln!(writer, "TEAM RECORDS")?;
    writeln!(writer)?;
    if records.is_empty() {
        writeln!(writer, "No team records.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:<13}  {:<10}  {:<18}  {:<22}  Date",
        "Event", "Time", "Athlete", "Race"
    )?;
    writeln!(
        writer,
        "─────────────  ──────────  ──────────────────  ──────────────────────  ──────────"
    )?;
    for record in records {
        writeln!(
            writer,
            "{:<13}  {:<10}  {:<18}  {:<22}  {}",
            truncate(&record.section, 13),
            truncate(&record.time, 10),
            truncate(&record.player_name, 18),
            truncate(&record.race_name, 22),
            record.date
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rr_db::{Database, TeamRecordRow};

    use insta::assert_snapshot;

    #[test]
    fn lists_team_records() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: temp.path().join("rr.db"),
        };
        let mut db = Database::open(&config.database_path).unwrap();
        db.upsert_team_records(&[
            TeamRecordRow {
                section: "5000m".to_string(),
                time: "14:05".to_string(),
                player_name: "Ren Sato".to_string(),
                race_name: "Autumn Meet".to_string(),
                date: "2023-10-01".to_string(),
            },
            TeamRecordRow {
                section: "Half Marathon".to_string(),
                time: "1:03:12".to_string(),
                player_name: "Aoi Tanaka".to_string(),
                race_name: "City Half".to_string(),
                date: "2024-02-11".to_string(),
            },
        ])
        .unwrap();

        let mut output = Vec::new();
        run(&mut output, &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        TEAM RECORDS

        Event          Time        Athlete             Race                    Date
        ─────────────  ──────────  ──────────────────  ──────────────────────  ──────────
        5000m          14:05       Ren Sato            Autumn Meet             2023-10-01
        Half Marathon  1:03:12     Aoi Tanaka          City Half               2024-02-11
        ");
    }

    #[test]
    fn empty_store_says_so() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: temp.path().join("rr.db"),
        };

        let mut output = Vec::new();
        run(&mut output, &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, "TEAM RECORDS\n\nNo team records.\n");
    }
}
