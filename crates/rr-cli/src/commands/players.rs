//! Players command for listing and filtering the roster.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

use rr_core::{Player, PlayerFilter, distinct_affiliations, distinct_categories};

use super::util::open_database;
use crate::Config;

#[derive(Debug, Args)]
pub struct PlayersArgs {
    /// Case-insensitive search on the athlete's name.
    #[arg(long)]
    pub search: Option<String>,

    /// Only athletes with this affiliation.
    #[arg(long)]
    pub affiliation: Option<String>,

    /// Only athletes in this roster category.
    #[arg(long)]
    pub category: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

impl PlayersArgs {
    fn filter(&self) -> PlayerFilter {
        PlayerFilter {
            search: self.search.clone(),
            affiliation: self.affiliation.clone(),
            category: self.category.clone(),
        }
    }
}

pub fn run<W: Write>(writer: &mut W, args: &PlayersArgs, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    let roster = db.list_players()?;
    let filter = args.filter();
    let shown = filter.apply(&roster);
    tracing::debug!(?filter, total = roster.len(), shown = shown.len(), "filtered roster");

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&shown)?)?;
    } else {
        write_players(writer, &shown, &roster)?;
    }
    Ok(())
}

/// Writes the human-readable roster listing.
pub fn write_players<W: Write>(writer: &mut W, shown: &[&Player], roster: &[Player]) -> io::Result<()> {
    if roster.is_empty() {
        writeln!(writer, "No athletes on the roster.")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "Hint: Run 'rr import players < players.jsonl' to load the roster."
        )?;
        return Ok(());
    }

    writeln!(writer, "{} of {} athletes", shown.len(), roster.len())?;
    let affiliations = distinct_affiliations(roster);
    if !affiliations.is_empty() {
        writeln!(writer, "Affiliations: {}", affiliations.join(", "))?;
    }
    let categories = distinct_categories(roster);
    if !categories.is_empty() {
        writeln!(writer, "Categories: {}", categories.join(", "))?;
    }
    writeln!(writer)?;

    if shown.is_empty() {
        writeln!(writer, "No athletes match the filter.")?;
        return Ok(());
    }

    for player in shown {
        writeln!(writer, "{}", player.display_label())?;
        writeln!(writer, "  ID:          {}", player.id)?;
        writeln!(
            writer,
            "  Affiliation: {}",
            player.affiliation.as_deref().unwrap_or("-")
        )?;
        writeln!(
            writer,
            "  Category:    {}",
            player.category.as_deref().unwrap_or("-")
        )?;
        writeln!(writer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rr_core::PlayerId;
    use rr_db::Database;

    use insta::assert_snapshot;

    fn seed(config: &Config) {
        let mut db = Database::open(&config.database_path).unwrap();
        let mut aoi = Player::new(PlayerId::new("p1").unwrap(), "Aoi Tanaka");
        aoi.registration_number = Some("R-01".to_string());
        aoi.affiliation = Some("Kanto Univ".to_string());
        aoi.category = Some("Senior".to_string());
        let mut ren = Player::new(PlayerId::new("p2").unwrap(), "Ren Sato");
        ren.affiliation = Some("Tohoku AC".to_string());
        ren.category = Some("Junior".to_string());
        let mut gone = Player::new(PlayerId::new("p3").unwrap(), "Retired Runner");
        gone.is_deleted = true;
        db.upsert_players(&[aoi, ren, gone]).unwrap();
    }

    fn args() -> PlayersArgs {
        PlayersArgs {
            search: None,
            affiliation: None,
            category: None,
            json: false,
        }
    }

    fn run_to_string(args: &PlayersArgs, config: &Config) -> String {
        let mut output = Vec::new();
        run(&mut output, args, config).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn lists_active_players() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: temp.path().join("rr.db"),
        };
        seed(&config);

        let output = run_to_string(&args(), &config);
        assert_snapshot!(output, @r"
        2 of 2 athletes
        Affiliations: Kanto Univ, Tohoku AC
        Categories: Junior, Senior

        Aoi Tanaka (R-01)
          ID:          p1
          Affiliation: Kanto Univ
          Category:    Senior

        Ren Sato (-)
          ID:          p2
          Affiliation: Tohoku AC
          Category:    Junior
        ");
    }

    #[test]
    fn filter_with_no_match_says_so() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: temp.path().join("rr.db"),
        };
        seed(&config);

        let args = PlayersArgs {
            search: Some("sato".to_string()),
            affiliation: Some("Kanto Univ".to_string()),
            ..args()
        };
        let output = run_to_string(&args, &config);
        assert!(output.starts_with("0 of 2 athletes\n"));
        assert!(output.contains("No athletes match the filter."));
    }

    #[test]
    fn json_output_contains_filtered_players() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: temp.path().join("rr.db"),
        };
        seed(&config);

        let args = PlayersArgs {
            category: Some("Junior".to_string()),
            json: true,
            ..args()
        };
        let output = run_to_string(&args, &config);
        let parsed: Vec<Player> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "Ren Sato");
    }

    #[test]
    fn empty_roster_hints_at_import() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: temp.path().join("rr.db"),
        };

        let output = run_to_string(&args(), &config);
        assert!(output.starts_with("No athletes on the roster."));
    }
}
