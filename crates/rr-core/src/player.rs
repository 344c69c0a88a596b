//! Team roster: athlete profiles and roster filtering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::types::PlayerId;

/// Target times an athlete is working towards, one per standard event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m1500: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m3000: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m5000: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m10000: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
}

impl Targets {
    /// Set targets in standard event order. Blank strings count as unset.
    pub fn entries(&self) -> Vec<(Event, &str)> {
        let slots = [
            &self.m1500,
            &self.m3000,
            &self.m5000,
            &self.m10000,
            &self.half,
            &self.full,
        ];
        Event::STANDARD
            .into_iter()
            .zip(slots)
            .filter_map(|(event, target)| {
                let target = target.as_deref()?.trim();
                (!target.is_empty()).then_some((event, target))
            })
            .collect()
    }
}

/// One athlete on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub targets: Targets,
    /// Soft-delete flag. Deleted players stay in the store but are never listed.
    #[serde(default)]
    pub is_deleted: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            registration_number: None,
            affiliation: None,
            category: None,
            comment: None,
            targets: Targets::default(),
            is_deleted: false,
        }
    }

    /// `"{name} ({registration number})"`, with `-` when no number is set.
    pub fn display_label(&self) -> String {
        format!(
            "{} ({})",
            self.name,
            self.registration_number.as_deref().unwrap_or("-")
        )
    }
}

/// Roster filter. Unset fields match every player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    /// Case-insensitive substring of the name.
    pub search: Option<String>,
    pub affiliation: Option<String>,
    pub category: Option<String>,
}

impl PlayerFilter {
    pub fn matches(&self, player: &Player) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => player
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        };
        search_ok
            && field_matches(self.affiliation.as_deref(), player.affiliation.as_deref())
            && field_matches(self.category.as_deref(), player.category.as_deref())
    }

    /// Keeps matching players in their original order.
    pub fn apply<'a>(&self, players: &'a [Player]) -> Vec<&'a Player> {
        players.iter().filter(|player| self.matches(player)).collect()
    }
}

fn field_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    wanted.is_none_or(|wanted| actual == Some(wanted))
}

/// Sorted distinct affiliations across the roster.
pub fn distinct_affiliations(players: &[Player]) -> Vec<&str> {
    distinct(players.iter().filter_map(|p| p.affiliation.as_deref()))
}

/// Sorted distinct roster categories.
pub fn distinct_categories(players: &[Player]) -> Vec<&str> {
    distinct(players.iter().filter_map(|p| p.category.as_deref()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    values
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, name: &str, affiliation: &str, category: &str) -> Player {
        let mut player = Player::new(PlayerId::new(id).unwrap(), name);
        player.affiliation = Some(affiliation.to_string());
        player.category = Some(category.to_string());
        player
    }

    fn roster() -> Vec<Player> {
        vec![
            player("p1", "Aoi Tanaka", "Kanto Univ", "Senior"),
            player("p2", "Ren Sato", "Tohoku AC", "Junior"),
            player("p3", "Hana Tanabe", "Kanto Univ", "Junior"),
        ]
    }

    fn ids(players: &[&Player]) -> Vec<String> {
        players.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn empty_filter_keeps_everyone() {
        let players = roster();
        assert_eq!(PlayerFilter::default().apply(&players).len(), 3);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let players = roster();
        let filter = PlayerFilter {
            search: Some("tana".to_string()),
            ..PlayerFilter::default()
        };
        assert_eq!(ids(&filter.apply(&players)), vec!["p1", "p3"]);
    }

    #[test]
    fn blank_search_is_ignored() {
        let players = roster();
        let filter = PlayerFilter {
            search: Some("  ".to_string()),
            ..PlayerFilter::default()
        };
        assert_eq!(filter.apply(&players).len(), 3);
    }

    #[test]
    fn filters_combine() {
        let players = roster();
        let filter = PlayerFilter {
            search: None,
            affiliation: Some("Kanto Univ".to_string()),
            category: Some("Junior".to_string()),
        };
        assert_eq!(ids(&filter.apply(&players)), vec!["p3"]);
    }

    #[test]
    fn affiliation_filter_skips_players_without_one() {
        let mut players = roster();
        players[1].affiliation = None;
        let filter = PlayerFilter {
            affiliation: Some("Tohoku AC".to_string()),
            ..PlayerFilter::default()
        };
        assert!(filter.apply(&players).is_empty());
    }

    #[test]
    fn distinct_values_are_sorted() {
        let players = roster();
        assert_eq!(distinct_affiliations(&players), vec!["Kanto Univ", "Tohoku AC"]);
        assert_eq!(distinct_categories(&players), vec!["Junior", "Senior"]);
    }

    #[test]
    fn display_label_falls_back_to_dash() {
        let mut player = player("p1", "Aoi Tanaka", "Kanto Univ", "Senior");
        assert_eq!(player.display_label(), "Aoi Tanaka (-)");
        player.registration_number = Some("R-12".to_string());
        assert_eq!(player.display_label(), "Aoi Tanaka (R-12)");
    }

    #[test]
    fn target_entries_skip_unset_and_blank() {
        let targets = Targets {
            m5000: Some("15:00".to_string()),
            m10000: Some(" ".to_string()),
            half: Some("1:05:00".to_string()),
            ..Targets::default()
        };
        let entries: Vec<(String, &str)> = targets
            .entries()
            .into_iter()
            .map(|(event, time)| (event.to_string(), time))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("5000m".to_string(), "15:00"),
                ("Half Marathon".to_string(), "1:05:00"),
            ]
        );
    }

    #[test]
    fn player_deserializes_with_defaults() {
        let json = r#"{"id":"p9","name":"Kai Mori"}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.id.as_str(), "p9");
        assert!(!player.is_deleted);
        assert!(player.targets.entries().is_empty());
    }
}
