//! Core domain logic for the team results tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Time codec: converting `M:SS` / `H:MM:SS` race times to and from seconds
//! - Personal bests: the fastest parseable result per event
//! - Roster: athlete profiles, target times and roster filtering

pub mod event;
pub mod player;
pub mod record;
pub mod time;
pub mod types;

pub use event::Event;
pub use player::{Player, PlayerFilter, Targets, distinct_affiliations, distinct_categories};
pub use record::{
    BestRecord, ProgressionPoint, ResultRecord, best_per_category, categories, progression,
};
pub use time::{ParseFailure, format_duration, parse_duration};
pub use types::{PlayerId, RecordId, ValidationError};
