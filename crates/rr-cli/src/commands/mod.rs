//! CLI subcommand implementations.

pub mod add_record;
pub mod import;
pub mod player;
pub mod players;
pub mod status;
pub mod team_records;
mod util;
