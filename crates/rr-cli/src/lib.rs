//! Team results CLI library.
//!
//! This crate provides the `rr` command-line interface over the results store.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
