//! Command-line interface for campusdir.
//!
//! This module provides the CLI structure for the `campusdir` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{
    BrowseCommand, CatalogCommand, ClubsCommand, ConfigCommand, KindArg, MapCommand,
    SearchCommand, ShowCommand,
};

/// campusdir - Find your way around campus
///
/// Search campus locations and student clubs, and preview where things are
/// on the map.
#[derive(Debug, Parser)]
#[command(name = "campusdir")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search locations or clubs by name and description
    Search(SearchCommand),

    /// Show one entry by id
    Show(ShowCommand),

    /// Show campus markers and the camera region
    Map(MapCommand),

    /// Browse clubs by category
    Clubs(ClubsCommand),

    /// Interactive search session reading one action per line
    Browse(BrowseCommand),

    /// Inspect or validate catalogs
    #[command(subcommand)]
    Catalog(CatalogCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
