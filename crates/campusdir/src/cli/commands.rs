//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::Weekday;
use clap::{Args, Subcommand, ValueEnum};

use crate::catalog::EntryKind;
use crate::render::{OutputFormat, PresentationMode};

/// Which catalog a command works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum KindArg {
    /// Campus locations
    #[default]
    Locations,
    /// Student clubs
    Clubs,
}

impl From<KindArg> for EntryKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Locations => Self::Location,
            KindArg::Clubs => Self::Club,
        }
    }
}

fn parse_weekday(value: &str) -> Result<Weekday, String> {
    value
        .parse()
        .map_err(|_| format!("'{value}' is not a day of the week"))
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// The search query (matches names and descriptions)
    pub query: String,

    /// Catalog to search
    #[arg(short, long, value_enum, default_value = "locations")]
    pub kind: KindArg,

    /// Maximum number of results (overrides configuration)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Identifier of the entry
    pub id: u32,

    /// Catalog to look in
    #[arg(short, long, value_enum, default_value = "locations")]
    pub kind: KindArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Map command arguments.
#[derive(Debug, Args)]
pub struct MapCommand {
    /// Focus the camera on this location
    #[arg(short, long)]
    pub select: Option<u32>,

    /// Fit the camera to every marker instead of the default region
    #[arg(long, conflicts_with = "select")]
    pub fit: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Clubs command arguments.
#[derive(Debug, Args)]
pub struct ClubsCommand {
    /// Expand this category
    #[arg(short, long)]
    pub expand: Option<String>,

    /// Only list clubs meeting on this day
    #[arg(short, long, value_parser = parse_weekday, conflicts_with = "expand")]
    pub day: Option<Weekday>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Browse command arguments.
#[derive(Debug, Args)]
pub struct BrowseCommand {
    /// Catalog to browse
    #[arg(short, long, value_enum, default_value = "locations")]
    pub kind: KindArg,

    /// How the session is presented
    #[arg(short, long, value_enum, default_value = "list")]
    pub mode: PresentationMode,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Catalog commands.
#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// Show catalog sizes and fingerprints
    Info {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Validate a catalog file
    Validate {
        /// Path to the catalog file (defaults to the configured catalog)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Catalog shape expected in the file
        #[arg(short, long, value_enum, default_value = "locations")]
        kind: KindArg,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_arg_conversion() {
        assert_eq!(EntryKind::from(KindArg::Locations), EntryKind::Location);
        assert_eq!(EntryKind::from(KindArg::Clubs), EntryKind::Club);
    }

    #[test]
    fn test_kind_arg_default() {
        assert_eq!(KindArg::default(), KindArg::Locations);
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("tuesday"), Ok(Weekday::Tue));
        assert_eq!(parse_weekday("Fri"), Ok(Weekday::Fri));
        assert!(parse_weekday("someday").unwrap_err().contains("someday"));
    }

    #[test]
    fn test_search_command_debug() {
        let cmd = SearchCommand {
            query: "library".to_string(),
            kind: KindArg::Locations,
            limit: None,
            format: OutputFormat::Table,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("query"));
        assert!(debug_str.contains("library"));
    }

    #[test]
    fn test_catalog_command_debug() {
        let cmd = CatalogCommand::Info { json: true };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Info"));
    }
}
