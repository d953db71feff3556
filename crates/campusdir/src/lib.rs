//! `campusdir` - A searchable directory of campus locations and clubs
//!
//! This library provides the catalogs, the case-insensitive search over them,
//! the search-session state machine, and the map camera logic behind the
//! `campusdir` command-line tool.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod clubs;
pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod map;
pub mod render;
pub mod state;

pub use catalog::{
    Catalog, Club, ClubCatalog, Coordinate, Entry, EntryId, EntryKind, PointOfInterest,
};
pub use config::Config;
pub use directory::{Directory, SearchOutcome};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use map::{MapView, Region};
pub use render::{OutputFormat, PresentationMode, Renderer};
pub use state::{Action, SearchPhase, SearchState};
