//! Immutable catalogs of directory entries.
//!
//! A [`Catalog`] is built once, validated as a whole, and never mutated
//! afterwards. Entries are anything implementing [`Entry`]; entries with a
//! map position also implement [`Located`].
//!
//! Catalogs come either from the embedded seed (see [`seed`]) or from a JSON
//! file. Both paths go through the same validation, so a malformed record is
//! rejected at startup with an error naming it.

mod club;
mod location;
pub mod seed;

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub use club::{Club, ClubCatalog, ClubCategory, MeetingTime};
pub use location::{Coordinate, PointOfInterest};

/// Identifier of a catalog entry, unique within its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u32);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EntryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Which catalog an entry type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Campus locations with map coordinates.
    #[default]
    Location,
    /// Student clubs and societies.
    Club,
}

impl EntryKind {
    /// Plural noun used in user-facing messages.
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Self::Location => "locations",
            Self::Club => "clubs",
        }
    }

    /// Prompt shown while no search is active.
    #[must_use]
    pub fn idle_hint(self) -> &'static str {
        match self {
            Self::Location => {
                "Find La Trobe University locations like Library, Agora, Sports Centre, and more"
            }
            Self::Club => "Discover and join amazing communities",
        }
    }

    /// Example queries offered when a search finds nothing.
    #[must_use]
    pub fn suggestions(self) -> &'static [&'static str] {
        match self {
            Self::Location => &["Library", "Agora", "Sports", "College"],
            Self::Club => &["Society", "Club", "Support"],
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location => write!(f, "location"),
            Self::Club => write!(f, "club"),
        }
    }
}

/// A searchable directory record.
pub trait Entry {
    /// The catalog this entry type belongs to.
    const KIND: EntryKind;

    /// Unique identifier.
    fn id(&self) -> EntryId;

    /// Display name. Must be non-empty.
    fn name(&self) -> &str;

    /// Free-text description. May be empty.
    fn description(&self) -> &str;

    /// Extra labelled fields shown in detail views.
    fn details(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Type-specific validation, run once when the catalog is built.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the record is malformed.
    fn check(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// An entry with a position on the map.
pub trait Located: Entry {
    /// Where the entry sits.
    fn coordinate(&self) -> Coordinate;
}

/// An ordered, validated, immutable collection of entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<T> {
    entries: Vec<T>,
}

impl<T: Entry> Catalog<T> {
    /// Build a catalog, validating every record and id uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCatalogEntry`] for the first malformed record
    /// and [`Error::DuplicateId`] when two records share an id.
    pub fn new(entries: Vec<T>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.name().trim().is_empty() {
                return Err(Error::invalid_entry(entry.id(), entry.name(), "name is empty"));
            }
            entry
                .check()
                .map_err(|reason| Error::invalid_entry(entry.id(), entry.name(), reason))?;
            if !seen.insert(entry.id()) {
                return Err(Error::DuplicateId { id: entry.id() });
            }
        }
        debug!(kind = %T::KIND, entries = entries.len(), "Catalog built");
        Ok(Self { entries })
    }

    /// All entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Iterate over entries in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&T> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Entry + DeserializeOwned> Catalog<T> {
    /// Parse a catalog from a JSON array of entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any record is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
        Self::new(decode_records(records)?)
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Decode raw JSON records one by one.
///
/// A record that does not fit `T` is reported as
/// [`Error::InvalidCatalogEntry`] carrying its raw `id` and `name`. When the
/// record has no usable id, its position in the array stands in.
pub(crate) fn decode_records<T: DeserializeOwned>(
    records: Vec<serde_json::Value>,
) -> Result<Vec<T>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let id = record
                .get("id")
                .and_then(serde_json::Value::as_u64)
                .and_then(|id| u32::try_from(id).ok())
                .or_else(|| u32::try_from(index).ok())
                .map_or(EntryId(u32::MAX), EntryId);
            let name = record
                .get("name")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            serde_json::from_value(record).map_err(|err| {
                Error::invalid_entry(id, name, format!("record {index}: {err}"))
            })
        })
        .collect()
}

impl<T: Serialize> Catalog<T> {
    /// BLAKE3 digest of the catalog's canonical JSON form.
    ///
    /// Identifies which revision of the seed data is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn fingerprint(&self) -> Result<String> {
        let json = serde_json::to_vec(&self.entries)?;
        Ok(blake3::hash(&json).to_hex().to_string())
    }
}

impl<'a, T> IntoIterator for &'a Catalog<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Load the location catalog from `path`, or the embedded seed when unset.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds an invalid record.
pub fn load_locations(path: Option<&Path>) -> Result<Catalog<PointOfInterest>> {
    let catalog = match path {
        Some(path) => {
            info!(path = %path.display(), "Loading location catalog");
            Catalog::from_path(path)?
        }
        None => Catalog::new(seed::locations())?,
    };
    info!(entries = catalog.len(), "Location catalog ready");
    Ok(catalog)
}

/// Load the club catalog from `path`, or the embedded seed when unset.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds an invalid record.
pub fn load_clubs(path: Option<&Path>) -> Result<ClubCatalog> {
    let catalog = match path {
        Some(path) => {
            info!(path = %path.display(), "Loading club catalog");
            ClubCatalog::from_path(path)?
        }
        None => ClubCatalog::embedded()?,
    };
    info!(
        clubs = catalog.clubs().len(),
        categories = catalog.categories().len(),
        "Club catalog ready"
    );
    Ok(catalog)
}
