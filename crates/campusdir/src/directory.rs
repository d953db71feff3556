//! Searchable directory over a catalog.
//!
//! The directory answers two questions: which entries match a query, and
//! which entry carries a given id. Both are pure lookups over the immutable
//! catalog; nothing here keeps track of what the user is doing (see
//! [`crate::state`] for that).

use serde::Serialize;
use tracing::{debug, trace};

use crate::catalog::{Catalog, Entry, EntryId};
use crate::error::{Error, Result};

/// What a search produced.
///
/// An inactive search (blank query) is deliberately distinct from a search
/// that matched nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a, T> {
    /// The query was blank; no search is active.
    Inactive,
    /// Entries matching the query, in catalog order. May be empty.
    Matches(Vec<&'a T>),
}

impl<'a, T> SearchOutcome<'a, T> {
    /// Whether no search is active.
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        matches!(self, Self::Inactive)
    }

    /// Whether a search ran and matched nothing.
    #[must_use]
    pub fn is_empty_match(&self) -> bool {
        matches!(self, Self::Matches(m) if m.is_empty())
    }

    /// The matched entries; empty when inactive.
    #[must_use]
    pub fn matches(&self) -> &[&'a T] {
        match self {
            Self::Inactive => &[],
            Self::Matches(m) => m,
        }
    }
}

/// A query normalised for matching, or `None` when it is blank.
fn normalize(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// Whether `entry`'s name or description contains the lowercased `needle`.
#[must_use]
pub fn entry_matches<T: Entry>(entry: &T, needle: &str) -> bool {
    entry.name().to_lowercase().contains(needle)
        || entry.description().to_lowercase().contains(needle)
}

/// A catalog with search and lookup.
#[derive(Debug, Clone)]
pub struct Directory<T> {
    catalog: Catalog<T>,
}

impl<T: Entry> Directory<T> {
    /// Wrap a catalog.
    #[must_use]
    pub fn new(catalog: Catalog<T>) -> Self {
        Self { catalog }
    }

    /// The underlying catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog<T> {
        &self.catalog
    }

    /// All entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[T] {
        self.catalog.entries()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Whether the directory has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Find entries whose name or description contains `query`,
    /// case-insensitively.
    ///
    /// A query that is empty or only whitespace yields
    /// [`SearchOutcome::Inactive`]. Otherwise the query is matched as typed,
    /// including any surrounding whitespace, and matches come back in
    /// catalog order.
    pub fn search(&self, query: &str) -> SearchOutcome<'_, T> {
        let Some(needle) = normalize(query) else {
            trace!("Blank query, search inactive");
            return SearchOutcome::Inactive;
        };

        let matches: Vec<&T> = self
            .catalog
            .iter()
            .filter(|entry| entry_matches(*entry, &needle))
            .collect();

        debug!(kind = %T::KIND, query, matches = matches.len(), "Search");
        SearchOutcome::Matches(matches)
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&T> {
        self.catalog.get(id)
    }

    /// Pick an entry by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no entry carries `id`.
    pub fn select(&self, id: EntryId) -> Result<&T> {
        let entry = self.catalog.get(id).ok_or_else(|| Error::not_found(id))?;
        debug!(kind = %T::KIND, %id, name = entry.name(), "Selected entry");
        Ok(entry)
    }
}

impl<T: Entry + Serialize> Directory<T> {
    /// Fingerprint of the underlying catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn fingerprint(&self) -> Result<String> {
        self.catalog.fingerprint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{seed, ClubCatalog, Coordinate, PointOfInterest};

    fn locations() -> Directory<PointOfInterest> {
        Directory::new(Catalog::new(seed::locations()).unwrap())
    }

    fn ids(outcome: &SearchOutcome<'_, PointOfInterest>) -> Vec<u32> {
        outcome.matches().iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn test_search_library() {
        let dir = locations();
        let outcome = dir.search("librar");
        assert_eq!(ids(&outcome), vec![3]);

        let library = outcome.matches()[0];
        assert_eq!(library.name, "Library (Borchardt Library)");
        assert_eq!(library.description, "Main Library Building");
        assert_eq!(library.coordinate, Coordinate::new(-37.722_434, 145.048_223));
    }

    #[test]
    fn test_search_no_match_is_empty_not_inactive() {
        let dir = locations();
        let outcome = dir.search("xyz123");
        assert!(!outcome.is_inactive());
        assert!(outcome.is_empty_match());
        assert!(outcome.matches().is_empty());
    }

    #[test]
    fn test_blank_queries_are_inactive() {
        let dir = locations();
        assert!(dir.search("").is_inactive());
        assert!(dir.search("   ").is_inactive());
        assert!(dir.search("\t\n").is_inactive());
        assert!(!dir.search("").is_empty_match());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let dir = locations();
        let upper = dir.search("COLLEGE");
        let lower = dir.search("college");
        assert_eq!(ids(&upper), vec![5, 6]);
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_search_matches_description() {
        let dir = locations();
        assert_eq!(ids(&dir.search("accommodation")), vec![5, 6]);
        assert_eq!(ids(&dir.search("food")), vec![2]);
    }

    #[test]
    fn test_search_preserves_catalog_order() {
        let dir = locations();
        // "la trobe" hits the entrance (1) and the sanctuary (9)
        assert_eq!(ids(&dir.search("la trobe")), vec![1, 9]);
        // "main" hits the entrance, library and bus interchange
        assert_eq!(ids(&dir.search("main")), vec![1, 3, 10]);
    }

    #[test]
    fn test_search_is_sound_and_complete() {
        let dir = locations();
        for query in ["a", "Hall", "sport", "e", "bus", "zzz", "(", "Library "] {
            let needle = query.to_lowercase();
            let outcome = dir.search(query);
            let matched = ids(&outcome);
            for entry in dir.entries() {
                let contains = entry.name.to_lowercase().contains(&needle)
                    || entry.description.to_lowercase().contains(&needle);
                assert_eq!(
                    matched.contains(&entry.id.0),
                    contains,
                    "query {query:?}, entry {}",
                    entry.name
                );
            }
        }
    }

    #[test]
    fn test_search_is_idempotent() {
        let dir = locations();
        assert_eq!(dir.search("hall"), dir.search("hall"));
        assert_eq!(dir.search("  "), dir.search("  "));
    }

    #[test]
    fn test_query_whitespace_is_significant_when_not_blank() {
        let dir = locations();
        assert_eq!(ids(&dir.search("library ")), vec![3]);
        assert!(dir.search(" agora ").is_empty_match());
    }

    #[test]
    fn test_select_existing() {
        let dir = locations();
        let entry = dir.select(EntryId(3)).unwrap();
        assert_eq!(entry.name, "Library (Borchardt Library)");
        assert_eq!(entry, dir.get(EntryId(3)).unwrap());
    }

    #[test]
    fn test_select_missing() {
        let dir = locations();
        let err = dir.select(EntryId(999)).unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, Error::NotFound { id: EntryId(999) }));
    }

    #[test]
    fn test_search_clubs() {
        let dir = Directory::new(ClubCatalog::embedded().unwrap().into_clubs());
        let names: Vec<&str> = dir
            .search("support")
            .matches()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Mental Health Support Group", "Peer Support Network"]
        );
    }

    #[test]
    fn test_entry_matches_expects_lowercased_needle() {
        let dir = locations();
        let agora = dir.get(EntryId(2)).unwrap();
        assert!(entry_matches(agora, "agora"));
        assert!(entry_matches(agora, "amenities"));
        assert!(!entry_matches(agora, "library"));
    }

    #[test]
    fn test_directory_len() {
        let dir = locations();
        assert_eq!(dir.len(), 10);
        assert!(!dir.is_empty());
        assert_eq!(dir.fingerprint().unwrap().len(), 64);
    }
}
