//! Search flow state and its transitions.
//!
//! [`SearchState`] captures everything the presentation layer needs to know
//! about an in-progress search: the query, the ids it matched, and the
//! selected entry. Transitions are free functions that take the current state
//! and return the next one, so the whole flow can be driven and tested
//! without any rendering.
//!
//! The display phase is derived, never stored:
//!
//! | query     | matches | phase                  |
//! |-----------|---------|------------------------|
//! | blank     | -       | [`SearchPhase::Idle`]    |
//! | non-blank | > 0     | [`SearchPhase::Results`] |
//! | non-blank | 0       | [`SearchPhase::Empty`]   |
//!
//! Selection is orthogonal to the phase.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Entry, EntryId};
use crate::directory::{Directory, SearchOutcome};
use crate::error::Result;

/// Which of the mutually exclusive search displays applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// No query; show the default prompt.
    Idle,
    /// Query with at least one match.
    Results,
    /// Query with no matches; show a "nothing found" message.
    Empty,
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Results => write!(f, "results"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// Ephemeral state of the search flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    query: String,
    results: Vec<EntryId>,
    selected: Option<EntryId>,
    map_visible: bool,
}

impl SearchState {
    /// The initial, idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current query, as typed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Ids matching the current query, in catalog order.
    #[must_use]
    pub fn results(&self) -> &[EntryId] {
        &self.results
    }

    /// The selected entry, if any.
    #[must_use]
    pub fn selected(&self) -> Option<EntryId> {
        self.selected
    }

    /// Whether an entry is selected.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    /// Whether the map has been revealed by a selection.
    ///
    /// Once shown the map stays visible; a reset only moves the camera back
    /// to its default region.
    #[must_use]
    pub fn map_visible(&self) -> bool {
        self.map_visible
    }

    /// The display phase implied by query and results.
    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        if self.query.trim().is_empty() {
            SearchPhase::Idle
        } else if self.results.is_empty() {
            SearchPhase::Empty
        } else {
            SearchPhase::Results
        }
    }

    /// Resolve result ids to entries.
    #[must_use]
    pub fn resolve<'a, T: Entry>(&self, directory: &'a Directory<T>) -> Vec<&'a T> {
        self.results
            .iter()
            .filter_map(|id| directory.get(*id))
            .collect()
    }
}

fn result_ids<T: Entry>(outcome: &SearchOutcome<'_, T>) -> Vec<EntryId> {
    outcome.matches().iter().map(|entry| entry.id()).collect()
}

/// Apply an edited query.
///
/// Results are recomputed from the directory and any selection is cleared.
/// A blank query returns to [`SearchPhase::Idle`].
#[must_use]
pub fn apply_query<T: Entry>(
    state: &SearchState,
    directory: &Directory<T>,
    query: &str,
) -> SearchState {
    let outcome = directory.search(query);
    let next = SearchState {
        query: query.to_string(),
        results: result_ids(&outcome),
        selected: None,
        map_visible: state.map_visible,
    };
    debug!(phase = %next.phase(), results = next.results.len(), "Applied query");
    next
}

/// Apply a selection.
///
/// The query becomes the selected entry's name, results are recomputed for
/// it, and the map is revealed.
///
/// # Errors
///
/// Returns [`crate::Error::NotFound`] if `id` is not in the directory. The
/// caller keeps its current state in that case.
pub fn apply_selection<T: Entry>(
    state: &SearchState,
    directory: &Directory<T>,
    id: EntryId,
) -> Result<SearchState> {
    let entry = directory.select(id)?;
    let query = entry.name().to_string();
    let outcome = directory.search(&query);
    let next = SearchState {
        results: result_ids(&outcome),
        query,
        selected: Some(id),
        map_visible: true,
    };
    debug!(%id, was_selected = ?state.selected, "Applied selection");
    Ok(next)
}

/// Clear query, results and selection.
#[must_use]
pub fn apply_reset(state: &SearchState) -> SearchState {
    debug!("Applied reset");
    SearchState {
        map_visible: state.map_visible,
        ..SearchState::default()
    }
}

/// A user action in the search flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The query text changed.
    Query(String),
    /// A result was picked.
    Select(EntryId),
    /// The search was cleared.
    Reset,
}

/// Error returned when an action line cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ParseActionError(String);

impl FromStr for Action {
    type Err = ParseActionError;

    /// Parse one input line.
    ///
    /// `:select <id>` and `:clear` are commands; anything else is query text.
    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix(":select") {
            let id = rest.trim().parse::<u32>().map_err(|_| {
                ParseActionError(format!("expected ':select <id>', got '{trimmed}'"))
            })?;
            return Ok(Self::Select(EntryId(id)));
        }
        if trimmed == ":clear" {
            return Ok(Self::Reset);
        }
        if trimmed.starts_with(':') {
            return Err(ParseActionError(format!("unknown command '{trimmed}'")));
        }
        Ok(Self::Query(line.to_string()))
    }
}

/// Apply any action.
///
/// # Errors
///
/// Returns [`crate::Error::NotFound`] for a selection of an unknown id.
pub fn apply_action<T: Entry>(
    state: &SearchState,
    directory: &Directory<T>,
    action: &Action,
) -> Result<SearchState> {
    match action {
        Action::Query(query) => Ok(apply_query(state, directory, query)),
        Action::Select(id) => apply_selection(state, directory, *id),
        Action::Reset => Ok(apply_reset(state)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{seed, Catalog, PointOfInterest};

    fn directory() -> Directory<PointOfInterest> {
        Directory::new(Catalog::new(seed::locations()).unwrap())
    }

    #[test]
    fn test_initial_state_is_idle() {
        let state = SearchState::new();
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert!(state.results().is_empty());
        assert!(!state.is_selected());
        assert!(!state.map_visible());
    }

    #[test]
    fn test_query_with_matches() {
        let dir = directory();
        let state = apply_query(&SearchState::new(), &dir, "college");
        assert_eq!(state.phase(), SearchPhase::Results);
        assert_eq!(state.results(), &[EntryId(5), EntryId(6)]);
        assert_eq!(state.query(), "college");
    }

    #[test]
    fn test_query_without_matches_is_empty() {
        let dir = directory();
        let state = apply_query(&SearchState::new(), &dir, "xyz123");
        assert_eq!(state.phase(), SearchPhase::Empty);
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_blank_query_is_idle() {
        let dir = directory();
        let searching = apply_query(&SearchState::new(), &dir, "hall");
        let state = apply_query(&searching, &dir, "   ");
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_results_track_query() {
        let dir = directory();
        let mut state = SearchState::new();
        for query in ["l", "li", "lib", "libr", "librar"] {
            state = apply_query(&state, &dir, query);
            let expected: Vec<EntryId> = match dir.search(query) {
                SearchOutcome::Inactive => Vec::new(),
                SearchOutcome::Matches(m) => m.iter().map(|p| p.id).collect(),
            };
            assert_eq!(state.results(), expected.as_slice());
        }
        assert_eq!(state.results(), &[EntryId(3)]);
    }

    #[test]
    fn test_selection() {
        let dir = directory();
        let searching = apply_query(&SearchState::new(), &dir, "librar");
        let state = apply_selection(&searching, &dir, EntryId(3)).unwrap();

        assert_eq!(state.selected(), Some(EntryId(3)));
        assert_eq!(state.query(), "Library (Borchardt Library)");
        assert!(state.results().contains(&EntryId(3)));
        assert!(state.map_visible());
    }

    #[test]
    fn test_selection_of_missing_id_is_not_found() {
        let dir = directory();
        let selected = apply_selection(&SearchState::new(), &dir, EntryId(3)).unwrap();

        let err = apply_action(&selected, &dir, &Action::Select(EntryId(999))).unwrap_err();
        assert!(matches!(err, crate::Error::NotFound { id: EntryId(999) }));
    }

    #[test]
    fn test_editing_query_clears_selection() {
        let dir = directory();
        let selected = apply_selection(&SearchState::new(), &dir, EntryId(2)).unwrap();
        let state = apply_query(&selected, &dir, "agor");
        assert!(!state.is_selected());
        assert!(state.map_visible());
    }

    #[test]
    fn test_reset_keeps_map_visible() {
        let dir = directory();
        let selected = apply_selection(&SearchState::new(), &dir, EntryId(7)).unwrap();
        let state = apply_reset(&selected);

        assert_eq!(state.phase(), SearchPhase::Idle);
        assert_eq!(state.query(), "");
        assert!(state.results().is_empty());
        assert!(!state.is_selected());
        assert!(state.map_visible());
    }

    #[test]
    fn test_reset_from_initial_state() {
        assert_eq!(apply_reset(&SearchState::new()), SearchState::new());
    }

    #[test]
    fn test_resolve() {
        let dir = directory();
        let state = apply_query(&SearchState::new(), &dir, "college");
        let names: Vec<&str> = state.resolve(&dir).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Glenn College", "Menzies College"]);
    }

    #[test]
    fn test_state_serializes() {
        let dir = directory();
        let state = apply_selection(&SearchState::new(), &dir, EntryId(3)).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let back: SearchState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
        assert!(json.contains("\"selected\":3"));
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!("agora".parse::<Action>().unwrap(), Action::Query("agora".into()));
        assert_eq!("  ".parse::<Action>().unwrap(), Action::Query("  ".into()));
        assert_eq!(":select 3".parse::<Action>().unwrap(), Action::Select(EntryId(3)));
        assert_eq!(":clear".parse::<Action>().unwrap(), Action::Reset);
        assert!(":select three".parse::<Action>().is_err());
        assert!(":bogus".parse::<Action>().is_err());
    }

    #[test]
    fn test_parse_action_error_messages() {
        let err = ":bogus".parse::<Action>().unwrap_err();
        assert_eq!(err.to_string(), "unknown command ':bogus'");

        let err: Box<dyn std::error::Error> = Box::new(":select x".parse::<Action>().unwrap_err());
        assert_eq!(err.to_string(), "expected ':select <id>', got ':select x'");
    }

    #[test]
    fn test_apply_action_sequence() {
        let dir = directory();
        let mut state = SearchState::new();
        for line in ["sport", ":select 4", ":clear"] {
            let action: Action = line.parse().unwrap();
            state = apply_action(&state, &dir, &action).unwrap();
        }
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert!(state.map_visible());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(SearchPhase::Idle.to_string(), "idle");
        assert_eq!(SearchPhase::Results.to_string(), "results");
        assert_eq!(SearchPhase::Empty.to_string(), "empty");
    }
}
