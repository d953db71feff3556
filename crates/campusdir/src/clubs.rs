//! Club browser: clubs grouped by category with one expandable group.

use chrono::Weekday;
use serde::Serialize;
use tracing::debug;

use crate::catalog::{Club, ClubCatalog, ClubCategory};
use crate::error::{Error, Result};

/// Which category, if any, is expanded.
///
/// At most one category is open at a time; opening another closes the
/// previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClubBrowser {
    expanded: Option<String>,
}

impl ClubBrowser {
    /// A browser with every category collapsed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The expanded category id.
    #[must_use]
    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Whether `category` is expanded.
    #[must_use]
    pub fn is_expanded(&self, category: &str) -> bool {
        self.expanded.as_deref() == Some(category)
    }

    /// Toggle a category open or closed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if the catalog has no such category.
    pub fn toggle(&self, catalog: &ClubCatalog, category: &str) -> Result<Self> {
        if catalog.category(category).is_none() {
            return Err(Error::unknown_category(category));
        }
        let expanded = if self.is_expanded(category) {
            None
        } else {
            Some(category.to_string())
        };
        debug!(category, open = expanded.is_some(), "Toggled club category");
        Ok(Self { expanded })
    }
}

/// One category and its clubs, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubGroup<'a> {
    /// The category; `None` for clubs without one.
    pub category: Option<&'a ClubCategory>,
    /// Number of clubs in the group.
    pub club_count: usize,
    /// Whether the group is expanded.
    pub expanded: bool,
    /// The clubs, in catalog order. Empty unless expanded.
    pub clubs: Vec<&'a Club>,
}

impl ClubGroup<'_> {
    /// Heading for the group.
    #[must_use]
    pub fn label(&self) -> &str {
        self.category.map_or("Other", |c| c.name.as_str())
    }
}

/// Group clubs by category in category order.
///
/// Clubs without a category are collected in a trailing group, which is
/// always expanded since it cannot be toggled.
#[must_use]
pub fn groups<'a>(catalog: &'a ClubCatalog, browser: &ClubBrowser) -> Vec<ClubGroup<'a>> {
    let clubs = catalog.clubs();
    let mut groups: Vec<ClubGroup<'a>> = catalog
        .categories()
        .iter()
        .map(|category| {
            let members: Vec<&Club> = clubs
                .iter()
                .filter(|club| club.category.as_deref() == Some(category.id.as_str()))
                .collect();
            let expanded = browser.is_expanded(&category.id);
            ClubGroup {
                category: Some(category),
                club_count: members.len(),
                expanded,
                clubs: if expanded { members } else { Vec::new() },
            }
        })
        .collect();

    let loose: Vec<&Club> = clubs.iter().filter(|club| club.category.is_none()).collect();
    if !loose.is_empty() {
        groups.push(ClubGroup {
            category: None,
            club_count: loose.len(),
            expanded: true,
            clubs: loose,
        });
    }
    groups
}

/// Clubs meeting on `weekday`, in catalog order.
#[must_use]
pub fn meeting_on(catalog: &ClubCatalog, weekday: Weekday) -> Vec<&Club> {
    catalog
        .clubs()
        .iter()
        .filter(|club| club.meets_on(weekday))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EntryId;

    fn catalog() -> ClubCatalog {
        ClubCatalog::embedded().unwrap()
    }

    #[test]
    fn test_new_browser_is_collapsed() {
        let browser = ClubBrowser::new();
        assert!(browser.expanded().is_none());
        let catalog = catalog();
        let groups = groups(&catalog, &browser);
        assert_eq!(groups.len(), 6);
        assert!(groups.iter().all(|g| !g.expanded && g.clubs.is_empty()));
        assert!(groups.iter().all(|g| g.club_count == 3));
    }

    #[test]
    fn test_toggle_expands_then_collapses() {
        let catalog = catalog();
        let open = ClubBrowser::new().toggle(&catalog, "sports").unwrap();
        assert!(open.is_expanded("sports"));

        let closed = open.toggle(&catalog, "sports").unwrap();
        assert!(closed.expanded().is_none());
    }

    #[test]
    fn test_toggle_switches_category() {
        let catalog = catalog();
        let browser = ClubBrowser::new()
            .toggle(&catalog, "sports")
            .unwrap()
            .toggle(&catalog, "wellbeing")
            .unwrap();
        assert!(browser.is_expanded("wellbeing"));
        assert!(!browser.is_expanded("sports"));
    }

    #[test]
    fn test_toggle_unknown_category() {
        let err = ClubBrowser::new().toggle(&catalog(), "chess").unwrap_err();
        assert!(matches!(err, Error::UnknownCategory { .. }));
    }

    #[test]
    fn test_expanded_group_lists_clubs() {
        let catalog = catalog();
        let browser = ClubBrowser::new().toggle(&catalog, "creative").unwrap();
        let groups = groups(&catalog, &browser);

        let creative = groups.iter().find(|g| g.expanded).unwrap();
        assert_eq!(creative.label(), "Creative & Fun");
        let names: Vec<&str> = creative.clubs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Art Club", "Photography Society", "Drama Club"]);
    }

    #[test]
    fn test_uncategorised_clubs_trail() {
        let catalog = ClubCatalog::new(
            vec![ClubCategory::new("games", "Games", "", "")],
            vec![
                Club {
                    id: EntryId(1),
                    name: "Go Club".into(),
                    description: String::new(),
                    members: 5,
                    category: None,
                    meeting_time: None,
                    venue: None,
                },
                Club {
                    id: EntryId(2),
                    name: "Chess Club".into(),
                    description: String::new(),
                    members: 9,
                    category: Some("games".into()),
                    meeting_time: None,
                    venue: None,
                },
            ],
        )
        .unwrap();

        let groups = groups(&catalog, &ClubBrowser::new());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].label(), "Other");
        assert!(groups[1].expanded);
        assert_eq!(groups[1].clubs[0].name, "Go Club");
    }

    #[test]
    fn test_meeting_on() {
        let catalog = catalog();
        let tuesday: Vec<&str> = meeting_on(&catalog, Weekday::Tue)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            tuesday,
            vec![
                "Computer Science Society",
                "Swimming Club",
                "Student Government",
                "Yoga Club"
            ]
        );
        assert_eq!(meeting_on(&catalog, Weekday::Sun).len(), 1);
    }
}
