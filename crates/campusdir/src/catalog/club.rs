//! Student clubs, their categories and weekly meeting schedules.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use chrono::{NaiveTime, Timelike, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{decode_records, seed, Catalog, Entry, EntryId, EntryKind};
use crate::error::{Error, Result};

fn meeting_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\s*every\s+([a-z]+)\s+(\d{1,2}):(\d{2})\s*(am|pm)\s*$")
            .expect("Invalid meeting pattern")
    })
}

/// A weekly meeting slot such as "Every Tuesday 6:00 PM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeetingTime {
    /// Day of the week.
    pub weekday: Weekday,
    /// Local start time.
    pub time: NaiveTime,
}

impl MeetingTime {
    /// Parse the "Every <Weekday> <h>:<mm> <AM|PM>" form.
    ///
    /// # Errors
    ///
    /// Returns a description of what could not be parsed.
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let caps = meeting_pattern()
            .captures(text)
            .ok_or_else(|| format!("meeting time '{text}' is not 'Every <Day> <h:mm> <AM|PM>'"))?;

        let weekday: Weekday = caps[1]
            .parse()
            .map_err(|_| format!("unknown weekday '{}'", &caps[1]))?;
        let hour: u32 = caps[2]
            .parse()
            .map_err(|_| format!("bad hour in '{text}'"))?;
        let minute: u32 = caps[3]
            .parse()
            .map_err(|_| format!("bad minute in '{text}'"))?;
        if !(1..=12).contains(&hour) {
            return Err(format!("hour {hour} is not on a 12-hour clock"));
        }
        let pm = caps[4].eq_ignore_ascii_case("pm");
        let hour = hour % 12 + if pm { 12 } else { 0 };
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| format!("invalid time in '{text}'"))?;

        Ok(Self { weekday, time })
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

impl fmt::Display for MeetingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (pm, hour) = self.time.hour12();
        write!(
            f,
            "Every {} {}:{:02} {}",
            weekday_name(self.weekday),
            hour,
            self.time.minute(),
            if pm { "PM" } else { "AM" }
        )
    }
}

/// A student club or society.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    /// Unique identifier.
    pub id: EntryId,
    /// Display name.
    pub name: String,
    /// What the club is about.
    #[serde(default)]
    pub description: String,
    /// Current member count.
    #[serde(default)]
    pub members: u32,
    /// Category id used for grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Weekly meeting slot, in "Every <Day> <h:mm> <AM|PM>" form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_time: Option<String>,
    /// Where the club meets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
}

impl Club {
    /// The parsed meeting slot, if the club has one.
    #[must_use]
    pub fn meeting(&self) -> Option<MeetingTime> {
        self.meeting_time
            .as_deref()
            .and_then(|text| MeetingTime::parse(text).ok())
    }

    /// Whether the club meets on the given day.
    #[must_use]
    pub fn meets_on(&self, weekday: Weekday) -> bool {
        self.meeting().is_some_and(|m| m.weekday == weekday)
    }
}

impl Entry for Club {
    const KIND: EntryKind = EntryKind::Club;

    fn id(&self) -> EntryId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut details = vec![("members", self.members.to_string())];
        if let Some(meeting) = self.meeting() {
            details.push(("meets", meeting.to_string()));
        }
        if let Some(venue) = &self.venue {
            details.push(("venue", venue.clone()));
        }
        if let Some(category) = &self.category {
            details.push(("category", category.clone()));
        }
        details
    }

    fn check(&self) -> std::result::Result<(), String> {
        if let Some(text) = &self.meeting_time {
            MeetingTime::parse(text)?;
        }
        Ok(())
    }
}

/// A named group of clubs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubCategory {
    /// Category identifier referenced by [`Club::category`].
    pub id: String,
    /// Display name.
    pub name: String,
    /// Icon name, passed through to the presentation layer.
    #[serde(default)]
    pub icon: String,
    /// Accent colour, passed through to the presentation layer.
    #[serde(default)]
    pub color: String,
}

impl ClubCategory {
    /// Create a category.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
        }
    }
}

/// On-disk shape of a club catalog file.
#[derive(Deserialize)]
struct ClubCatalogFile {
    #[serde(default)]
    categories: Vec<ClubCategory>,
    clubs: Vec<serde_json::Value>,
}

/// Clubs together with the categories they are grouped under.
#[derive(Debug, Clone, PartialEq)]
pub struct ClubCatalog {
    categories: Vec<ClubCategory>,
    clubs: Catalog<Club>,
}

impl ClubCatalog {
    /// Build a club catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a club is invalid, ids repeat, a category id
    /// repeats, or a club names a category that does not exist.
    pub fn new(categories: Vec<ClubCategory>, clubs: Vec<Club>) -> Result<Self> {
        let mut known = HashSet::with_capacity(categories.len());
        for category in &categories {
            if !known.insert(category.id.as_str()) {
                return Err(Error::DuplicateCategory {
                    id: category.id.clone(),
                });
            }
        }
        for club in &clubs {
            if let Some(category) = &club.category {
                if !known.contains(category.as_str()) {
                    return Err(Error::invalid_entry(
                        club.id,
                        &club.name,
                        format!("unknown category '{category}'"),
                    ));
                }
            }
        }
        let clubs = Catalog::new(clubs)?;
        Ok(Self { categories, clubs })
    }

    /// The embedded club seed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded seed is malformed.
    pub fn embedded() -> Result<Self> {
        Self::new(seed::club_categories(), seed::clubs())
    }

    /// Parse a `{"categories": [...], "clubs": [...]}` document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any record is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ClubCatalogFile = serde_json::from_str(json)?;
        Self::new(file.categories, decode_records(file.clubs)?)
    }

    /// Read and parse a club catalog file.
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

    /// Categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[ClubCategory] {
        &self.categories
    }

    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&ClubCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// The clubs, in catalog order.
    #[must_use]
    pub fn clubs(&self) -> &Catalog<Club> {
        &self.clubs
    }

    /// Consume the catalog, keeping only the clubs.
    #[must_use]
    pub fn into_clubs(self) -> Catalog<Club> {
        self.clubs
    }
}
