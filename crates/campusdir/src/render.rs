//! Text rendering of directory views.
//!
//! One [`Renderer`] serves every screen. The [`PresentationMode`] decides
//! whether a search session is shown as a list or on the map, and the
//! [`OutputFormat`] decides how the chosen view is written out.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;
use serde_json::json;

use crate::catalog::{Entry, EntryKind};
use crate::clubs::ClubGroup;
use crate::directory::{Directory, SearchOutcome};
use crate::error::Result;
use crate::map::MapView;
use crate::state::{SearchPhase, SearchState};

/// How a search session is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PresentationMode {
    /// Result list and detail card
    #[default]
    List,
    /// Map with markers, falling back to the list until the map is revealed
    Map,
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

/// Format a list of quoted words as `"a", "b", or "c"`.
fn quoted_list(words: &[&str]) -> String {
    let quoted: Vec<String> = words.iter().map(|w| format!("\"{w}\"")).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}

/// Lay out rows under headers with columns padded to their widest cell.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &widths, headers.iter().copied());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for row in rows {
        push_row(&mut out, &widths, row.iter().map(String::as_str));
    }
    out
}

fn push_row<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let padded: Vec<String> = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

/// "1 location", "3 locations".
fn counted(n: usize, kind: EntryKind) -> String {
    if n == 1 {
        format!("1 {kind}")
    } else {
        format!("{n} {}", kind.plural())
    }
}

fn entry_line<T: Entry>(entry: &T) -> String {
    if entry.description().is_empty() {
        format!("[{}] {}", entry.id(), entry.name())
    } else {
        format!("[{}] {} - {}", entry.id(), entry.name(), entry.description())
    }
}

/// Renders views in one presentation mode and output format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    mode: PresentationMode,
    format: OutputFormat,
}

impl Renderer {
    /// Create a renderer.
    #[must_use]
    pub fn new(mode: PresentationMode, format: OutputFormat) -> Self {
        Self { mode, format }
    }

    /// The presentation mode.
    #[must_use]
    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    /// The output format.
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render a list of entries under a heading.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn list<T: Entry + Serialize>(&self, heading: &str, entries: &[&T]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Table => {
                let rows: Vec<Vec<String>> = entries
                    .iter()
                    .map(|e| {
                        vec![
                            e.id().to_string(),
                            e.name().to_string(),
                            e.description().to_string(),
                        ]
                    })
                    .collect();
                Ok(table(&["ID", "NAME", "DESCRIPTION"], &rows))
            }
            OutputFormat::Plain => {
                let mut out = format!("{heading}\n");
                for entry in entries {
                    let _ = writeln!(out, "  {}", entry_line(*entry));
                }
                Ok(out)
            }
        }
    }

    /// Render the outcome of a search, truncated to `limit` entries.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn search<T: Entry + Serialize>(
        &self,
        query: &str,
        outcome: &SearchOutcome<'_, T>,
        limit: Option<usize>,
    ) -> Result<String> {
        let kind = T::KIND;
        let matches = outcome.matches();
        let shown = &matches[..limit.map_or(matches.len(), |n| n.min(matches.len()))];
        let phase = match outcome {
            SearchOutcome::Inactive => SearchPhase::Idle,
            SearchOutcome::Matches(m) if m.is_empty() => SearchPhase::Empty,
            SearchOutcome::Matches(_) => SearchPhase::Results,
        };

        if self.format == OutputFormat::Json {
            let value = json!({
                "kind": kind,
                "query": query,
                "phase": phase,
                "total": matches.len(),
                "results": shown,
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        match phase {
            SearchPhase::Idle => Ok(Self::idle(kind)),
            SearchPhase::Empty => Ok(Self::nothing_found(kind)),
            SearchPhase::Results => {
                let heading = format!("{} matching \"{query}\":", counted(matches.len(), kind));
                let mut out = self.list(&heading, shown)?;
                if shown.len() < matches.len() {
                    let _ = writeln!(out, "  ... {} more", matches.len() - shown.len());
                }
                Ok(out)
            }
        }
    }

    fn idle(kind: EntryKind) -> String {
        format!("Search for {}\n{}\n", kind.plural(), kind.idle_hint())
    }

    fn nothing_found(kind: EntryKind) -> String {
        format!(
            "No {} found\nTry searching for {}\n",
            kind.plural(),
            quoted_list(kind.suggestions())
        )
    }

    /// Render one entry in detail.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn entry<T: Entry + Serialize>(&self, entry: &T) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entry)?),
            OutputFormat::Table => {
                let mut rows = vec![
                    vec!["id".to_string(), entry.id().to_string()],
                    vec!["name".to_string(), entry.name().to_string()],
                    vec!["description".to_string(), entry.description().to_string()],
                ];
                rows.extend(
                    entry
                        .details()
                        .into_iter()
                        .map(|(label, value)| vec![label.to_string(), value]),
                );
                Ok(table(&["FIELD", "VALUE"], &rows))
            }
            OutputFormat::Plain => {
                let mut out = format!("[{}] {}\n", entry.id(), entry.name());
                if !entry.description().is_empty() {
                    let _ = writeln!(out, "    {}", entry.description());
                }
                for (label, value) in entry.details() {
                    let _ = writeln!(out, "    {label}: {value}");
                }
                Ok(out)
            }
        }
    }

    /// Render a map view.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn map(&self, view: &MapView) -> Result<String> {
        let region = &view.region;
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
            OutputFormat::Table => {
                let rows: Vec<Vec<String>> = view
                    .markers
                    .iter()
                    .map(|m| {
                        vec![
                            if m.highlighted { "*" } else { "" }.to_string(),
                            m.id.to_string(),
                            m.title.clone(),
                            format!("{:.6}", m.coordinate.latitude),
                            format!("{:.6}", m.coordinate.longitude),
                        ]
                    })
                    .collect();
                let mut out = format!(
                    "Camera: {} (span {:.4} x {:.4})\n\n",
                    region.center, region.latitude_delta, region.longitude_delta
                );
                out.push_str(&table(&["", "ID", "TITLE", "LATITUDE", "LONGITUDE"], &rows));
                Ok(out)
            }
            OutputFormat::Plain => {
                let mut out = format!(
                    "Camera: {} (span {:.4} x {:.4})\n",
                    region.center, region.latitude_delta, region.longitude_delta
                );
                for m in &view.markers {
                    let _ = writeln!(
                        out,
                        "  {} [{}] {} ({})",
                        if m.highlighted { '*' } else { ' ' },
                        m.id,
                        m.title,
                        m.coordinate
                    );
                }
                if let Some(m) = view.highlighted() {
                    let _ = writeln!(out, "\n{}\n{}", m.title, m.description);
                }
                Ok(out)
            }
        }
    }

    /// Render the club browser.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn clubs(&self, groups: &[ClubGroup<'_>]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(groups)?),
            OutputFormat::Table => {
                let rows: Vec<Vec<String>> = groups
                    .iter()
                    .flat_map(|group| {
                        let heading = vec![
                            group.label().to_string(),
                            String::new(),
                            format!("{} clubs", group.club_count),
                            String::new(),
                            String::new(),
                        ];
                        std::iter::once(heading).chain(group.clubs.iter().map(|club| {
                            vec![
                                String::new(),
                                club.name.clone(),
                                club.members.to_string(),
                                club.meeting().map(|m| m.to_string()).unwrap_or_default(),
                                club.venue.clone().unwrap_or_default(),
                            ]
                        }))
                    })
                    .collect();
                Ok(table(&["CATEGORY", "CLUB", "MEMBERS", "MEETS", "VENUE"], &rows))
            }
            OutputFormat::Plain => {
                let mut out = String::new();
                for group in groups {
                    let _ = writeln!(
                        out,
                        "{} {} ({} clubs)",
                        if group.expanded { '-' } else { '+' },
                        group.label(),
                        group.club_count
                    );
                    for club in &group.clubs {
                        let _ = writeln!(out, "    {} ({} members)", club.name, club.members);
                        if !club.description.is_empty() {
                            let _ = writeln!(out, "      {}", club.description);
                        }
                        if let Some(meeting) = club.meeting() {
                            let _ = writeln!(out, "      {meeting}");
                        }
                        if let Some(venue) = &club.venue {
                            let _ = writeln!(out, "      {venue}");
                        }
                    }
                }
                Ok(out)
            }
        }
    }

    /// Render a search session.
    ///
    /// In list mode a selection shows the entry's detail card. In map mode
    /// the map replaces the idle prompt and detail card once it has been
    /// revealed; `map` must then be provided.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn session<T: Entry + Serialize>(
        &self,
        state: &SearchState,
        directory: &Directory<T>,
        map: Option<&MapView>,
    ) -> Result<String> {
        let selected = state.selected().and_then(|id| directory.get(id));

        if self.format == OutputFormat::Json {
            let value = json!({
                "state": state,
                "phase": state.phase(),
                "results": state.resolve(directory),
                "selected": selected,
                "map": map,
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        let show_map = self.mode == PresentationMode::Map && state.map_visible();
        match (selected, map) {
            (_, Some(view))
                if show_map && (selected.is_some() || state.phase() == SearchPhase::Idle) =>
            {
                self.map(view)
            }
            (Some(entry), _) => self.entry(entry),
            (None, _) => {
                let kind = T::KIND;
                match state.phase() {
                    SearchPhase::Idle => Ok(Self::idle(kind)),
                    SearchPhase::Empty => Ok(Self::nothing_found(kind)),
                    SearchPhase::Results => {
                        let entries = state.resolve(directory);
                        let heading = format!(
                            "{} matching \"{}\":",
                            counted(entries.len(), kind),
                            state.query()
                        );
                        self.list(&heading, &entries)
                    }
                }
            }
        }
    }
}
