//! `campusdir` - CLI for the campus directory
//!
//! This binary searches the location and club catalogs, previews the map
//! camera, and runs line-driven search sessions.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};

use campusdir::catalog::{self, Club, ClubCatalog, Entry, EntryKind, PointOfInterest};
use campusdir::cli::{
    BrowseCommand, CatalogCommand, Cli, ClubsCommand, Command, ConfigCommand, KindArg, MapCommand,
    SearchCommand, ShowCommand,
};
use campusdir::clubs::{self, ClubBrowser};
use campusdir::state::apply_action;
use campusdir::{
    init_logging, Action, Catalog, Config, Directory, EntryId, MapView, OutputFormat,
    PresentationMode, Renderer, SearchState,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Config commands must work even when the config file is broken
    if let Command::Config(config_cmd) = cli.command {
        return handle_config(cli.config, config_cmd);
    }

    let config = Config::load_from(cli.config.clone())?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Command::Search(cmd) => handle_search(&config, &cmd),
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::Map(cmd) => handle_map(&config, &cmd),
        Command::Clubs(cmd) => handle_clubs(&config, &cmd),
        Command::Browse(cmd) => handle_browse(&config, &cmd),
        Command::Catalog(cmd) => handle_catalog(&config, cmd),
        Command::Config(_) => Ok(()),
    }
}

fn location_directory(config: &Config) -> Result<Directory<PointOfInterest>> {
    Ok(Directory::new(catalog::load_locations(config.locations_path())?))
}

fn club_directory(config: &Config) -> Result<Directory<Club>> {
    Ok(Directory::new(catalog::load_clubs(config.clubs_path())?.into_clubs()))
}

fn list_renderer(format: OutputFormat) -> Renderer {
    Renderer::new(PresentationMode::List, format)
}

fn handle_search(config: &Config, cmd: &SearchCommand) -> Result<()> {
    let limit = config.result_limit_or(cmd.limit);
    let renderer = list_renderer(cmd.format);

    let out = match cmd.kind {
        KindArg::Locations => {
            let directory = location_directory(config)?;
            renderer.search(&cmd.query, &directory.search(&cmd.query), limit)?
        }
        KindArg::Clubs => {
            let directory = club_directory(config)?;
            renderer.search(&cmd.query, &directory.search(&cmd.query), limit)?
        }
    };
    print!("{out}");
    Ok(())
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> Result<()> {
    let renderer = list_renderer(cmd.format);
    let id = EntryId(cmd.id);

    let out = match cmd.kind {
        KindArg::Locations => renderer.entry(location_directory(config)?.select(id)?)?,
        KindArg::Clubs => renderer.entry(club_directory(config)?.select(id)?)?,
    };
    print!("{out}");
    Ok(())
}

fn handle_map(config: &Config, cmd: &MapCommand) -> Result<()> {
    let directory = location_directory(config)?;
    let mut state = SearchState::new();
    if let Some(id) = cmd.select {
        state = apply_action(&state, &directory, &Action::Select(EntryId(id)))?;
    }

    let mut view = MapView::build(&directory, &state, &config.map);
    if cmd.fit {
        view = view.fit_all(&config.map);
    }
    print!("{}", Renderer::new(PresentationMode::Map, cmd.format).map(&view)?);
    Ok(())
}

fn handle_clubs(config: &Config, cmd: &ClubsCommand) -> Result<()> {
    let catalog = catalog::load_clubs(config.clubs_path())?;
    let renderer = list_renderer(cmd.format);

    let out = if let Some(day) = cmd.day {
        let meeting = clubs::meeting_on(&catalog, day);
        renderer.list(&format!("Clubs meeting on {day}:"), &meeting)?
    } else {
        let browser = match &cmd.expand {
            Some(category) => ClubBrowser::new().toggle(&catalog, category)?,
            None => ClubBrowser::new(),
        };
        renderer.clubs(&clubs::groups(&catalog, &browser))?
    };
    print!("{out}");
    Ok(())
}

fn handle_browse(config: &Config, cmd: &BrowseCommand) -> Result<()> {
    let renderer = Renderer::new(cmd.mode, cmd.format);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    match cmd.kind {
        KindArg::Locations => {
            let directory = location_directory(config)?;
            run_session(&directory, renderer, stdin.lock(), &mut stdout, |state| {
                Some(MapView::build(&directory, state, &config.map))
            })
        }
        KindArg::Clubs => {
            if cmd.mode == PresentationMode::Map {
                warn!("Clubs have no map positions, showing the list instead");
            }
            let directory = club_directory(config)?;
            run_session(&directory, renderer, stdin.lock(), &mut stdout, |_| None)
        }
    }
}

/// Drive a search session from input lines until `:quit` or end of input.
///
/// Each line is parsed as an [`Action`] and the session is re-rendered to
/// `out` after every accepted action. Lines that are not UTF-8, malformed
/// commands and unknown ids are logged and leave the session unchanged.
fn run_session<T, R, W, F>(
    directory: &Directory<T>,
    renderer: Renderer,
    mut input: R,
    out: &mut W,
    map: F,
) -> Result<()>
where
    T: Entry + Serialize,
    R: BufRead,
    W: Write,
    F: Fn(&SearchState) -> Option<MapView>,
{
    let mut state = SearchState::new();
    write!(out, "{}", renderer.session(&state, directory, map(&state).as_ref())?)?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim_end_matches(|c: char| c == '\n' || c == '\r'),
            Err(e) => {
                warn!("Ignoring input line that is not UTF-8: {e}");
                continue;
            }
        };
        if line.trim() == ":quit" {
            break;
        }

        let action: Action = match line.parse() {
            Ok(action) => action,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };

        state = match apply_action(&state, directory, &action) {
            Ok(next) => next,
            Err(e) if e.is_not_found() => {
                warn!("{e}");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        debug!(phase = %state.phase(), query = state.query(), "Session updated");

        writeln!(out)?;
        write!(out, "{}", renderer.session(&state, directory, map(&state).as_ref())?)?;
    }
    out.flush()?;
    Ok(())
}

fn handle_catalog(config: &Config, cmd: CatalogCommand) -> Result<()> {
    match cmd {
        CatalogCommand::Info { json } => {
            let locations = catalog::load_locations(config.locations_path())?;
            let clubs = catalog::load_clubs(config.clubs_path())?;
            let source = |path: Option<&std::path::Path>| {
                path.map_or_else(|| "embedded".to_string(), |p| p.display().to_string())
            };

            if json {
                let info = serde_json::json!({
                    "locations": {
                        "source": source(config.locations_path()),
                        "entries": locations.len(),
                        "fingerprint": locations.fingerprint()?,
                    },
                    "clubs": {
                        "source": source(config.clubs_path()),
                        "entries": clubs.clubs().len(),
                        "categories": clubs.categories().len(),
                        "fingerprint": clubs.clubs().fingerprint()?,
                    },
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Catalogs");
                println!("========");
                println!();
                println!("[Locations]");
                println!("  Source:       {}", source(config.locations_path()));
                println!("  Entries:      {}", locations.len());
                println!("  Fingerprint:  {}", locations.fingerprint()?);
                println!();
                println!("[Clubs]");
                println!("  Source:       {}", source(config.clubs_path()));
                println!("  Entries:      {}", clubs.clubs().len());
                println!("  Categories:   {}", clubs.categories().len());
                println!("  Fingerprint:  {}", clubs.clubs().fingerprint()?);
            }
        }
        CatalogCommand::Validate { file, kind } => {
            let path = file.or_else(|| match kind {
                KindArg::Locations => config.catalog.locations_path.clone(),
                KindArg::Clubs => config.catalog.clubs_path.clone(),
            });
            let label = path
                .as_ref()
                .map_or_else(|| "embedded catalog".to_string(), |p| p.display().to_string());
            println!("Validating {} catalog: {label}", EntryKind::from(kind));

            let entries = match kind {
                KindArg::Locations => catalog::load_locations(path.as_deref())
                    .map(|c: Catalog<PointOfInterest>| c.len()),
                KindArg::Clubs => {
                    catalog::load_clubs(path.as_deref()).map(|c: ClubCatalog| c.clubs().len())
                }
            }
            .with_context(|| format!("Catalog {label} is invalid"))?;
            println!("Catalog is valid ({entries} entries).");
        }
    }
    Ok(())
}

fn handle_config(path: Option<PathBuf>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                let show_path = |p: Option<&std::path::Path>| {
                    p.map_or_else(|| "(embedded)".to_string(), |p| p.display().to_string())
                };
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Catalog]");
                println!("  Locations:          {}", show_path(config.locations_path()));
                println!("  Clubs:              {}", show_path(config.clubs_path()));
                println!();
                println!("[Map]");
                println!("  Default centre:     {}", config.map.default_center());
                println!("  Default span:       {}", config.map.default_span);
                println!("  Focus span:         {}", config.map.focus_span);
                println!("  Fit padding:        {}", config.map.fit_padding);
                println!();
                println!("[Search]");
                match config.result_limit() {
                    Some(n) => println!("  Max results:        {n}"),
                    None => println!("  Max results:        unlimited"),
                }
            }
        }
        ConfigCommand::Path => {
            println!(
                "{}",
                path.unwrap_or_else(Config::default_config_path).display()
            );
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("Configuration error")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
