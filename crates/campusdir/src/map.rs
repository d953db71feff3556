//! Map view model: camera regions and markers.
//!
//! The directory never draws anything. This module computes what a map
//! renderer needs: one [`Marker`] per located entry, which marker is
//! highlighted, and the [`Region`] the camera should show.

use serde::Serialize;

use crate::catalog::{Coordinate, Entry, EntryId, Located};
use crate::config::MapConfig;
use crate::directory::Directory;
use crate::state::SearchState;

/// A rectangular camera region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    /// Centre of the region.
    pub center: Coordinate,
    /// North-south extent in degrees.
    pub latitude_delta: f64,
    /// East-west extent in degrees.
    pub longitude_delta: f64,
}

impl Region {
    /// A square region of `span` degrees around `center`.
    #[must_use]
    pub fn around(center: Coordinate, span: f64) -> Self {
        Self {
            center,
            latitude_delta: span,
            longitude_delta: span,
        }
    }

    /// The default region from configuration.
    #[must_use]
    pub fn default_for(config: &MapConfig) -> Self {
        Self::around(config.default_center(), config.default_span)
    }

    /// The region focused on a selected coordinate.
    #[must_use]
    pub fn focus(coordinate: Coordinate, config: &MapConfig) -> Self {
        Self::around(coordinate, config.focus_span)
    }

    /// The smallest region covering every coordinate, widened by `padding`
    /// (a fraction of the extent) on each side and never narrower than
    /// `min_span`.
    ///
    /// Returns `None` for an empty set.
    #[must_use]
    pub fn bounding<I>(coordinates: I, padding: f64, min_span: f64) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut iter = coordinates.into_iter();
        let first = iter.next()?;
        let (mut south, mut north) = (first.latitude, first.latitude);
        let (mut west, mut east) = (first.longitude, first.longitude);
        for c in iter {
            south = south.min(c.latitude);
            north = north.max(c.latitude);
            west = west.min(c.longitude);
            east = east.max(c.longitude);
        }

        let scale = 1.0 + 2.0 * padding;
        Some(Self {
            center: Coordinate::new((south + north) / 2.0, (west + east) / 2.0),
            latitude_delta: ((north - south) * scale).max(min_span),
            longitude_delta: ((east - west) * scale).max(min_span),
        })
    }

    /// Whether `coordinate` falls inside the region.
    #[must_use]
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        let half_lat = self.latitude_delta / 2.0;
        let half_lon = self.longitude_delta / 2.0;
        (coordinate.latitude - self.center.latitude).abs() <= half_lat
            && (coordinate.longitude - self.center.longitude).abs() <= half_lon
    }
}

/// A pin on the map with its callout text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Entry the marker stands for.
    pub id: EntryId,
    /// Callout title.
    pub title: String,
    /// Callout body.
    pub description: String,
    /// Pin position.
    pub coordinate: Coordinate,
    /// Whether this is the selected entry's marker.
    pub highlighted: bool,
}

/// Everything a map renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    /// Camera region.
    pub region: Region,
    /// One marker per entry, in catalog order.
    pub markers: Vec<Marker>,
    /// The entry the camera is focused on, if any.
    pub focused: Option<EntryId>,
}

impl MapView {
    /// Build the view for the current search state.
    ///
    /// The camera focuses on the selected entry, or shows the default region
    /// when nothing is selected.
    #[must_use]
    pub fn build<T: Located>(
        directory: &Directory<T>,
        state: &SearchState,
        config: &MapConfig,
    ) -> Self {
        let selected = state.selected().and_then(|id| directory.get(id));
        let region = selected.map_or_else(
            || Region::default_for(config),
            |entry| Region::focus(entry.coordinate(), config),
        );
        let markers = directory
            .entries()
            .iter()
            .map(|entry| Marker {
                id: entry.id(),
                title: entry.name().to_string(),
                description: entry.description().to_string(),
                coordinate: entry.coordinate(),
                highlighted: selected.is_some_and(|s| s.id() == entry.id()),
            })
            .collect();

        Self {
            region,
            markers,
            focused: selected.map(Entry::id),
        }
    }

    /// Replace the camera with one covering every marker.
    ///
    /// Leaves a focused view unchanged.
    #[must_use]
    pub fn fit_all(mut self, config: &MapConfig) -> Self {
        if self.focused.is_none() {
            if let Some(region) = Region::bounding(
                self.markers.iter().map(|m| m.coordinate),
                config.fit_padding,
                config.focus_span,
            ) {
                self.region = region;
            }
        }
        self
    }

    /// The highlighted marker, if any.
    #[must_use]
    pub fn highlighted(&self) -> Option<&Marker> {
        self.markers.iter().find(|m| m.highlighted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{seed, Catalog, PointOfInterest};
    use crate::state::{apply_reset, apply_selection};

    fn directory() -> Directory<PointOfInterest> {
        Directory::new(Catalog::new(seed::locations()).unwrap())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_view() {
        let dir = directory();
        let config = MapConfig::default();
        let view = MapView::build(&dir, &SearchState::new(), &config);

        assert_eq!(view.markers.len(), 10);
        assert!(view.highlighted().is_none());
        assert!(view.focused.is_none());
        assert_eq!(view.region, Region::default_for(&config));
        assert!(approx(view.region.latitude_delta, 0.02));
    }

    #[test]
    fn test_focused_view() {
        let dir = directory();
        let config = MapConfig::default();
        let state = apply_selection(&SearchState::new(), &dir, EntryId(3)).unwrap();
        let view = MapView::build(&dir, &state, &config);

        assert_eq!(view.focused, Some(EntryId(3)));
        assert_eq!(view.region.center, Coordinate::new(-37.722_434, 145.048_223));
        assert!(approx(view.region.latitude_delta, 0.005));
        assert!(approx(view.region.longitude_delta, 0.005));

        let highlighted: Vec<EntryId> = view
            .markers
            .iter()
            .filter(|m| m.highlighted)
            .map(|m| m.id)
            .collect();
        assert_eq!(highlighted, vec![EntryId(3)]);
        assert_eq!(view.highlighted().unwrap().title, "Library (Borchardt Library)");
    }

    #[test]
    fn test_reset_returns_camera_to_default() {
        let dir = directory();
        let config = MapConfig::default();
        let selected = apply_selection(&SearchState::new(), &dir, EntryId(9)).unwrap();
        let view = MapView::build(&dir, &apply_reset(&selected), &config);
        assert_eq!(view.region, Region::default_for(&config));
        assert!(view.highlighted().is_none());
    }

    #[test]
    fn test_markers_follow_catalog_order() {
        let dir = directory();
        let view = MapView::build(&dir, &SearchState::new(), &MapConfig::default());
        let ids: Vec<u32> = view.markers.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(view.markers[1].description, "Central hub with food and amenities");
    }

    #[test]
    fn test_default_region_covers_campus() {
        let dir = directory();
        let region = Region::default_for(&MapConfig::default());
        for entry in dir.entries() {
            assert!(region.contains(entry.coordinate), "{}", entry.name);
        }
    }

    #[test]
    fn test_bounding_region() {
        let region = Region::bounding(
            [Coordinate::new(-1.0, 10.0), Coordinate::new(1.0, 14.0)],
            0.0,
            0.0,
        )
        .unwrap();
        assert_eq!(region.center, Coordinate::new(0.0, 12.0));
        assert!(approx(region.latitude_delta, 2.0));
        assert!(approx(region.longitude_delta, 4.0));
    }

    #[test]
    fn test_bounding_padding_and_min_span() {
        let padded = Region::bounding(
            [Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)],
            0.5,
            0.0,
        )
        .unwrap();
        assert!(approx(padded.latitude_delta, 2.0));

        let single = Region::bounding([Coordinate::new(5.0, 5.0)], 0.1, 0.005).unwrap();
        assert!(approx(single.latitude_delta, 0.005));
        assert_eq!(single.center, Coordinate::new(5.0, 5.0));

        assert!(Region::bounding(Vec::new(), 0.1, 0.005).is_none());
    }

    #[test]
    fn test_fit_all_covers_every_marker() {
        let dir = directory();
        let config = MapConfig::default();
        let view = MapView::build(&dir, &SearchState::new(), &config).fit_all(&config);
        for marker in &view.markers {
            assert!(view.region.contains(marker.coordinate), "{}", marker.title);
        }
    }

    #[test]
    fn test_fit_all_keeps_focus() {
        let dir = directory();
        let config = MapConfig::default();
        let state = apply_selection(&SearchState::new(), &dir, EntryId(1)).unwrap();
        let view = MapView::build(&dir, &state, &config);
        let fitted = view.clone().fit_all(&config);
        assert_eq!(view.region, fitted.region);
    }

    #[test]
    fn test_view_serializes() {
        let dir = directory();
        let view = MapView::build(&dir, &SearchState::new(), &MapConfig::default());
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("latitude_delta"));
        assert!(json.contains("\"highlighted\":false"));
    }
}
