//! Campus locations and geographic coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Entry, EntryId, EntryKind, Located};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Degrees north of the equator, in [-90, 90].
    pub latitude: f64,
    /// Degrees east of Greenwich, in [-180, 180].
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate. No range check is performed here.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both components are finite and within WGS84 bounds.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending component.
    pub fn validate(&self) -> Result<(), String> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!("latitude {} out of range", self.latitude));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!("longitude {} out of range", self.longitude));
        }
        Ok(())
    }

    /// Whether the coordinate is a valid WGS84 position.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// A named point of interest on campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    /// Unique identifier.
    pub id: EntryId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Map position.
    pub coordinate: Coordinate,
}

impl PointOfInterest {
    /// Create a point of interest.
    #[must_use]
    pub fn new(
        id: EntryId,
        name: impl Into<String>,
        description: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            coordinate,
        }
    }
}

impl Entry for PointOfInterest {
    const KIND: EntryKind = EntryKind::Location;

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
        vec![("coordinate", self.coordinate.to_string())]
    }

    fn check(&self) -> Result<(), String> {
        self.coordinate.validate()
    }
}

impl Located for PointOfInterest {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}
