// Place data model shared by the pipeline, the history store and the map

use serde::{Deserialize, Serialize};

/// Radius of the circular location bias sent with autocomplete requests
pub const BIAS_RADIUS_METERS: f64 = 5000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components fall inside the valid WGS84 ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Circular hint region preferring nearby results without excluding distant ones
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationBias {
    pub center: Coordinate,
    pub radius_meters: f64,
}

impl LocationBias {
    /// Bias around `center` with the fixed search radius
    pub fn around(center: Coordinate) -> Self {
        Self {
            center,
            radius_meters: BIAS_RADIUS_METERS,
        }
    }
}

/// A single autocomplete result, discarded once superseded or selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceSuggestion {
    pub id: String,
    pub primary_label: String,
    pub secondary_label: String,
}

impl PlaceSuggestion {
    pub fn new(
        id: impl Into<String>,
        primary_label: impl Into<String>,
        secondary_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            primary_label: primary_label.into(),
            secondary_label: secondary_label.into(),
        }
    }
}

/// A selected place, as persisted in the recent-searches list
///
/// The coordinate stays empty until the detail lookup answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    pub id: String,
    #[serde(default)]
    pub primary_label: String,
    #[serde(default)]
    pub secondary_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl PlaceRecord {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        }
    }

    pub fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.latitude = Some(coordinate.latitude);
        self.longitude = Some(coordinate.longitude);
    }

    /// Case-insensitive substring match on either label; `needle` must already be lowercase
    pub fn matches(&self, needle: &str) -> bool {
        self.primary_label.to_lowercase().contains(needle)
            || self.secondary_label.to_lowercase().contains(needle)
    }
}

impl From<PlaceSuggestion> for PlaceRecord {
    fn from(suggestion: PlaceSuggestion) -> Self {
        Self {
            id: suggestion.id,
            primary_label: suggestion.primary_label,
            secondary_label: suggestion.secondary_label,
            latitude: None,
            longitude: None,
        }
    }
}
