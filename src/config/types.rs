// Configuration type definitions

use serde::Deserialize;

use crate::places::Coordinate;

/// Default autocomplete endpoint (Places API, new)
pub const DEFAULT_AUTOCOMPLETE_URL: &str = "https://places.googleapis.com/v1/places:autocomplete";

/// Default base URL for place details; the place id is appended as a path segment
pub const DEFAULT_DETAILS_URL: &str = "https://places.googleapis.com/v1/places";

fn default_autocomplete_url() -> String {
    DEFAULT_AUTOCOMPLETE_URL.to_string()
}

fn default_details_url() -> String {
    DEFAULT_DETAILS_URL.to_string()
}

/// Default quiet period before a lookup is sent
fn default_debounce_ms() -> u64 {
    300
}

/// Default minimum trimmed input length that triggers a lookup
fn default_min_query_chars() -> usize {
    2
}

/// Places API configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct PlacesConfig {
    /// API key (required for remote lookups)
    pub api_key: Option<String>,
    #[serde(default = "default_autocomplete_url")]
    pub autocomplete_url: String,
    #[serde(default = "default_details_url")]
    pub details_url: String,
    /// Optional language for returned labels (e.g. "en", "fr")
    pub language_code: Option<String>,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        PlacesConfig {
            api_key: None,
            autocomplete_url: default_autocomplete_url(),
            details_url: default_details_url(),
            language_code: None,
        }
    }
}

impl PlacesConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Search box behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
        }
    }
}

/// Stand-in for the device location: a fixed position the user opts into
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationConfig {
    #[serde(default)]
    pub enabled: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationConfig {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.latitude?, self.longitude?))
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub places: PlacesConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub location: LocationConfig,
}

impl Config {
    /// Semantic checks serde cannot express. Returns a user-facing warning.
    pub fn validate(&self) -> Result<(), String> {
        if self.location.enabled {
            match self.location.coordinate() {
                None => {
                    return Err(
                        "Location enabled but latitude/longitude missing; search bias disabled"
                            .to_string(),
                    );
                }
                Some(coordinate) if !coordinate.is_valid() => {
                    return Err(format!(
                        "Location ({}, {}) out of range; search bias disabled",
                        coordinate.latitude, coordinate.longitude
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
