//! Places API integration
//!
//! Defines the place data model, the PlacesError type, and the HTTP client used
//! for autocomplete suggestions and place detail lookups. Network calls run on
//! the worker thread (see [`worker`]) so the UI loop never blocks on them.

use reqwest::Client;
use thiserror::Error;

use crate::config::PlacesConfig;

pub mod autocomplete;
pub mod details;
mod types;
pub mod worker;

pub use types::{Coordinate, LocationBias, PlaceRecord, PlaceSuggestion, BIAS_RADIUS_METERS};
pub use worker::{PlacesRequest, PlacesResponse};

/// Header carrying the API key
const API_KEY_HEADER: &str = "X-Goog-Api-Key";

/// Header restricting which response fields the API returns
const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

/// Errors that can occur while talking to the places API
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlacesError {
    /// No API key configured
    #[error("Places API not configured: {0}")]
    NotConfigured(String),

    /// Transport failure (DNS, TLS, connection reset, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-2xx status
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request was superseded and abandoned
    #[error("Request cancelled")]
    Cancelled,
}

/// HTTP client for the places endpoints
///
/// Cheap to clone: the underlying reqwest client is reference counted.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    client: Client,
    api_key: String,
    autocomplete_url: String,
    details_url: String,
    language_code: Option<String>,
}

impl PlacesClient {
    pub fn new(api_key: String, autocomplete_url: String, details_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            autocomplete_url,
            details_url,
            language_code: None,
        }
    }

    pub fn with_language_code(mut self, language_code: Option<String>) -> Self {
        self.language_code = language_code.filter(|code| !code.trim().is_empty());
        self
    }

    /// Create a client from configuration
    ///
    /// Returns `NotConfigured` when the API key is missing or blank.
    pub fn from_config(config: &PlacesConfig) -> Result<Self, PlacesError> {
        let api_key = config
            .api_key
            .as_ref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                PlacesError::NotConfigured(
                    "Missing API key. Add 'api_key' in the [places] section of the config file."
                        .to_string(),
                )
            })?;

        Ok(Self::new(
            api_key.clone(),
            config.autocomplete_url.clone(),
            config.details_url.clone(),
        )
        .with_language_code(config.language_code.clone()))
    }
}

/// Turn a response into its body text, mapping non-2xx statuses to `PlacesError::Api`
async fn read_body(response: reqwest::Response) -> Result<String, PlacesError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(PlacesError::Api {
            code: status.as_u16(),
            message,
        });
    }

    response
        .text()
        .await
        .map_err(|e| PlacesError::Network(e.to_string()))
}
