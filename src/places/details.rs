//! Place detail resolver
//!
//! Looks up a place by its stable identifier and extracts its coordinate.

use reqwest::Url;
use serde::Deserialize;

use super::{API_KEY_HEADER, Coordinate, FIELD_MASK_HEADER, PlacesClient, PlacesError, read_body};

/// Only the location is needed from the detail endpoint
pub const DETAILS_FIELD_MASK: &str = "location";

impl PlacesClient {
    /// Resolve a place identifier to its coordinate
    pub async fn resolve(&self, place_id: &str) -> Result<Coordinate, PlacesError> {
        let url = build_details_url(&self.details_url, place_id, self.language_code.as_deref())?;

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(FIELD_MASK_HEADER, DETAILS_FIELD_MASK)
            .send()
            .await
            .map_err(|e| PlacesError::Network(e.to_string()))?;

        let text = read_body(response).await?;
        parse_response(&text)
    }
}

/// Append the place id as a path segment of the configured base URL
pub fn build_details_url(
    base: &str,
    place_id: &str,
    language_code: Option<&str>,
) -> Result<Url, PlacesError> {
    let mut url = Url::parse(base)
        .map_err(|e| PlacesError::NotConfigured(format!("Invalid details_url '{base}': {e}")))?;

    url.path_segments_mut()
        .map_err(|()| PlacesError::NotConfigured(format!("details_url '{base}' cannot be a base")))?
        .pop_if_empty()
        .push(place_id);

    if let Some(code) = language_code {
        url.query_pairs_mut().append_pair("languageCode", code);
    }

    Ok(url)
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    location: Option<Coordinate>,
}

pub fn parse_response(body: &str) -> Result<Coordinate, PlacesError> {
    let response: DetailsResponse =
        serde_json::from_str(body).map_err(|e| PlacesError::Parse(e.to_string()))?;

    response
        .location
        .ok_or_else(|| PlacesError::Parse("response has no location".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://places.googleapis.com/v1/places";

    #[test]
    fn test_details_url_appends_place_id() {
        let url = build_details_url(BASE, "ChIJLU7jZClu5kcR4PcOOO6p3I0", None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://places.googleapis.com/v1/places/ChIJLU7jZClu5kcR4PcOOO6p3I0"
        );
    }

    #[test]
    fn test_details_url_handles_trailing_slash() {
        let url = build_details_url("https://example.com/places/", "p1", None).unwrap();
        assert_eq!(url.as_str(), "https://example.com/places/p1");
    }

    #[test]
    fn test_details_url_escapes_id() {
        let url = build_details_url(BASE, "a b/c", None).unwrap();
        assert_eq!(url.path(), "/v1/places/a%20b%2Fc");
    }

    #[test]
    fn test_details_url_with_language_code() {
        let url = build_details_url(BASE, "p1", Some("de")).unwrap();
        assert_eq!(url.query(), Some("languageCode=de"));
    }

    #[test]
    fn test_details_url_rejects_invalid_base() {
        assert!(matches!(
            build_details_url("not a url", "p1", None),
            Err(PlacesError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_parse_location() {
        let body = r#"{"location":{"latitude":48.8584,"longitude":2.2945}}"#;
        assert_eq!(parse_response(body).unwrap(), Coordinate::new(48.8584, 2.2945));
    }

    #[test]
    fn test_parse_missing_location_is_parse_error() {
        assert!(matches!(parse_response("{}"), Err(PlacesError::Parse(_))));
    }

    #[test]
    fn test_parse_malformed_body_is_parse_error() {
        assert!(matches!(
            parse_response(r#"{"location":{"latitude":"north"}}"#),
            Err(PlacesError::Parse(_))
        ));
    }
}
