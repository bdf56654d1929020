//! Autocomplete client
//!
//! Sends free text (plus an optional circular location bias) to the suggestion
//! endpoint and maps the response into [`PlaceSuggestion`] records, keeping the
//! order the API returned.

use serde::Deserialize;
use serde_json::{Value, json};

use super::{
    API_KEY_HEADER, FIELD_MASK_HEADER, LocationBias, PlaceSuggestion, PlacesClient, PlacesError,
    read_body,
};

/// Restricts the response to the identifier and display text
pub const AUTOCOMPLETE_FIELD_MASK: &str = "suggestions.placePrediction.placeId,\
suggestions.placePrediction.structuredFormat,\
suggestions.placePrediction.text";

impl PlacesClient {
    /// Fetch suggestions for `text`, biased towards `bias` when present
    pub async fn suggest(
        &self,
        text: &str,
        bias: Option<&LocationBias>,
    ) -> Result<Vec<PlaceSuggestion>, PlacesError> {
        let body = build_request_body(text, bias, self.language_code.as_deref());

        #[cfg(debug_assertions)]
        log::debug!("Autocomplete request: {}", body);

        let response = self
            .client
            .post(&self.autocomplete_url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(FIELD_MASK_HEADER, AUTOCOMPLETE_FIELD_MASK)
            .json(&body)
            .send()
            .await
            .map_err(|e| PlacesError::Network(e.to_string()))?;

        let response_body = read_body(response).await?;
        parse_response(&response_body)
    }
}

/// Build the JSON request body. An absent bias omits `locationBias` entirely.
pub fn build_request_body(
    text: &str,
    bias: Option<&LocationBias>,
    language_code: Option<&str>,
) -> Value {
    let mut body = json!({ "input": text });

    if let Some(bias) = bias {
        body["locationBias"] = json!({
            "circle": {
                "center": {
                    "latitude": bias.center.latitude,
                    "longitude": bias.center.longitude,
                },
                "radius": bias.radius_meters,
            }
        });
    }

    if let Some(code) = language_code {
        body["languageCode"] = json!(code);
    }

    body
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    suggestions: Vec<SuggestionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionEntry {
    /// Query predictions carry no place and are skipped
    place_prediction: Option<PlacePrediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlacePrediction {
    place_id: String,
    structured_format: Option<StructuredFormat>,
    text: Option<FormattableText>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredFormat {
    main_text: FormattableText,
    secondary_text: Option<FormattableText>,
}

#[derive(Debug, Deserialize)]
struct FormattableText {
    text: String,
}

/// Parse an autocomplete response body
///
/// An empty object means "no results". Labels fall back to the flat prediction
/// text when no structured format was returned.
pub fn parse_response(body: &str) -> Result<Vec<PlaceSuggestion>, PlacesError> {
    let response: AutocompleteResponse =
        serde_json::from_str(body).map_err(|e| PlacesError::Parse(e.to_string()))?;

    Ok(response
        .suggestions
        .into_iter()
        .filter_map(|entry| entry.place_prediction)
        .map(|prediction| {
            let (primary, secondary) = match prediction.structured_format {
                Some(format) => (
                    format.main_text.text,
                    format.secondary_text.map(|t| t.text).unwrap_or_default(),
                ),
                None => (
                    prediction.text.map(|t| t.text).unwrap_or_default(),
                    String::new(),
                ),
            };
            PlaceSuggestion::new(prediction.place_id, primary, secondary)
        })
        .collect())
}

#[cfg(test)]
#[path = "autocomplete_tests.rs"]
mod autocomplete_tests;
