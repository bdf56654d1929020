//! Tests for the autocomplete request/response mapping

use super::*;
use crate::places::Coordinate;

#[test]
fn test_request_body_without_bias_omits_location_bias() {
    let body = build_request_body("Eiffel", None, None);
    assert_eq!(body, json!({ "input": "Eiffel" }));
    assert!(body.get("locationBias").is_none());
}

#[test]
fn test_request_body_with_bias_has_circle_and_radius() {
    let bias = LocationBias::around(Coordinate::new(48.85, 2.35));
    let body = build_request_body("Eiffel", Some(&bias), None);

    let circle = &body["locationBias"]["circle"];
    assert_eq!(circle["center"]["latitude"], json!(48.85));
    assert_eq!(circle["center"]["longitude"], json!(2.35));
    assert_eq!(circle["radius"], json!(5000.0));
}

#[test]
fn test_request_body_includes_language_code() {
    let body = build_request_body("Louvre", None, Some("fr"));
    assert_eq!(body["languageCode"], json!("fr"));
}

#[test]
fn test_field_mask_limits_to_id_and_display_text() {
    assert!(AUTOCOMPLETE_FIELD_MASK.contains("placePrediction.placeId"));
    assert!(AUTOCOMPLETE_FIELD_MASK.contains("placePrediction.structuredFormat"));
}

#[test]
fn test_parse_single_suggestion() {
    let body = r#"{
        "suggestions": [
            {
                "placePrediction": {
                    "placeId": "p1",
                    "structuredFormat": {
                        "mainText": { "text": "Eiffel Tower" },
                        "secondaryText": { "text": "Paris, France" }
                    }
                }
            }
        ]
    }"#;

    let suggestions = parse_response(body).unwrap();
    assert_eq!(
        suggestions,
        vec![PlaceSuggestion::new("p1", "Eiffel Tower", "Paris, France")]
    );
}

#[test]
fn test_parse_preserves_remote_order_and_duplicate_labels() {
    let body = r#"{
        "suggestions": [
            { "placePrediction": { "placeId": "b", "structuredFormat": { "mainText": { "text": "Main St" }, "secondaryText": { "text": "Springfield" } } } },
            { "placePrediction": { "placeId": "a", "structuredFormat": { "mainText": { "text": "Main St" }, "secondaryText": { "text": "Springfield" } } } }
        ]
    }"#;

    let ids: Vec<String> = parse_response(body)
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn test_parse_empty_object_is_no_results() {
    assert!(parse_response("{}").unwrap().is_empty());
}

#[test]
fn test_parse_skips_query_predictions() {
    let body = r#"{
        "suggestions": [
            { "queryPrediction": { "text": { "text": "pizza near me" } } },
            { "placePrediction": { "placeId": "p9", "structuredFormat": { "mainText": { "text": "Pizzeria" } } } }
        ]
    }"#;

    let suggestions = parse_response(body).unwrap();
    assert_eq!(suggestions, vec![PlaceSuggestion::new("p9", "Pizzeria", "")]);
}

#[test]
fn test_parse_falls_back_to_flat_text() {
    let body = r#"{"suggestions":[{"placePrediction":{"placeId":"p3","text":{"text":"Louvre Museum, Paris"}}}]}"#;
    let suggestions = parse_response(body).unwrap();
    assert_eq!(suggestions[0].primary_label, "Louvre Museum, Paris");
    assert_eq!(suggestions[0].secondary_label, "");
}

#[test]
fn test_parse_malformed_body_is_parse_error() {
    assert!(matches!(
        parse_response("<html>oops</html>"),
        Err(PlacesError::Parse(_))
    ));
    assert!(matches!(
        parse_response(r#"{"suggestions": 3}"#),
        Err(PlacesError::Parse(_))
    ));
}

#[test]
fn test_parse_missing_place_id_is_parse_error() {
    let body = r#"{"suggestions":[{"placePrediction":{"structuredFormat":{"mainText":{"text":"x"}}}}]}"#;
    assert!(matches!(parse_response(body), Err(PlacesError::Parse(_))));
}
