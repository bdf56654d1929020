//! Tests for app_events

use std::time::{Duration, Instant};

use proptest::prelude::*;
use ratatui::crossterm::event::{KeyCode, KeyModifiers};

use crate::history::{HISTORY_KEY, MemoryStore};
use crate::notification::NotificationType;
use crate::places::{Coordinate, PlaceSuggestion, PlacesError, PlacesRequest, PlacesResponse};
use crate::test_utils::test_helpers::{
    FakeWorker, connected_app, key, key_with_mods, test_app, type_text,
};

/// Past any debounce deadline set by keys typed just before
fn after_debounce() -> Instant {
    Instant::now() + Duration::from_secs(1)
}

fn suggest_id(worker: &mut FakeWorker) -> (u64, String) {
    match worker.next_request() {
        PlacesRequest::Suggest {
            request_id, text, ..
        } => (request_id, text),
        other => panic!("Expected suggest request, got {:?}", other),
    }
}

fn resolve_id(worker: &mut FakeWorker) -> (u64, String) {
    match worker.next_request() {
        PlacesRequest::Resolve {
            request_id,
            place_id,
            ..
        } => (request_id, place_id),
        other => panic!("Expected resolve request, got {:?}", other),
    }
}

#[test]
fn test_typing_updates_text_and_focus() {
    let mut app = test_app();
    type_text(&mut app, "Ei");

    assert_eq!(app.text(), "Ei");
    assert_eq!(app.search.text(), "Ei");
    assert!(app.search.is_focused());
}

#[test]
fn test_ctrl_c_quits() {
    let mut app = test_app();
    type_text(&mut app, "Paris");
    app.handle_key_event(key_with_mods(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit());
}

#[test]
fn test_esc_clears_then_quits() {
    let mut app = test_app();
    type_text(&mut app, "Paris");

    app.handle_key_event(key(KeyCode::Esc));
    assert!(!app.should_quit());
    assert_eq!(app.text(), "");
    assert_eq!(app.search.text(), "");
    assert!(!app.search.is_focused());

    app.handle_key_event(key(KeyCode::Esc));
    assert!(app.should_quit());
}

#[test]
fn test_paste_updates_search() {
    let mut app = test_app();
    app.handle_paste_event("Eiffel Tower");
    assert_eq!(app.text(), "Eiffel Tower");
    assert_eq!(app.search.text(), "Eiffel Tower");
}

#[test]
fn test_full_flow_suggest_select_resolve() {
    let memory = MemoryStore::new();
    let (mut app, mut worker) = connected_app(memory.clone());

    type_text(&mut app, "Eif");
    assert!(!worker.has_request());

    app.tick(after_debounce());
    let (request_id, text) = suggest_id(&mut worker);
    assert_eq!(text, "Eif");
    assert!(app.search.is_loading());

    worker.respond(PlacesResponse::Suggestions {
        request_id,
        result: Ok(vec![PlaceSuggestion::new("p1", "Eiffel Tower", "Paris, France")]),
    });
    app.poll_places_responses();

    assert!(!app.search.is_loading());
    assert_eq!(app.search.suggestions().len(), 1);

    app.handle_key_event(key(KeyCode::Enter));

    assert_eq!(app.text(), "");
    assert!(!app.search.is_focused());
    assert_eq!(app.search.history()[0].id, "p1");
    assert!(memory.raw(HISTORY_KEY).unwrap().contains("Eiffel Tower"));

    let (resolve_request, place_id) = resolve_id(&mut worker);
    assert_eq!(place_id, "p1");

    worker.respond(PlacesResponse::Resolved {
        request_id: resolve_request,
        place_id,
        result: Ok(Coordinate::new(48.8584, 2.2945)),
    });
    app.poll_places_responses();

    let marker = app.map.marker().unwrap();
    assert_eq!(marker.coordinate, Coordinate::new(48.8584, 2.2945));
    assert_eq!(marker.label, "Eiffel Tower");
}

#[test]
fn test_stale_suggestions_not_applied() {
    let (mut app, mut worker) = connected_app(MemoryStore::new());

    type_text(&mut app, "Pa");
    app.tick(after_debounce());
    let (first, _) = suggest_id(&mut worker);

    type_text(&mut app, "r");
    app.tick(after_debounce());
    let (second, text) = suggest_id(&mut worker);
    assert_eq!(text, "Par");

    // Answers arrive out of order
    worker.respond(PlacesResponse::Suggestions {
        request_id: second,
        result: Ok(vec![PlaceSuggestion::new("p2", "Paris", "France")]),
    });
    worker.respond(PlacesResponse::Suggestions {
        request_id: first,
        result: Ok(vec![PlaceSuggestion::new("p3", "Pasadena", "CA")]),
    });
    app.poll_places_responses();

    let ids: Vec<&str> = app.search.suggestions().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["p2"]);
}

#[test]
fn test_lookup_failure_keeps_previous_suggestions() {
    let (mut app, mut worker) = connected_app(MemoryStore::new());

    type_text(&mut app, "Lou");
    app.tick(after_debounce());
    let (first, _) = suggest_id(&mut worker);
    worker.respond(PlacesResponse::Suggestions {
        request_id: first,
        result: Ok(vec![PlaceSuggestion::new("p4", "Louvre", "Paris")]),
    });
    app.poll_places_responses();

    type_text(&mut app, "v");
    app.tick(after_debounce());
    let (second, _) = suggest_id(&mut worker);
    worker.respond(PlacesResponse::Suggestions {
        request_id: second,
        result: Err(PlacesError::Network("offline".to_string())),
    });
    app.poll_places_responses();

    assert_eq!(app.search.suggestions()[0].id, "p4");
    assert!(!app.search.is_loading());
}

#[test]
fn test_arrow_keys_move_highlight() {
    let (mut app, mut worker) = connected_app(MemoryStore::new());

    type_text(&mut app, "Par");
    app.tick(after_debounce());
    let (request_id, _) = suggest_id(&mut worker);
    worker.respond(PlacesResponse::Suggestions {
        request_id,
        result: Ok(vec![
            PlaceSuggestion::new("a", "Paris", "France"),
            PlaceSuggestion::new("b", "Parma", "Italy"),
        ]),
    });
    app.poll_places_responses();

    app.handle_key_event(key(KeyCode::Down));
    assert_eq!(app.search.highlighted_index(), 1);
    app.handle_key_event(key(KeyCode::Down));
    assert_eq!(app.search.highlighted_index(), 0);
    app.handle_key_event(key(KeyCode::Up));
    assert_eq!(app.search.highlighted_index(), 1);

    app.handle_key_event(key(KeyCode::Enter));
    assert_eq!(app.map.selected().unwrap().id, "b");
}

#[test]
fn test_enter_without_items_does_nothing() {
    let (mut app, mut worker) = connected_app(MemoryStore::new());
    app.handle_key_event(key(KeyCode::Enter));
    assert!(app.map.selected().is_none());
    assert!(!worker.has_request());
}

#[test]
fn test_enter_after_selection_does_not_reselect() {
    let memory = MemoryStore::new();
    let (mut app, mut worker) = connected_app(memory.clone());

    type_text(&mut app, "Eif");
    app.tick(after_debounce());
    let (request_id, _) = suggest_id(&mut worker);
    worker.respond(PlacesResponse::Suggestions {
        request_id,
        result: Ok(vec![PlaceSuggestion::new("p1", "Eiffel Tower", "Paris, France")]),
    });
    app.poll_places_responses();

    app.handle_key_event(key(KeyCode::Enter));
    resolve_id(&mut worker);
    let saved = memory.raw(HISTORY_KEY);
    assert!(!app.search.is_focused());

    // The dropdown is hidden, so the recent entry it would list is not selectable
    app.handle_key_event(key(KeyCode::Enter));
    assert!(!worker.has_request());
    assert_eq!(memory.raw(HISTORY_KEY), saved);
    assert!(app.map.is_resolving());
}

#[test]
fn test_enter_after_escape_does_not_select_recent() {
    let memory = MemoryStore::new();
    let (mut app, mut worker) = connected_app(memory);

    type_text(&mut app, "Eif");
    app.tick(after_debounce());
    let (request_id, _) = suggest_id(&mut worker);
    worker.respond(PlacesResponse::Suggestions {
        request_id,
        result: Ok(vec![PlaceSuggestion::new("p1", "Eiffel Tower", "Paris, France")]),
    });
    app.poll_places_responses();
    app.handle_key_event(key(KeyCode::Enter));
    resolve_id(&mut worker);

    type_text(&mut app, "x");
    app.handle_key_event(key(KeyCode::Esc));
    app.handle_key_event(key(KeyCode::Enter));

    assert!(!worker.has_request());
    assert_eq!(app.search.history().len(), 1);
}

#[test]
fn test_disconnected_worker_is_dropped() {
    let (mut app, worker) = connected_app(MemoryStore::new());
    drop(worker);

    app.poll_places_responses();
    assert!(app.response_rx.is_none());
    let notification = app.notification.current().unwrap();
    assert_eq!(notification.notification_type, NotificationType::Error);
    assert!(notification.message.contains("unavailable"));

    app.handle_key_event(key(KeyCode::Esc));
    assert!(app.notification.current().is_none());
    assert!(!app.should_quit());

    // Still usable without a worker
    type_text(&mut app, "Paris");
    app.tick(after_debounce());
    assert_eq!(app.search.text(), "Paris");
}

#[test]
fn test_poll_timeout_tracks_debounce_deadline() {
    let mut app = test_app();
    let now = Instant::now();
    assert_eq!(app.poll_timeout(now), super::EVENT_POLL_TIMEOUT);

    type_text(&mut app, "Paris");
    let deadline = app.search.next_deadline().unwrap();
    assert!(app.poll_timeout(deadline) == Duration::ZERO);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Whatever is typed, the input field and the search pipeline agree
    #[test]
    fn prop_input_and_search_text_agree(text in "[a-zA-Z ]{0,20}") {
        let mut app = test_app();
        type_text(&mut app, &text);
        prop_assert_eq!(app.text(), text.as_str());
        prop_assert_eq!(app.search.text(), text.as_str());
    }
}
