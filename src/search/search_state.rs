use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use super::debouncer::Debouncer;
use crate::config::SearchConfig;
use crate::history::{HistoryStore, filter_recent};
use crate::places::{
    Coordinate, LocationBias, PlaceRecord, PlaceSuggestion, PlacesError, PlacesRequest,
};

/// Transient state of the search box, reset on selection or clear
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub text: String,
    pub suggestions: Vec<PlaceSuggestion>,
    /// A lookup is outstanding
    pub loading: bool,
    /// The input owns keyboard focus; losing it dismisses the keyboard
    pub focused: bool,
}

/// One row of the dropdown
#[derive(Debug, Clone, PartialEq)]
pub enum SearchItem {
    Recent(PlaceRecord),
    Suggestion(PlaceSuggestion),
}

impl SearchItem {
    pub fn id(&self) -> &str {
        match self {
            SearchItem::Recent(r) => &r.id,
            SearchItem::Suggestion(s) => &s.id,
        }
    }

    pub fn primary_label(&self) -> &str {
        match self {
            SearchItem::Recent(r) => &r.primary_label,
            SearchItem::Suggestion(s) => &s.primary_label,
        }
    }

    pub fn secondary_label(&self) -> &str {
        match self {
            SearchItem::Recent(r) => &r.secondary_label,
            SearchItem::Suggestion(s) => &s.secondary_label,
        }
    }
}

/// The search pipeline
///
/// Text edits update [`QueryState`] immediately and (re)start the debounce
/// window. When the window elapses, [`tick`](SearchState::tick) sends a
/// `Suggest` request to the places worker tagged with a fresh request id.
/// Responses are applied only when they answer the latest request issued;
/// anything else is stale and dropped.
pub struct SearchState {
    query: QueryState,
    history: HistoryStore,
    /// History entries matching the current text
    recent: Vec<PlaceRecord>,
    debouncer: Debouncer<String>,
    min_query_chars: usize,
    bias: Option<LocationBias>,
    request_tx: Option<UnboundedSender<PlacesRequest>>,
    /// Incremented for every lookup sent
    request_id: u64,
    /// Id of the lookup whose answer will be applied, if any
    in_flight_request_id: Option<u64>,
    current_cancel_token: Option<CancellationToken>,
    /// Highlighted row across recent entries followed by suggestions
    highlighted: usize,
}

impl SearchState {
    /// Create the pipeline and seed it from persisted history
    pub fn new(mut history: HistoryStore, config: &SearchConfig) -> Self {
        let recent = filter_recent("", history.load());

        Self {
            query: QueryState::default(),
            history,
            recent,
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_ms)),
            min_query_chars: config.min_query_chars,
            bias: None,
            request_tx: None,
            request_id: 0,
            in_flight_request_id: None,
            current_cancel_token: None,
            highlighted: 0,
        }
    }

    /// Set the channel used to reach the places worker
    pub fn set_request_sender(&mut self, request_tx: UnboundedSender<PlacesRequest>) {
        self.request_tx = Some(request_tx);
    }

    /// Bias subsequent lookups around `center`, or remove the bias with `None`
    pub fn set_bias(&mut self, center: Option<Coordinate>) {
        self.bias = center.map(LocationBias::around);
    }

    pub fn bias(&self) -> Option<&LocationBias> {
        self.bias.as_ref()
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn text(&self) -> &str {
        &self.query.text
    }

    pub fn suggestions(&self) -> &[PlaceSuggestion] {
        &self.query.suggestions
    }

    /// Recent searches matching the current text
    pub fn recent(&self) -> &[PlaceRecord] {
        &self.recent
    }

    pub fn history(&self) -> &[PlaceRecord] {
        self.history.entries()
    }

    pub fn is_loading(&self) -> bool {
        self.query.loading
    }

    pub fn is_focused(&self) -> bool {
        self.query.focused
    }

    pub fn focus(&mut self) {
        self.query.focused = true;
    }

    pub fn current_request_id(&self) -> u64 {
        self.request_id
    }

    /// When the pending lookup will fire, for sizing the event loop's poll timeout
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Handle a text edit from the input field
    ///
    /// Input shorter than the minimum (after trimming) never reaches the network:
    /// the pending lookup and any in-flight one are dropped and suggestions cleared.
    pub fn on_text_changed(&mut self, text: &str, now: Instant) {
        self.query.text = text.to_string();
        self.query.focused = true;
        self.refresh_recent();

        if text.trim().chars().count() < self.min_query_chars {
            self.debouncer.cancel();
            self.cancel_in_flight_request();
            self.query.suggestions.clear();
            return;
        }

        self.debouncer.trigger(now, text.to_string());
    }

    /// Fire the debounced lookup once its quiet period has elapsed.
    ///
    /// Returns true if a request was sent.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(text) => self.dispatch_lookup(text),
            None => false,
        }
    }

    fn dispatch_lookup(&mut self, text: String) -> bool {
        self.cancel_in_flight_request();

        let Some(request_tx) = self.request_tx.as_ref() else {
            log::warn!("No places worker; lookup for {:?} skipped", text);
            return false;
        };

        self.request_id = self.request_id.wrapping_add(1);
        let request_id = self.request_id;
        let cancel_token = CancellationToken::new();

        #[cfg(debug_assertions)]
        log::debug!("Sending lookup {} for {:?}", request_id, text);

        let request = PlacesRequest::Suggest {
            text,
            bias: self.bias,
            request_id,
            cancel_token: cancel_token.clone(),
        };

        if request_tx.send(request).is_err() {
            log::warn!("Places worker disconnected; lookup {} dropped", request_id);
            return false;
        }

        self.in_flight_request_id = Some(request_id);
        self.current_cancel_token = Some(cancel_token);
        self.query.loading = true;
        true
    }

    /// Abandon the in-flight lookup: its token is cancelled and its answer will be ignored
    fn cancel_in_flight_request(&mut self) {
        if let Some(token) = self.current_cancel_token.take() {
            #[cfg(debug_assertions)]
            log::debug!(
                "Cancelling in-flight lookup {:?}",
                self.in_flight_request_id
            );
            token.cancel();
        }
        self.in_flight_request_id = None;
        self.query.loading = false;
    }

    /// Apply a lookup answer from the worker.
    ///
    /// Returns false when the answer is stale. Otherwise loading is cleared
    /// whatever the outcome; failures are logged and leave the list as it was.
    pub fn handle_suggestions(
        &mut self,
        request_id: u64,
        result: Result<Vec<PlaceSuggestion>, PlacesError>,
    ) -> bool {
        if self.in_flight_request_id != Some(request_id) {
            #[cfg(debug_assertions)]
            log::debug!(
                "Dropping stale lookup {} (current {:?})",
                request_id,
                self.in_flight_request_id
            );
            return false;
        }

        self.in_flight_request_id = None;
        self.current_cancel_token = None;
        self.query.loading = false;

        match result {
            Ok(suggestions) => {
                self.query.suggestions = suggestions;
                self.highlighted = 0;
            }
            Err(e) => {
                log::warn!("Lookup {} failed: {}", request_id, e);
            }
        }
        true
    }

    /// Dropdown rows: recent searches first, then remote suggestions
    pub fn items(&self) -> Vec<SearchItem> {
        self.recent
            .iter()
            .cloned()
            .map(SearchItem::Recent)
            .chain(
                self.query
                    .suggestions
                    .iter()
                    .cloned()
                    .map(SearchItem::Suggestion),
            )
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.recent.len() + self.query.suggestions.len()
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn highlight_next(&mut self) {
        let count = self.item_count();
        if count > 0 {
            self.highlighted = (self.highlighted + 1) % count;
        }
    }

    pub fn highlight_previous(&mut self) {
        let count = self.item_count();
        if count > 0 {
            self.highlighted = if self.highlighted == 0 {
                count - 1
            } else {
                self.highlighted - 1
            };
        }
    }

    /// Select the highlighted row, if the dropdown is showing one
    pub fn select_highlighted(&mut self) -> Option<PlaceRecord> {
        if !self.query.focused {
            return None;
        }
        let item = self.items().into_iter().nth(self.highlighted)?;
        Some(self.select(item))
    }

    /// Select a recent entry or a suggestion.
    ///
    /// Clears the query and focus, abandons pending lookups and records the
    /// place in history. A failed history write is logged; the returned record
    /// and the in-memory history are unaffected.
    pub fn select(&mut self, item: SearchItem) -> PlaceRecord {
        let record = match item {
            SearchItem::Recent(record) => record,
            SearchItem::Suggestion(suggestion) => PlaceRecord::from(suggestion),
        };

        self.reset_query();

        if let Err(e) = self.history.append(record.clone()) {
            log::warn!("Failed to save recent search {:?}: {}", record.id, e);
        }
        self.refresh_recent();

        record
    }

    /// Reset the query to empty and unfocused; history is untouched
    pub fn clear(&mut self) {
        self.reset_query();
        self.refresh_recent();
    }

    fn reset_query(&mut self) {
        self.debouncer.cancel();
        self.cancel_in_flight_request();
        self.query = QueryState::default();
        self.highlighted = 0;
    }

    fn refresh_recent(&mut self) {
        self.recent = filter_recent(&self.query.text, self.history.entries());
        self.highlighted = 0;
    }
}

#[cfg(test)]
#[path = "search_state_tests.rs"]
mod search_state_tests;
