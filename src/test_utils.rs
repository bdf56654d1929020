//! Shared test fixtures and helpers

#[cfg(test)]
pub mod test_helpers {
    use std::sync::mpsc::{self, Sender};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    use crate::app::App;
    use crate::config::Config;
    use crate::history::{HistoryStore, MemoryStore};
    use crate::places::{Coordinate, PlacesRequest, PlacesResponse};

    /// Stand-in for the places worker: the test reads requests and answers them
    pub struct FakeWorker {
        pub requests: UnboundedReceiver<PlacesRequest>,
        pub responses: Sender<PlacesResponse>,
    }

    impl FakeWorker {
        /// Next request, or panic if none was sent
        pub fn next_request(&mut self) -> PlacesRequest {
            match self.requests.try_recv() {
                Ok(request) => request,
                Err(e) => panic!("Expected a places request: {:?}", e),
            }
        }

        pub fn has_request(&mut self) -> bool {
            !self.requests.is_empty()
        }

        pub fn respond(&self, response: PlacesResponse) {
            self.responses.send(response).unwrap();
        }
    }

    /// App with in-memory history and default config
    pub fn test_app() -> App {
        test_app_with_history(MemoryStore::new())
    }

    pub fn test_app_with_history(memory: MemoryStore) -> App {
        App::new(
            HistoryStore::new(Box::new(memory)),
            &Config::default(),
            None,
        )
    }

    pub fn test_app_with_location(location: Coordinate) -> App {
        App::new(
            HistoryStore::new(Box::new(MemoryStore::new())),
            &Config::default(),
            Some(location),
        )
    }

    /// App wired to a [`FakeWorker`]
    pub fn connected_app(memory: MemoryStore) -> (App, FakeWorker) {
        let mut app = test_app_with_history(memory);
        let (request_tx, requests) = unbounded_channel();
        let (responses, response_rx) = mpsc::channel();
        app.set_places_channels(request_tx, response_rx);
        (app, FakeWorker { requests, responses })
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    /// Type `text` one key at a time
    pub fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
    }
}
