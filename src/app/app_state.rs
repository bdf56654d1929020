use std::sync::mpsc::Receiver;

use tokio::sync::mpsc::UnboundedSender;

use crate::config::Config;
use crate::history::HistoryStore;
use crate::input::InputState;
use crate::map::MapState;
use crate::notification::NotificationState;
use crate::places::{Coordinate, PlacesRequest, PlacesResponse};
use crate::search::SearchState;

pub struct App {
    pub input: InputState,
    pub search: SearchState,
    pub map: MapState,
    pub notification: NotificationState,
    pub should_quit: bool,
    pub(super) response_rx: Option<Receiver<PlacesResponse>>,
}

impl App {
    /// Build the app around persisted history.
    ///
    /// `device_location` biases lookups and sets the initial map region.
    pub fn new(history: HistoryStore, config: &Config, device_location: Option<Coordinate>) -> Self {
        let mut search = SearchState::new(history, &config.search);
        search.set_bias(device_location);

        Self {
            input: InputState::new(),
            search,
            map: MapState::new(device_location),
            notification: NotificationState::new(),
            should_quit: false,
            response_rx: None,
        }
    }

    /// Connect the search pipeline and the map to the places worker
    pub fn set_places_channels(
        &mut self,
        request_tx: UnboundedSender<PlacesRequest>,
        response_rx: Receiver<PlacesResponse>,
    ) {
        self.search.set_request_sender(request_tx.clone());
        self.map.set_request_sender(request_tx);
        self.response_rx = Some(response_rx);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }
}
