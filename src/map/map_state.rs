use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::places::{Coordinate, PlaceRecord, PlacesError, PlacesRequest};

/// Latitude/longitude span shown around a selected place
pub const DEFAULT_ZOOM_DELTA: f64 = 0.01;

/// Span shown around the device location before anything is selected
const NEARBY_ZOOM_DELTA: f64 = 0.5;

/// Camera position: center plus the visible span in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    pub fn around(center: Coordinate, delta: f64) -> Self {
        Self {
            center,
            latitude_delta: delta,
            longitude_delta: delta,
        }
    }

    /// Whole-world view
    pub fn world() -> Self {
        Self {
            center: Coordinate::new(0.0, 0.0),
            latitude_delta: 180.0,
            longitude_delta: 360.0,
        }
    }

    /// Visible longitude range, clamped to the globe
    pub fn x_bounds(&self) -> [f64; 2] {
        let half = self.longitude_delta / 2.0;
        [
            (self.center.longitude - half).max(-180.0),
            (self.center.longitude + half).min(180.0),
        ]
    }

    /// Visible latitude range, clamped to the globe
    pub fn y_bounds(&self) -> [f64; 2] {
        let half = self.latitude_delta / 2.0;
        [
            (self.center.latitude - half).max(-90.0),
            (self.center.latitude + half).min(90.0),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub label: String,
}

/// What the map shows
///
/// Holds its own copy of the selected record; it never shares state with the
/// search pipeline.
pub struct MapState {
    selected: Option<PlaceRecord>,
    marker: Option<Marker>,
    region: Region,
    request_tx: Option<UnboundedSender<PlacesRequest>>,
    request_id: u64,
    /// Id of the detail lookup whose answer will be applied, if any
    pending_request_id: Option<u64>,
    current_cancel_token: Option<CancellationToken>,
}

impl MapState {
    /// Start centered on the device location when known, otherwise on the world
    pub fn new(device_location: Option<Coordinate>) -> Self {
        let region = device_location
            .map(|c| Region::around(c, NEARBY_ZOOM_DELTA))
            .unwrap_or_else(Region::world);

        Self {
            selected: None,
            marker: None,
            region,
            request_tx: None,
            request_id: 0,
            pending_request_id: None,
            current_cancel_token: None,
        }
    }

    pub fn set_request_sender(&mut self, request_tx: UnboundedSender<PlacesRequest>) {
        self.request_tx = Some(request_tx);
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn selected(&self) -> Option<&PlaceRecord> {
        self.selected.as_ref()
    }

    /// A detail lookup is outstanding
    pub fn is_resolving(&self) -> bool {
        self.pending_request_id.is_some()
    }

    /// Show a newly selected place.
    ///
    /// A record that already carries a coordinate moves the marker right away;
    /// otherwise the coordinate is requested and the marker stays where it is
    /// until the answer arrives.
    pub fn on_selection(&mut self, record: PlaceRecord) {
        self.cancel_pending();

        if let Some(coordinate) = record.coordinate() {
            self.place_marker(coordinate, &record.primary_label);
            self.selected = Some(record);
            return;
        }

        let place_id = record.id.clone();
        self.selected = Some(record);
        self.request_details(place_id);
    }

    fn request_details(&mut self, place_id: String) {
        let Some(request_tx) = self.request_tx.as_ref() else {
            log::warn!("No places worker; cannot resolve {:?}", place_id);
            return;
        };

        self.request_id = self.request_id.wrapping_add(1);
        let request_id = self.request_id;
        let cancel_token = CancellationToken::new();

        let request = PlacesRequest::Resolve {
            place_id,
            request_id,
            cancel_token: cancel_token.clone(),
        };

        if request_tx.send(request).is_err() {
            log::warn!("Places worker disconnected; detail lookup {} dropped", request_id);
            return;
        }

        self.pending_request_id = Some(request_id);
        self.current_cancel_token = Some(cancel_token);
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.current_cancel_token.take() {
            token.cancel();
        }
        self.pending_request_id = None;
    }

    /// Apply a detail answer from the worker.
    ///
    /// Stale answers are dropped. On failure the previous marker stays in place.
    pub fn handle_resolved(
        &mut self,
        request_id: u64,
        result: Result<Coordinate, PlacesError>,
    ) -> bool {
        if self.pending_request_id != Some(request_id) {
            #[cfg(debug_assertions)]
            log::debug!("Dropping stale detail lookup {}", request_id);
            return false;
        }

        self.pending_request_id = None;
        self.current_cancel_token = None;

        match result {
            Ok(coordinate) => {
                let label = match self.selected.as_mut() {
                    Some(record) => {
                        record.set_coordinate(coordinate);
                        record.primary_label.clone()
                    }
                    None => String::new(),
                };
                self.place_marker(coordinate, &label);
            }
            Err(e) => {
                log::warn!("Detail lookup {} failed: {}", request_id, e);
            }
        }
        true
    }

    fn place_marker(&mut self, coordinate: Coordinate, label: &str) {
        self.marker = Some(Marker {
            coordinate,
            label: label.to_string(),
        });
        self.region = Region::around(coordinate, DEFAULT_ZOOM_DELTA);
    }
}
