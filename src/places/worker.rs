//! Places worker thread
//!
//! Runs autocomplete and detail requests on a background thread so the UI
//! loop never waits on the network. Requests arrive on a tokio channel and each
//! one is handled in its own task, so completions can come back in any order;
//! every response carries the request id it answers so the receiving side can
//! drop the ones it no longer cares about.

use std::sync::mpsc::Sender;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use super::{Coordinate, LocationBias, PlaceSuggestion, PlacesClient, PlacesError};
use crate::config::PlacesConfig;

/// Request messages sent to the places worker
#[derive(Debug)]
pub enum PlacesRequest {
    /// Autocomplete lookup for the given text
    Suggest {
        text: String,
        bias: Option<LocationBias>,
        /// Sequence number used to discard superseded responses
        request_id: u64,
        cancel_token: CancellationToken,
    },
    /// Coordinate lookup for a stable place identifier
    Resolve {
        place_id: String,
        request_id: u64,
        cancel_token: CancellationToken,
    },
}

/// Response messages received from the places worker
#[derive(Debug)]
pub enum PlacesResponse {
    Suggestions {
        request_id: u64,
        result: Result<Vec<PlaceSuggestion>, PlacesError>,
    },
    Resolved {
        request_id: u64,
        place_id: String,
        result: Result<Coordinate, PlacesError>,
    },
}

/// Spawn the places worker thread
///
/// Creates a background thread with a single-threaded tokio runtime that
/// listens for requests until the request channel is closed.
pub fn spawn_worker(
    config: &PlacesConfig,
    request_rx: UnboundedReceiver<PlacesRequest>,
    response_tx: Sender<PlacesResponse>,
) {
    let client_result = PlacesClient::from_config(config);

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create tokio runtime for places worker: {}", e);
                return;
            }
        };

        rt.block_on(worker_loop(client_result, request_rx, response_tx));
    });
}

/// Main async worker loop - processes requests until the channel is closed
async fn worker_loop(
    client_result: Result<PlacesClient, PlacesError>,
    mut request_rx: UnboundedReceiver<PlacesRequest>,
    response_tx: Sender<PlacesResponse>,
) {
    let client = match client_result {
        Ok(client) => Some(client),
        Err(e) => {
            log::warn!("Places worker running without a client: {}", e);
            None
        }
    };

    while let Some(request) = request_rx.recv().await {
        let client = client.clone();
        let response_tx = response_tx.clone();
        tokio::spawn(async move {
            let response = handle_request(client.as_ref(), request).await;
            // Receiver gone means the UI is shutting down
            let _ = response_tx.send(response);
        });
    }

    #[cfg(debug_assertions)]
    log::debug!("Places request channel closed, worker exiting");
}

/// Execute a single request, racing it against its cancellation token
async fn handle_request(client: Option<&PlacesClient>, request: PlacesRequest) -> PlacesResponse {
    match request {
        PlacesRequest::Suggest {
            text,
            bias,
            request_id,
            cancel_token,
        } => {
            let result = match client {
                Some(client) => {
                    with_cancel(&cancel_token, client.suggest(&text, bias.as_ref())).await
                }
                None => Err(not_configured()),
            };
            PlacesResponse::Suggestions { request_id, result }
        }
        PlacesRequest::Resolve {
            place_id,
            request_id,
            cancel_token,
        } => {
            let result = match client {
                Some(client) => with_cancel(&cancel_token, client.resolve(&place_id)).await,
                None => Err(not_configured()),
            };
            PlacesResponse::Resolved {
                request_id,
                place_id,
                result,
            }
        }
    }
}

async fn with_cancel<T>(
    cancel_token: &CancellationToken,
    future: impl Future<Output = Result<T, PlacesError>>,
) -> Result<T, PlacesError> {
    if cancel_token.is_cancelled() {
        return Err(PlacesError::Cancelled);
    }

    tokio::select! {
        biased;

        _ = cancel_token.cancelled() => Err(PlacesError::Cancelled),
        result = future => result,
    }
}

fn not_configured() -> PlacesError {
    PlacesError::NotConfigured(
        "Places API key missing. Add 'api_key' in the [places] section of the config file."
            .to_string(),
    )
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
