//! Device location used to bias search results
//!
//! Location is best effort: a denied permission or a missing fix disables the
//! bias and never blocks search.

use thiserror::Error;

use crate::config::LocationConfig;
use crate::places::Coordinate;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// Source of the current position
pub trait LocationProvider {
    /// Ask for permission to read the location
    fn request_permission(&mut self) -> Result<(), LocationError>;

    /// One-shot position fetch
    fn current_position(&mut self) -> Result<Coordinate, LocationError>;
}

/// Position taken from the `[location]` config section.
///
/// Permission is granted only when the user opted in with `enabled = true`.
#[derive(Debug, Clone)]
pub struct ConfiguredLocation {
    config: LocationConfig,
}

impl ConfiguredLocation {
    pub fn new(config: LocationConfig) -> Self {
        Self { config }
    }
}

impl LocationProvider for ConfiguredLocation {
    fn request_permission(&mut self) -> Result<(), LocationError> {
        if self.config.enabled {
            Ok(())
        } else {
            Err(LocationError::PermissionDenied)
        }
    }

    fn current_position(&mut self) -> Result<Coordinate, LocationError> {
        let coordinate = self.config.coordinate().ok_or_else(|| {
            LocationError::Unavailable("latitude/longitude not configured".to_string())
        })?;

        if !coordinate.is_valid() {
            return Err(LocationError::Unavailable(format!(
                "({}, {}) is out of range",
                coordinate.latitude, coordinate.longitude
            )));
        }

        Ok(coordinate)
    }
}

/// Provider used with `--no-location`: always denied
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn request_permission(&mut self) -> Result<(), LocationError> {
        Err(LocationError::PermissionDenied)
    }

    fn current_position(&mut self) -> Result<Coordinate, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

/// Request permission and fetch the position once.
///
/// Failures are logged and yield `None`, which disables the search bias.
pub fn resolve_bias(provider: &mut dyn LocationProvider) -> Option<Coordinate> {
    let result = provider
        .request_permission()
        .and_then(|()| provider.current_position());

    match result {
        Ok(coordinate) => {
            #[cfg(debug_assertions)]
            log::debug!(
                "Search bias at ({}, {})",
                coordinate.latitude,
                coordinate.longitude
            );
            Some(coordinate)
        }
        Err(e) => {
            log::info!("Search bias disabled: {}", e);
            None
        }
    }
}
