//! Map presentation
//!
//! Keeps the marker and camera region for the selected place, resolving its
//! coordinate through the places worker when the selection doesn't carry one.

pub mod map_render;
mod map_state;

pub use map_state::{DEFAULT_ZOOM_DELTA, MapState, Marker, Region};
