//! mapsearch library - place search with autocomplete, recent searches and a map view
//!
//! The binary is a thin shell around these modules; they are exposed for testing.

pub mod app;
pub mod config;
pub mod error;
pub mod help;
pub mod history;
pub mod input;
pub mod location;
pub mod map;
pub mod notification;
pub mod places;
pub mod search;
pub mod theme;

#[cfg(test)]
pub mod test_utils;
pub mod widgets;

pub use app::App;
pub use config::Config;
pub use error::MapSearchError;
