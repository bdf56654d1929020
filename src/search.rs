//! Search module
//!
//! The search pipeline: debounced text input, remote autocomplete lookups,
//! recent-search filtering, and selection.

mod debouncer;
pub mod search_render;
mod search_state;

pub use debouncer::{Debouncer, TimerHandle, TimerQueue};
pub use search_state::{QueryState, SearchItem, SearchState};
