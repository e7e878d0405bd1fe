//! Neutron Tab Management
//!
//! Owns the ordered tab list, each tab's history timeline and its load
//! lifecycle. The list is never empty and exactly one tab is active.
//! Load signals from the content frame are keyed by a per-tab generation so
//! late signals from a superseded navigation are ignored.

mod error;
mod manager;
mod state;
mod tab;

pub use error::TabError;
pub use manager::{NavigationTicket, TabManager, DEFAULT_RELOAD_FALLBACK};
pub use state::LoadState;
pub use tab::Tab;

pub type Result<T> = std::result::Result<T, TabError>;
