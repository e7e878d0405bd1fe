//! Neutron Navigation
//!
//! Address bar input resolution:
//!   1. Qualified `http`/`https` URL → navigate as-is
//!   2. Free text with whitespace → search
//!   3. Bare brand name → `https://www.<name>.com`
//!   4. Domain-like text → `https://<input>`
//!   5. Anything else → search
//!
//! Also hosts the per-tab back/forward timeline and the tab title heuristic.

mod error;
mod history;
mod input;
mod title;

pub use error::NavigationError;
pub use history::TabHistory;
pub use input::{
    format_url, InputResolution, InputResolver, DEFAULT_SEARCH_PREFIX, NEW_TAB_URL,
};
pub use title::{display_title, NEW_TAB_TITLE};

pub type Result<T> = std::result::Result<T, NavigationError>;
