//! Neutron Core
//!
//! Shell coordination for the Neutron browser. The core owns all state; the
//! presentation layer renders a `ViewState` and reports user intents and
//! content frame signals back as `ShellAction`s.

mod browser;
mod config;
mod error;
mod shortcuts;
mod view;

pub use browser::{Browser, ShellAction};
pub use config::Config;
pub use error::{CoreError, ShortcutError};
pub use shortcuts::{Accelerator, KeyPress, Keymap, ShortcutAction};
pub use view::{
    AddressBarView, ContentPane, PaneContent, TabView, ViewState, ADDRESS_PLACEHOLDER,
    FRAME_SANDBOX,
};

// Re-export core components
pub use neutron_navigation::{
    display_title, format_url, InputResolution, InputResolver, NavigationError, TabHistory,
    NEW_TAB_URL,
};
pub use neutron_tabs::{LoadState, NavigationTicket, Tab, TabError, TabManager};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// Output goes to stderr; stdout belongs to the host protocol. `RUST_LOG`
/// overrides `default_filter`. Calling this more than once is a no-op.
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    if subscriber.try_init().is_err() {
        tracing::debug!("Logging already initialized");
    }
}
