//! Application state management
use neutron_core::{Browser, Config, Result};
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared application state
///
/// Requests and timer ticks both go through `with_browser`, which holds the
/// lock for the whole call so actions apply one at a time, in arrival order.
pub struct AppState {
    browser: Arc<RwLock<Browser>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let browser = Browser::new(config)?;

        Ok(Self {
            browser: Arc::new(RwLock::new(browser)),
        })
    }

    pub fn with_browser<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Browser) -> T,
    {
        let guard = self.browser.write();
        f(&guard)
    }
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            browser: Arc::clone(&self.browser),
        }
    }
}
