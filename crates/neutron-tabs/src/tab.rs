//! Tab data structure
//!
//! The tab strip shows:
//! - Title derived from the URL
//! - Loading indicator
//! - Back/forward availability for the active tab

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use neutron_navigation::{display_title, NEW_TAB_URL};

use crate::error::TabError;
use crate::state::LoadState;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    /// Unique identifier
    pub id: String,
    /// Label derived from `url`
    pub title: String,
    /// Current URL; `about:blank` means the internal new-tab page
    pub url: String,
    /// Current state in the load lifecycle
    pub load_state: LoadState,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    /// Reason reported by the frame for the last failed load
    pub last_error: Option<String>,
    /// Bumped by every navigation, history step and reload
    pub generation: u64,
    /// When the tab was created
    pub created_at: DateTime<Utc>,
    /// Advisory; nothing orders or evicts tabs by it
    pub last_accessed_at: DateTime<Utc>,
}

impl Tab {
    /// A tab showing the internal new-tab page.
    pub fn new() -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            title: display_title(NEW_TAB_URL),
            url: NEW_TAB_URL.to_string(),
            load_state: LoadState::Idle,
            can_go_back: false,
            can_go_forward: false,
            last_error: None,
            generation: 0,
            created_at: now,
            last_accessed_at: now,
        }
    }

    /// Attempt to transition to a new load state
    pub fn transition_to(&mut self, new_state: LoadState) -> Result<()> {
        if !self.load_state.can_transition_to(new_state) {
            return Err(TabError::InvalidTransition {
                from: self.load_state.to_string(),
                to: new_state.to_string(),
            });
        }

        if self.load_state != new_state {
            tracing::debug!(
                tab_id = %self.id,
                from = %self.load_state,
                to = %new_state,
                "Tab load state transition"
            );
        }

        self.load_state = new_state;
        Ok(())
    }

    /// Point the tab at `url` and start loading it.
    ///
    /// The internal new-tab page has nothing to load, so it settles at once.
    /// Returns the new generation.
    pub fn begin_navigation(&mut self, url: String) -> Result<u64> {
        let target = if url == NEW_TAB_URL {
            LoadState::Idle
        } else {
            LoadState::Loading
        };

        self.transition_to(target)?;
        self.title = display_title(&url);
        self.url = url;
        Ok(self.bump_generation())
    }

    /// Reload the current URL. Returns the new generation.
    pub fn begin_reload(&mut self) -> Result<u64> {
        self.transition_to(LoadState::Loading)?;
        Ok(self.bump_generation())
    }

    pub fn finish_load(&mut self) -> Result<()> {
        self.transition_to(LoadState::Idle)
    }

    pub fn fail_load(&mut self, reason: String) -> Result<()> {
        self.transition_to(LoadState::Failed)?;
        self.last_error = Some(reason);
        Ok(())
    }

    pub fn set_history_flags(&mut self, can_go_back: bool, can_go_forward: bool) {
        self.can_go_back = can_go_back;
        self.can_go_forward = can_go_forward;
    }

    pub fn is_loading(&self) -> bool {
        self.load_state.is_loading()
    }

    /// Whether the tab shows the internal new-tab page
    pub fn is_new_tab_page(&self) -> bool {
        self.url == NEW_TAB_URL
    }

    fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.last_error = None;
        self.generation
    }
}

impl Default for Tab {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tab() {
        let tab = Tab::new();
        assert_eq!(tab.url, NEW_TAB_URL);
        assert_eq!(tab.title, "New Tab");
        assert_eq!(tab.load_state, LoadState::Idle);
        assert!(!tab.can_go_back && !tab.can_go_forward);
        assert!(tab.is_new_tab_page());
        assert_ne!(tab.id, Tab::new().id);
    }

    #[test]
    fn test_navigation_lifecycle() {
        let mut tab = Tab::new();

        let generation = tab.begin_navigation("https://www.github.com".to_string()).unwrap();
        assert_eq!(generation, 1);
        assert_eq!(tab.title, "Github");
        assert!(tab.is_loading());

        tab.finish_load().unwrap();
        assert_eq!(tab.load_state, LoadState::Idle);

        tab.begin_reload().unwrap();
        tab.fail_load("net::ERR_NAME_NOT_RESOLVED".to_string()).unwrap();
        assert_eq!(tab.load_state, LoadState::Failed);
        assert!(!tab.is_loading());
        assert_eq!(tab.last_error.as_deref(), Some("net::ERR_NAME_NOT_RESOLVED"));

        // A new load clears the failure
        assert_eq!(tab.begin_reload().unwrap(), 3);
        assert!(tab.last_error.is_none());
    }

    #[test]
    fn test_new_tab_page_settles_immediately() {
        let mut tab = Tab::new();
        tab.begin_navigation("https://example.com".to_string()).unwrap();
        tab.begin_navigation(NEW_TAB_URL.to_string()).unwrap();
        assert_eq!(tab.load_state, LoadState::Idle);
        assert_eq!(tab.title, "New Tab");
    }

    #[test]
    fn test_error_without_load_rejected() {
        let mut tab = Tab::new();
        let result = tab.fail_load("late".to_string());
        assert!(matches!(result, Err(TabError::InvalidTransition { .. })));
        assert_eq!(tab.load_state, LoadState::Idle);
        assert!(tab.last_error.is_none());
    }
}
