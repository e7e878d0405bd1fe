//! Main browser state container
//!
//! The core owns all state; the presentation layer is stateless. It renders
//! [`ViewState`] and reports everything the user does, plus the content
//! frames' load signals, as a [`ShellAction`].

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use neutron_tabs::TabManager;

use crate::config::Config;
use crate::shortcuts::{KeyPress, Keymap, ShortcutAction};
use crate::view::ViewState;
use crate::Result;

/// Everything the presentation layer can ask of the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShellAction {
    NewTab,
    /// Close a tab, the active one by default
    CloseTab {
        #[serde(default)]
        tab_id: Option<String>,
    },
    SelectTab {
        tab_id: String,
    },
    NextTab,
    PreviousTab,
    Navigate {
        input: String,
        #[serde(default)]
        tab_id: Option<String>,
    },
    Back,
    Forward,
    Reload,
    FocusAddressBar,
    /// Leave the address bar, discarding any edit
    BlurAddressBar,
    EditAddress {
        text: String,
    },
    /// Navigate the active tab to the address bar text
    SubmitAddress,
    LoadStarted {
        tab_id: String,
        #[serde(default)]
        generation: Option<u64>,
    },
    LoadFinished {
        tab_id: String,
        #[serde(default)]
        generation: Option<u64>,
    },
    LoadFailed {
        tab_id: String,
        #[serde(default)]
        generation: Option<u64>,
        reason: String,
    },
}

impl From<ShortcutAction> for ShellAction {
    fn from(action: ShortcutAction) -> Self {
        match action {
            ShortcutAction::NewTab => ShellAction::NewTab,
            ShortcutAction::CloseTab => ShellAction::CloseTab { tab_id: None },
            ShortcutAction::Reload => ShellAction::Reload,
            ShortcutAction::Back => ShellAction::Back,
            ShortcutAction::Forward => ShellAction::Forward,
            ShortcutAction::FocusAddressBar => ShellAction::FocusAddressBar,
            ShortcutAction::NextTab => ShellAction::NextTab,
            ShortcutAction::PreviousTab => ShellAction::PreviousTab,
        }
    }
}

#[derive(Debug, Default)]
struct AddressBar {
    /// Text being edited; `None` shows the active tab's URL
    draft: Option<String>,
    focused: bool,
    /// Active tab id and URL the draft was typed against
    shown: (String, String),
}

/// Main browser instance
///
/// Coordinates the tab store, the keymap and the address bar. Every action
/// runs to completion before the next is applied.
pub struct Browser {
    /// Configuration
    config: Config,
    /// Tab list, history and load lifecycle
    tabs: TabManager,
    /// Keyboard shortcuts
    keymap: Keymap,
    address_bar: Arc<RwLock<AddressBar>>,
}

impl Browser {
    /// Initialize a new browser instance with one empty tab
    pub fn new(config: Config) -> Result<Self> {
        let tabs = TabManager::new()
            .with_resolver(config.input_resolver()?)
            .with_reload_fallback(config.reload_fallback());
        let keymap = config.keymap()?;

        let browser = Self {
            config,
            tabs,
            keymap,
            address_bar: Arc::new(RwLock::new(AddressBar::default())),
        };
        browser.sync_address_bar();

        tracing::info!(
            active_tab = %browser.tabs.active_tab_id(),
            "Browser initialized"
        );

        Ok(browser)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Apply an action. Returns `true` if any visible state changed.
    pub fn apply(&self, action: ShellAction) -> bool {
        self.apply_at(action, Instant::now())
    }

    /// Apply an action, using `now` as the clock for any timer it arms.
    pub fn apply_at(&self, action: ShellAction, now: Instant) -> bool {
        tracing::debug!(?action, "Applying action");

        let changed = match action {
            ShellAction::NewTab => {
                self.tabs.create_tab();
                self.address_bar.write().focused = true;
                true
            }
            ShellAction::CloseTab { tab_id } => {
                let tab_id = tab_id.unwrap_or_else(|| self.tabs.active_tab_id());
                self.tabs.close_tab(&tab_id)
            }
            ShellAction::SelectTab { tab_id } => self.tabs.select_tab(&tab_id),
            ShellAction::NextTab => self.tabs.select_relative(1),
            ShellAction::PreviousTab => self.tabs.select_relative(-1),
            ShellAction::Navigate { input, tab_id } => {
                self.tabs.navigate(&input, tab_id.as_deref()).is_some()
            }
            ShellAction::Back => self.tabs.go_back().is_some(),
            ShellAction::Forward => self.tabs.go_forward().is_some(),
            ShellAction::Reload => self.tabs.reload_at(now).is_some(),
            ShellAction::FocusAddressBar => {
                let mut bar = self.address_bar.write();
                !std::mem::replace(&mut bar.focused, true)
            }
            ShellAction::BlurAddressBar => {
                let mut bar = self.address_bar.write();
                let was_focused = std::mem::replace(&mut bar.focused, false);
                bar.draft.take().is_some() || was_focused
            }
            ShellAction::EditAddress { text } => {
                let mut bar = self.address_bar.write();
                let was_focused = std::mem::replace(&mut bar.focused, true);
                let previous = bar.draft.replace(text.clone());
                !was_focused || previous.as_deref() != Some(text.as_str())
            }
            ShellAction::SubmitAddress => self.submit_address(),
            ShellAction::LoadStarted { tab_id, generation } => {
                self.tabs.on_load_start(&tab_id, generation)
            }
            ShellAction::LoadFinished { tab_id, generation } => {
                self.tabs.on_load_end(&tab_id, generation)
            }
            ShellAction::LoadFailed {
                tab_id,
                generation,
                reason,
            } => self.tabs.on_load_error(&tab_id, generation, &reason),
        };

        self.sync_address_bar() || changed
    }

    /// Run the shortcut bound to `press`. Returns `false` for unbound keys.
    pub fn handle_key(&self, press: &KeyPress) -> bool {
        match self.keymap.lookup(press) {
            Some(action) => {
                tracing::debug!(%action, key = %press.key, "Shortcut");
                self.apply(action.into())
            }
            None => false,
        }
    }

    /// Fire due reload fallbacks. Returns `true` if any tab changed.
    pub fn tick(&self, now: Instant) -> bool {
        !self.tabs.fire_due_timers(now).is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.tabs.next_deadline()
    }

    /// Snapshot of everything the presentation layer renders
    pub fn view(&self) -> ViewState {
        let bar = self.address_bar.read();
        ViewState::build(
            &self.tabs.tabs(),
            &self.tabs.active_tab_id(),
            bar.draft.as_deref(),
            bar.focused,
        )
    }

    fn submit_address(&self) -> bool {
        let draft = self.address_bar.read().draft.clone();
        let text = match draft {
            Some(draft) => draft,
            None => self.view().address_bar.text,
        };

        if text.trim().is_empty() {
            tracing::debug!("Ignoring empty address submission");
            return false;
        }

        if self.tabs.navigate(&text, None).is_none() {
            return false;
        }

        let mut bar = self.address_bar.write();
        bar.draft = None;
        bar.focused = false;
        true
    }

    /// Drop the draft whenever the active tab or its URL changes.
    fn sync_address_bar(&self) -> bool {
        let shown = match self.tabs.active_tab() {
            Some(tab) => (tab.id, tab.url),
            None => return false,
        };

        let mut bar = self.address_bar.write();
        if bar.shown == shown {
            return false;
        }

        bar.shown = shown;
        bar.draft.take().is_some()
    }
}
