//! Tab Manager
//!
//! Owns the ordered tab list, per-tab history and the reload fallback timers.
//! Every operation takes the store lock once, so callers never observe a
//! half-applied transition. Operations on unknown tab ids are no-ops.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use neutron_navigation::{InputResolver, TabHistory, NEW_TAB_URL};

use crate::error::TabError;
use crate::state::LoadState;
use crate::tab::Tab;
use crate::Result;

/// How long a reload may stay "loading" without a completion signal.
pub const DEFAULT_RELOAD_FALLBACK: Duration = Duration::from_millis(800);

/// Describes the load a navigation-like operation started.
///
/// The content frame echoes `generation` back in its load signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTicket {
    pub tab_id: String,
    pub url: String,
    pub generation: u64,
    /// Whether a new history entry was recorded
    pub pushed: bool,
}

#[derive(Debug, Clone, Copy)]
struct ReloadTimer {
    deadline: Instant,
    generation: u64,
}

#[derive(Debug)]
struct TabStore {
    tabs: Vec<Tab>,
    histories: HashMap<String, TabHistory>,
    active_tab_id: String,
    timers: HashMap<String, ReloadTimer>,
}

impl TabStore {
    fn new() -> Self {
        let mut store = Self {
            tabs: Vec::new(),
            histories: HashMap::new(),
            active_tab_id: String::new(),
            timers: HashMap::new(),
        };
        store.insert_tab();
        store
    }

    /// Append a fresh tab and make it active
    fn insert_tab(&mut self) -> Tab {
        let tab = Tab::new();
        self.histories
            .insert(tab.id.clone(), TabHistory::new(NEW_TAB_URL));
        self.active_tab_id = tab.id.clone();
        self.tabs.push(tab.clone());

        tracing::info!(tab_id = %tab.id, url = %tab.url, "Created new tab");

        tab
    }

    fn position(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    fn tab_mut(&mut self, tab_id: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == tab_id)
    }

    /// Sync back/forward flags from the history and start loading `url`.
    fn apply_history(&mut self, tab_id: &str, pushed: bool) -> Option<NavigationTicket> {
        let history = self.histories.get(tab_id)?;
        let url = history.current().to_string();
        let (back, forward) = (history.can_go_back(), history.can_go_forward());

        self.timers.remove(tab_id);

        let tab = self.tab_mut(tab_id)?;
        tab.set_history_flags(back, forward);
        let generation = match tab.begin_navigation(url.clone()) {
            Ok(generation) => generation,
            Err(e) => {
                tracing::warn!(tab_id = %tab_id, error = %e, "Navigation rejected");
                return None;
            }
        };

        tracing::debug!(tab_id = %tab_id, url = %url, generation, pushed, "Navigating tab");

        Some(NavigationTicket {
            tab_id: tab_id.to_string(),
            url,
            generation,
            pushed,
        })
    }

    /// Look up a tab for a load signal, dropping signals for closed tabs and
    /// superseded generations.
    fn signal_target(&mut self, tab_id: &str, generation: Option<u64>) -> Option<&mut Tab> {
        let Some(tab) = self.tab_mut(tab_id) else {
            tracing::debug!(tab_id = %tab_id, "Ignoring load signal for unknown tab");
            return None;
        };

        match generation {
            Some(generation) if generation != tab.generation => {
                tracing::debug!(
                    tab_id = %tab_id,
                    generation,
                    current = tab.generation,
                    "Ignoring stale load signal"
                );
                None
            }
            _ => Some(tab),
        }
    }
}

/// Log a transition the lifecycle refused and report "no change".
fn ignore_rejected(tab_id: &str, result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(tab_id = %tab_id, error = %e, "Ignoring load signal");
            false
        }
    }
}

pub struct TabManager {
    store: Arc<RwLock<TabStore>>,
    resolver: InputResolver,
    reload_fallback: Duration,
}

impl TabManager {
    /// A manager holding one default tab.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(TabStore::new())),
            resolver: InputResolver::new(),
            reload_fallback: DEFAULT_RELOAD_FALLBACK,
        }
    }

    pub fn with_resolver(mut self, resolver: InputResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_reload_fallback(mut self, fallback: Duration) -> Self {
        self.reload_fallback = fallback;
        self
    }

    pub fn resolver(&self) -> &InputResolver {
        &self.resolver
    }

    pub fn reload_fallback(&self) -> Duration {
        self.reload_fallback
    }

    // === Tab list ===

    /// Create a new tab at the end of the list and activate it
    pub fn create_tab(&self) -> Tab {
        self.store.write().insert_tab()
    }

    /// Close a tab. Returns `false` if the tab does not exist.
    ///
    /// Closing the active tab activates its left neighbour, else its right
    /// neighbour, else a fresh tab.
    pub fn close_tab(&self, tab_id: &str) -> bool {
        let mut store = self.store.write();

        let Some(index) = store.position(tab_id) else {
            tracing::debug!(tab_id = %tab_id, "Close ignored, tab not found");
            return false;
        };

        let removed = store.tabs.remove(index);
        store.histories.remove(&removed.id);
        store.timers.remove(&removed.id);

        tracing::info!(tab_id = %removed.id, "Closed tab");

        if store.active_tab_id == removed.id {
            // After removal the right neighbour has shifted into `index`
            let neighbour_index = if index > 0 { index - 1 } else { index };
            let neighbour = store.tabs.get(neighbour_index).map(|t| t.id.clone());

            match neighbour {
                Some(id) => store.active_tab_id = id,
                None => {
                    store.insert_tab();
                }
            }
        }

        true
    }

    /// Activate a tab. Returns `true` if the active tab changed.
    pub fn select_tab(&self, tab_id: &str) -> bool {
        let mut store = self.store.write();

        if store.position(tab_id).is_none() {
            tracing::debug!(tab_id = %tab_id, "Select ignored, tab not found");
            return false;
        }

        if store.active_tab_id == tab_id {
            return false;
        }

        store.active_tab_id = tab_id.to_string();
        true
    }

    /// Activate the tab `offset` places away from the active one, wrapping around.
    pub fn select_relative(&self, offset: isize) -> bool {
        let mut store = self.store.write();

        let len = store.tabs.len() as isize;
        let Some(current) = store.position(&store.active_tab_id) else {
            return false;
        };
        if len < 2 {
            return false;
        }

        let next = (current as isize + offset).rem_euclid(len) as usize;
        let id = store.tabs[next].id.clone();
        if id == store.active_tab_id {
            return false;
        }

        store.active_tab_id = id;
        true
    }

    // === Navigation ===

    /// Navigate a tab (the active one by default) to formatted `input`.
    ///
    /// Blank input and unknown tabs are refused. Navigating to the URL the tab
    /// already shows reloads it without a new history entry.
    pub fn navigate(&self, input: &str, tab_id: Option<&str>) -> Option<NavigationTicket> {
        let url = self.resolver.format(input);
        if url.is_empty() {
            tracing::debug!("Navigation refused, nothing to load");
            return None;
        }

        let mut store = self.store.write();
        let tab_id = tab_id
            .map(str::to_string)
            .unwrap_or_else(|| store.active_tab_id.clone());

        let Some(history) = store.histories.get_mut(&tab_id) else {
            tracing::debug!(tab_id = %tab_id, "Navigation ignored, tab not found");
            return None;
        };

        let pushed = history.push(url);
        store.apply_history(&tab_id, pushed)
    }

    /// Step the active tab back one history entry
    pub fn go_back(&self) -> Option<NavigationTicket> {
        let mut store = self.store.write();
        let tab_id = store.active_tab_id.clone();

        store.histories.get_mut(&tab_id)?.back()?;
        store.apply_history(&tab_id, false)
    }

    /// Step the active tab forward one history entry
    pub fn go_forward(&self) -> Option<NavigationTicket> {
        let mut store = self.store.write();
        let tab_id = store.active_tab_id.clone();

        store.histories.get_mut(&tab_id)?.forward()?;
        store.apply_history(&tab_id, false)
    }

    /// Reload the active tab
    pub fn reload(&self) -> Option<NavigationTicket> {
        self.reload_at(Instant::now())
    }

    /// Reload the active tab, arming the fallback timer relative to `now`.
    pub fn reload_at(&self, now: Instant) -> Option<NavigationTicket> {
        let mut store = self.store.write();
        let tab_id = store.active_tab_id.clone();

        let tab = store.tab_mut(&tab_id)?;
        let generation = match tab.begin_reload() {
            Ok(generation) => generation,
            Err(e) => {
                tracing::warn!(tab_id = %tab_id, error = %e, "Reload rejected");
                return None;
            }
        };
        let url = tab.url.clone();

        store.timers.insert(
            tab_id.clone(),
            ReloadTimer {
                deadline: now + self.reload_fallback,
                generation,
            },
        );

        tracing::debug!(tab_id = %tab_id, url = %url, generation, "Reloading tab");

        Some(NavigationTicket {
            tab_id,
            url,
            generation,
            pushed: false,
        })
    }

    // === Content frame signals ===

    /// The frame started loading. Returns `true` if the tab changed.
    pub fn on_load_start(&self, tab_id: &str, generation: Option<u64>) -> bool {
        let mut store = self.store.write();
        let Some(tab) = store.signal_target(tab_id, generation) else {
            return false;
        };

        if tab.is_loading() {
            return false;
        }

        let result = tab.transition_to(LoadState::Loading);
        ignore_rejected(tab_id, result)
    }

    /// The frame finished loading. Returns `true` if the tab changed.
    pub fn on_load_end(&self, tab_id: &str, generation: Option<u64>) -> bool {
        let mut store = self.store.write();
        let Some(tab) = store.signal_target(tab_id, generation) else {
            return false;
        };

        if !tab.is_loading() {
            return false;
        }

        let result = tab.finish_load();
        let changed = ignore_rejected(tab_id, result);
        store.timers.remove(tab_id);
        changed
    }

    /// The frame failed to load. Returns `true` if the tab changed.
    pub fn on_load_error(&self, tab_id: &str, generation: Option<u64>, reason: &str) -> bool {
        let mut store = self.store.write();
        let Some(tab) = store.signal_target(tab_id, generation) else {
            return false;
        };

        if tab.load_state == LoadState::Failed {
            return false;
        }

        let result = tab.fail_load(reason.to_string());
        let changed = ignore_rejected(tab_id, result);
        if changed {
            tracing::info!(tab_id = %tab_id, reason = %reason, "Tab failed to load");
            store.timers.remove(tab_id);
        }
        changed
    }

    // === Timers ===

    /// Earliest pending reload fallback, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.store.read().timers.values().map(|t| t.deadline).min()
    }

    /// Fire every fallback due at `now`. Returns the ids of tabs that stopped loading.
    pub fn fire_due_timers(&self, now: Instant) -> Vec<String> {
        let mut store = self.store.write();

        let due: Vec<(String, ReloadTimer)> = store
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .map(|(id, timer)| (id.clone(), *timer))
            .collect();

        let mut settled = Vec::new();
        for (tab_id, timer) in due {
            store.timers.remove(&tab_id);

            let Some(tab) = store.tab_mut(&tab_id) else {
                continue;
            };
            if tab.generation != timer.generation || !tab.is_loading() {
                continue;
            }

            if tab.finish_load().is_ok() {
                tracing::debug!(tab_id = %tab_id, generation = timer.generation, "Reload fallback fired");
                settled.push(tab_id);
            }
        }

        settled
    }

    // === Queries ===

    /// All tabs in strip order
    pub fn tabs(&self) -> Vec<Tab> {
        self.store.read().tabs.clone()
    }

    pub fn tab_count(&self) -> usize {
        self.store.read().tabs.len()
    }

    pub fn active_tab_id(&self) -> String {
        self.store.read().active_tab_id.clone()
    }

    pub fn active_tab(&self) -> Option<Tab> {
        let store = self.store.read();
        store
            .tabs
            .iter()
            .find(|t| t.id == store.active_tab_id)
            .cloned()
    }

    /// Get a tab by ID
    pub fn get_tab(&self, tab_id: &str) -> Result<Tab> {
        self.store
            .read()
            .tabs
            .iter()
            .find(|t| t.id == tab_id)
            .cloned()
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))
    }

    pub fn history(&self, tab_id: &str) -> Result<TabHistory> {
        self.store
            .read()
            .histories
            .get(tab_id)
            .cloned()
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TabManager {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            resolver: self.resolver.clone(),
            reload_fallback: self.reload_fallback,
        }
    }
}
