//! View state handed to the presentation layer
//!
//! Re-derived from scratch after every change; the presentation layer keeps
//! no state of its own.

use serde::{Deserialize, Serialize};

use neutron_tabs::{LoadState, Tab};

/// Sandbox flags for content frames
pub const FRAME_SANDBOX: &str = "allow-same-origin allow-scripts allow-forms allow-popups";

pub const ADDRESS_PLACEHOLDER: &str = "Search with Google or enter address";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Tab strip, in order
    pub tabs: Vec<TabView>,
    pub active_tab_id: String,
    pub address_bar: AddressBarView,
    /// One pane per tab; only the active one is visible
    pub panes: Vec<ContentPane>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabView {
    pub id: String,
    pub title: String,
    pub url: String,
    pub is_active: bool,
    pub is_loading: bool,
    pub load_state: LoadState,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressBarView {
    pub text: String,
    pub placeholder: String,
    pub focused: bool,
    /// Show the lock icon
    pub secure: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub is_loading: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPane {
    pub tab_id: String,
    pub visible: bool,
    #[serde(flatten)]
    pub content: PaneContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaneContent {
    /// The internal new-tab page
    NewTabPage,
    /// An embedded, sandboxed document. Load signals must echo `generation`.
    Frame {
        url: String,
        generation: u64,
        sandbox: String,
    },
}

impl TabView {
    fn new(tab: &Tab, active_tab_id: &str) -> Self {
        Self {
            id: tab.id.clone(),
            title: tab.title.clone(),
            url: tab.url.clone(),
            is_active: tab.id == active_tab_id,
            is_loading: tab.is_loading(),
            load_state: tab.load_state,
            can_go_back: tab.can_go_back,
            can_go_forward: tab.can_go_forward,
            error: tab.last_error.clone(),
        }
    }
}

impl ContentPane {
    fn new(tab: &Tab, active_tab_id: &str) -> Self {
        let content = if tab.is_new_tab_page() {
            PaneContent::NewTabPage
        } else {
            PaneContent::Frame {
                url: tab.url.clone(),
                generation: tab.generation,
                sandbox: FRAME_SANDBOX.to_string(),
            }
        };

        Self {
            tab_id: tab.id.clone(),
            visible: tab.id == active_tab_id,
            content,
        }
    }
}

impl AddressBarView {
    /// `draft` is the text being edited, if any
    fn new(active: Option<&Tab>, draft: Option<&str>, focused: bool) -> Self {
        let url = active.map(|t| t.url.as_str()).unwrap_or_default();
        let shows_page = active.map(|t| !t.is_new_tab_page()).unwrap_or(false);

        let text = match draft {
            Some(draft) => draft.to_string(),
            None if shows_page => url.to_string(),
            None => String::new(),
        };

        Self {
            text,
            placeholder: ADDRESS_PLACEHOLDER.to_string(),
            focused,
            secure: !focused && url.starts_with("https:"),
            can_go_back: active.map(|t| t.can_go_back).unwrap_or(false),
            can_go_forward: active.map(|t| t.can_go_forward).unwrap_or(false),
            is_loading: active.map(Tab::is_loading).unwrap_or(false),
        }
    }
}

impl ViewState {
    pub fn build(tabs: &[Tab], active_tab_id: &str, draft: Option<&str>, focused: bool) -> Self {
        let active = tabs.iter().find(|t| t.id == active_tab_id);

        Self {
            tabs: tabs.iter().map(|t| TabView::new(t, active_tab_id)).collect(),
            active_tab_id: active_tab_id.to_string(),
            address_bar: AddressBarView::new(active, draft, focused),
            panes: tabs
                .iter()
                .map(|t| ContentPane::new(t, active_tab_id))
                .collect(),
        }
    }

    pub fn active_tab(&self) -> Option<&TabView> {
        self.tabs.iter().find(|t| t.is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str) -> Tab {
        let mut tab = Tab::new();
        tab.begin_navigation(url.to_string()).unwrap();
        tab
    }

    #[test]
    fn test_new_tab_page_view() {
        let tab = Tab::new();
        let view = ViewState::build(std::slice::from_ref(&tab), &tab.id, None, true);

        assert_eq!(view.address_bar.text, "");
        assert_eq!(view.address_bar.placeholder, ADDRESS_PLACEHOLDER);
        assert!(!view.address_bar.secure);
        assert_eq!(view.panes[0].content, PaneContent::NewTabPage);
        assert!(view.panes[0].visible);
        assert_eq!(view.active_tab().unwrap().title, "New Tab");
    }

    #[test]
    fn test_all_panes_mounted_one_visible() {
        let tabs = vec![page("https://a.example"), page("http://b.example"), Tab::new()];
        let view = ViewState::build(&tabs, &tabs[1].id, None, false);

        assert_eq!(view.panes.len(), 3);
        let visible: Vec<&str> = view
            .panes
            .iter()
            .filter(|p| p.visible)
            .map(|p| p.tab_id.as_str())
            .collect();
        assert_eq!(visible, [tabs[1].id.as_str()]);

        match &view.panes[0].content {
            PaneContent::Frame {
                url,
                generation,
                sandbox,
            } => {
                assert_eq!(url, "https://a.example");
                assert_eq!(*generation, 1);
                assert_eq!(sandbox, FRAME_SANDBOX);
            }
            other => panic!("Expected Frame, got {:?}", other),
        }
    }

    #[test]
    fn test_lock_icon() {
        let tab = page("https://secure.example");
        let id = tab.id.clone();
        let tabs = vec![tab];

        assert!(ViewState::build(&tabs, &id, None, false).address_bar.secure);
        // Hidden while editing
        assert!(!ViewState::build(&tabs, &id, None, true).address_bar.secure);

        let plain = vec![page("http://plain.example")];
        assert!(!ViewState::build(&plain, &plain[0].id, None, false).address_bar.secure);
    }

    #[test]
    fn test_draft_replaces_url() {
        let tab = page("https://example.com");
        let tabs = vec![tab];

        let view = ViewState::build(&tabs, &tabs[0].id, Some("rust lang"), true);
        assert_eq!(view.address_bar.text, "rust lang");

        let view = ViewState::build(&tabs, &tabs[0].id, None, false);
        assert_eq!(view.address_bar.text, "https://example.com");
        assert!(view.address_bar.is_loading);
    }

    #[test]
    fn test_serialized_pane_shape() {
        let tab = page("https://example.com");
        let pane = ContentPane::new(&tab, &tab.id);
        let json = serde_json::to_value(&pane).unwrap();

        assert_eq!(json["kind"], "frame");
        assert_eq!(json["url"], "https://example.com");
        assert_eq!(json["visible"], true);
        assert_eq!(json["sandbox"], FRAME_SANDBOX);
    }
}
