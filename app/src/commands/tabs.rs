//! Tab management commands
use neutron_core::{ShellAction, TabView, ViewState};
use serde::{Deserialize, Serialize};

use super::apply;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Outcome of a mutating command
#[derive(Debug, Serialize)]
pub struct Changed {
    pub changed: bool,
    pub view: ViewState,
}

#[derive(Debug, Default, Deserialize)]
pub struct CloseTabParams {
    #[serde(default)]
    pub tab_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectTabParams {
    pub tab_id: String,
}

pub fn create_tab(state: &AppState) -> CommandResult<Changed> {
    apply(state, ShellAction::NewTab)
}

pub fn close_tab(state: &AppState, params: CloseTabParams) -> CommandResult<Changed> {
    apply(
        state,
        ShellAction::CloseTab {
            tab_id: params.tab_id,
        },
    )
}

pub fn select_tab(state: &AppState, params: SelectTabParams) -> CommandResult<Changed> {
    apply(
        state,
        ShellAction::SelectTab {
            tab_id: params.tab_id,
        },
    )
}

pub fn next_tab(state: &AppState) -> CommandResult<Changed> {
    apply(state, ShellAction::NextTab)
}

pub fn previous_tab(state: &AppState) -> CommandResult<Changed> {
    apply(state, ShellAction::PreviousTab)
}

pub fn get_tabs(state: &AppState) -> CommandResult<Vec<TabView>> {
    CommandResult::ok(state.with_browser(|browser| browser.view().tabs))
}

pub fn get_active_tab(state: &AppState) -> CommandResult<Option<TabView>> {
    CommandResult::ok(state.with_browser(|browser| browser.view().active_tab().cloned()))
}
