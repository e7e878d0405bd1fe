//! Navigation and address bar commands

use neutron_core::{display_title, InputResolution, ShellAction};
use serde::Deserialize;

use super::apply;
use super::tabs::{Changed, CommandResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NavigateParams {
    pub input: String,
    #[serde(default)]
    pub tab_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditAddressParams {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct FormatUrlParams {
    pub input: String,
}

#[derive(Debug, Deserialize)]
pub struct FormatTitleParams {
    pub url: String,
}

pub fn navigate(state: &AppState, params: NavigateParams) -> CommandResult<Changed> {
    apply(
        state,
        ShellAction::Navigate {
            input: params.input,
            tab_id: params.tab_id,
        },
    )
}

pub fn go_back(state: &AppState) -> CommandResult<Changed> {
    apply(state, ShellAction::Back)
}

pub fn go_forward(state: &AppState) -> CommandResult<Changed> {
    apply(state, ShellAction::Forward)
}

pub fn reload(state: &AppState) -> CommandResult<Changed> {
    apply(state, ShellAction::Reload)
}

pub fn focus_address_bar(state: &AppState) -> CommandResult<Changed> {
    apply(state, ShellAction::FocusAddressBar)
}

pub fn blur_address_bar(state: &AppState) -> CommandResult<Changed> {
    apply(state, ShellAction::BlurAddressBar)
}

pub fn edit_address(state: &AppState, params: EditAddressParams) -> CommandResult<Changed> {
    apply(state, ShellAction::EditAddress { text: params.text })
}

pub fn submit_address(state: &AppState) -> CommandResult<Changed> {
    apply(state, ShellAction::SubmitAddress)
}

/// Preview how address bar text would resolve, using the configured search prefix
pub fn format_url(state: &AppState, params: FormatUrlParams) -> CommandResult<InputResolution> {
    CommandResult::ok(state.with_browser(|browser| {
        browser.tabs().resolver().resolve(&params.input)
    }))
}

pub fn format_title(params: FormatTitleParams) -> CommandResult<String> {
    CommandResult::ok(display_title(&params.url))
}
