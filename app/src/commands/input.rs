//! Keyboard and generic action commands

use neutron_core::{KeyPress, ShellAction};
use std::collections::BTreeMap;

use super::tabs::{Changed, CommandResult};
use crate::state::AppState;

pub fn key_press(state: &AppState, press: KeyPress) -> CommandResult<Changed> {
    let (changed, view) = state.with_browser(|browser| {
        let changed = browser.handle_key(&press);
        (changed, browser.view())
    });
    CommandResult::ok(Changed { changed, view })
}

/// Apply any shell action given in its tagged JSON form
pub fn action(state: &AppState, action: ShellAction) -> CommandResult<Changed> {
    super::apply(state, action)
}

pub fn get_shortcuts(state: &AppState) -> CommandResult<BTreeMap<String, String>> {
    CommandResult::ok(state.with_browser(|browser| browser.keymap().to_map()))
}
