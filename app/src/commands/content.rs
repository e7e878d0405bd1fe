//! Load lifecycle signals from the embedded content frames
//!
//! Frames echo the generation from their pane; signals for closed tabs or
//! superseded generations come back with `changed: false`.

use neutron_core::ShellAction;
use serde::Deserialize;

use super::apply;
use super::tabs::{Changed, CommandResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoadSignalParams {
    pub tab_id: String,
    #[serde(default)]
    pub generation: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct LoadErrorParams {
    pub tab_id: String,
    #[serde(default)]
    pub generation: Option<u64>,
    #[serde(default = "default_reason")]
    pub reason: String,
}

fn default_reason() -> String {
    "load failed".to_string()
}

pub fn load_start(state: &AppState, params: LoadSignalParams) -> CommandResult<Changed> {
    apply(
        state,
        ShellAction::LoadStarted {
            tab_id: params.tab_id,
            generation: params.generation,
        },
    )
}

pub fn load_end(state: &AppState, params: LoadSignalParams) -> CommandResult<Changed> {
    apply(
        state,
        ShellAction::LoadFinished {
            tab_id: params.tab_id,
            generation: params.generation,
        },
    )
}

pub fn load_error(state: &AppState, params: LoadErrorParams) -> CommandResult<Changed> {
    apply(
        state,
        ShellAction::LoadFailed {
            tab_id: params.tab_id,
            generation: params.generation,
            reason: params.reason,
        },
    )
}
