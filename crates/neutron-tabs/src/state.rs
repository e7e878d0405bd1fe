//! Tab load lifecycle
//!
//! ```text
//! Idle ──navigate/reload──▶ Loading ──load end──▶ Idle
//!                             │
//!                             └──load error──▶ Failed ──navigate/reload──▶ Loading
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// Content is settled (or the tab shows the internal new-tab page)
    #[default]
    Idle,
    /// Between navigation start and the frame's completion signal
    Loading,
    /// The frame reported an error for the current navigation
    Failed,
}

impl LoadState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: LoadState) -> bool {
        match (self, target) {
            (LoadState::Idle, LoadState::Loading) => true,
            (LoadState::Loading, LoadState::Idle) => true,
            (LoadState::Loading, LoadState::Failed) => true,
            (LoadState::Failed, LoadState::Loading) => true,
            // Leaving a failed page for the internal new-tab page
            (LoadState::Failed, LoadState::Idle) => true,
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LoadState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(LoadState::Idle),
            "loading" => Ok(LoadState::Loading),
            "failed" => Ok(LoadState::Failed),
            _ => Err(format!("Unknown load state: {}", s)),
        }
    }
}
