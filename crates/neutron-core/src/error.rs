//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tab error: {0}")]
    Tab(#[from] neutron_tabs::TabError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] neutron_navigation::NavigationError),

    #[error("Shortcut error: {0}")]
    Shortcut(#[from] ShortcutError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("Invalid accelerator: {0}")]
    InvalidAccelerator(String),

    #[error("Unknown shortcut action: {0}")]
    UnknownAction(String),

    #[error("Shortcut conflict: {keys} is already bound to {action}")]
    Conflict { keys: String, action: String },
}
