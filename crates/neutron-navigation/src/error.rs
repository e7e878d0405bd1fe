//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Invalid search prefix: {0}")]
    InvalidSearchPrefix(String),
}
