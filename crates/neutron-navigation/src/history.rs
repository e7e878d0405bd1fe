//! Per-tab back/forward timeline
//!
//! A single linear timeline: `past` (oldest first), `current`, `future`
//! (nearest first). Transitions are pure so they can be tested without a
//! tab or a renderer.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabHistory {
    past: Vec<String>,
    current: String,
    future: VecDeque<String>,
}

impl TabHistory {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            past: Vec::new(),
            current: current.into(),
            future: VecDeque::new(),
        }
    }

    /// Record a navigation to `url`.
    ///
    /// Returns `false` without touching the timeline when `url` is already
    /// current. Otherwise the forward entries are discarded.
    pub fn push(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if url == self.current {
            return false;
        }

        let previous = std::mem::replace(&mut self.current, url);
        self.past.push(previous);
        self.future.clear();
        true
    }

    /// Step back one entry, returning the new current URL.
    pub fn back(&mut self) -> Option<&str> {
        let previous = self.past.pop()?;
        let old = std::mem::replace(&mut self.current, previous);
        self.future.push_front(old);
        Some(&self.current)
    }

    /// Step forward one entry, returning the new current URL.
    pub fn forward(&mut self) -> Option<&str> {
        let next = self.future.pop_front()?;
        let old = std::mem::replace(&mut self.current, next);
        self.past.push(old);
        Some(&self.current)
    }

    pub fn can_go_back(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn past(&self) -> &[String] {
        &self.past
    }

    pub fn future(&self) -> impl Iterator<Item = &str> {
        self.future.iter().map(String::as_str)
    }
}
