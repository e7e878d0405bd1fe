//! Browser configuration
//!
//! Read from a JSON file. Every field is optional; missing fields keep their
//! defaults and a missing file means an all-default config.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use neutron_navigation::{InputResolver, DEFAULT_SEARCH_PREFIX};
use neutron_tabs::DEFAULT_RELOAD_FALLBACK;

use crate::error::CoreError;
use crate::shortcuts::Keymap;
use crate::Result;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "NEUTRON_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search URL prefix; the encoded query is appended or replaces `%s`
    pub search_prefix: String,
    /// How long a reload may show as loading without a completion signal
    pub reload_fallback_ms: u64,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Shortcut overrides, action name to chord (`"reload": "F5"`)
    pub shortcuts: BTreeMap<String, String>,
}

impl Config {
    /// Load from `path`, falling back to defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config = Self::from_json(&contents)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Config file location: `$NEUTRON_CONFIG`, else the platform config dir.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }

        dirs::config_dir().map(|d| d.join("neutron").join("config.json"))
    }

    pub fn reload_fallback(&self) -> Duration {
        Duration::from_millis(self.reload_fallback_ms)
    }

    pub fn input_resolver(&self) -> Result<InputResolver> {
        Ok(InputResolver::with_search_prefix(self.search_prefix.clone())?)
    }

    pub fn keymap(&self) -> Result<Keymap> {
        Ok(Keymap::with_overrides(&self.shortcuts)?)
    }

    fn validate(&self) -> Result<()> {
        if self.reload_fallback_ms == 0 {
            return Err(CoreError::Config(
                "reload_fallback_ms must be greater than zero".to_string(),
            ));
        }

        self.input_resolver()?;
        self.keymap()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_prefix: DEFAULT_SEARCH_PREFIX.to_string(),
            reload_fallback_ms: DEFAULT_RELOAD_FALLBACK.as_millis() as u64,
            log_filter: "info".to_string(),
            shortcuts: BTreeMap::new(),
        }
    }
}

// Simple dirs implementation for the config directory
mod dirs {
    use std::path::PathBuf;

    pub fn config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("APPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_CONFIG_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".config"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
