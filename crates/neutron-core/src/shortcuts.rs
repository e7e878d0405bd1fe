//! Keyboard shortcuts
//!
//! Chords are written like `Ctrl+Shift+Tab`. `Ctrl` in a binding matches
//! either the Control or the Meta (Cmd) key so the same keymap works on
//! every platform.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ShortcutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutAction {
    NewTab,
    CloseTab,
    Reload,
    Back,
    Forward,
    FocusAddressBar,
    NextTab,
    PreviousTab,
}

impl ShortcutAction {
    pub const ALL: [ShortcutAction; 8] = [
        ShortcutAction::NewTab,
        ShortcutAction::CloseTab,
        ShortcutAction::Reload,
        ShortcutAction::Back,
        ShortcutAction::Forward,
        ShortcutAction::FocusAddressBar,
        ShortcutAction::NextTab,
        ShortcutAction::PreviousTab,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShortcutAction::NewTab => "new_tab",
            ShortcutAction::CloseTab => "close_tab",
            ShortcutAction::Reload => "reload",
            ShortcutAction::Back => "back",
            ShortcutAction::Forward => "forward",
            ShortcutAction::FocusAddressBar => "focus_address_bar",
            ShortcutAction::NextTab => "next_tab",
            ShortcutAction::PreviousTab => "previous_tab",
        }
    }

    fn default_keys(&self) -> &'static str {
        match self {
            ShortcutAction::NewTab => "Ctrl+T",
            ShortcutAction::CloseTab => "Ctrl+W",
            ShortcutAction::Reload => "Ctrl+R",
            ShortcutAction::Back => "Alt+Left",
            ShortcutAction::Forward => "Alt+Right",
            ShortcutAction::FocusAddressBar => "Ctrl+L",
            ShortcutAction::NextTab => "Ctrl+Tab",
            ShortcutAction::PreviousTab => "Ctrl+Shift+Tab",
        }
    }
}

impl fmt::Display for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShortcutAction {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShortcutAction::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ShortcutError::UnknownAction(s.to_string()))
    }
}

/// A key event as reported by the presentation layer.
///
/// `key` follows DOM `KeyboardEvent.key` naming (`"t"`, `"ArrowLeft"`, `"Tab"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

/// A parsed key chord such as `Ctrl+Shift+Tab`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accelerator {
    /// Control or Meta
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Normalized key name, lowercase
    pub key: String,
}

impl Accelerator {
    pub fn matches(&self, press: &KeyPress) -> bool {
        self.ctrl == (press.ctrl || press.meta)
            && self.alt == press.alt
            && self.shift == press.shift
            && self.key == normalize_key(&press.key)
    }
}

fn normalize_key(key: &str) -> String {
    let lower = key.to_lowercase();
    match lower.as_str() {
        "left" => "arrowleft".to_string(),
        "right" => "arrowright".to_string(),
        "up" => "arrowup".to_string(),
        "down" => "arrowdown".to_string(),
        "esc" => "escape".to_string(),
        "plus" => "+".to_string(),
        "minus" => "-".to_string(),
        "comma" => ",".to_string(),
        "space" => " ".to_string(),
        _ => lower,
    }
}

impl FromStr for Accelerator {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ShortcutError::InvalidAccelerator(s.to_string());

        let mut accelerator = Accelerator {
            ctrl: false,
            alt: false,
            shift: false,
            key: String::new(),
        };

        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let (key, modifiers) = parts.split_last().ok_or_else(invalid)?;

        for modifier in modifiers {
            let flag = match modifier.to_lowercase().as_str() {
                "ctrl" | "control" | "cmd" | "command" | "meta" | "cmdorctrl" => {
                    &mut accelerator.ctrl
                }
                "alt" | "option" => &mut accelerator.alt,
                "shift" => &mut accelerator.shift,
                _ => return Err(invalid()),
            };
            if *flag {
                return Err(invalid());
            }
            *flag = true;
        }

        if key.is_empty() {
            return Err(invalid());
        }
        accelerator.key = normalize_key(key);

        Ok(accelerator)
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }

        let key = match self.key.as_str() {
            "arrowleft" => "Left".to_string(),
            "arrowright" => "Right".to_string(),
            "arrowup" => "Up".to_string(),
            "arrowdown" => "Down".to_string(),
            " " => "Space".to_string(),
            "+" => "Plus".to_string(),
            other => {
                let mut chars = other.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        };
        write!(f, "{}", key)
    }
}

/// Chord to action bindings
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(Accelerator, ShortcutAction)>,
}

impl Keymap {
    /// The default bindings
    pub fn new() -> Self {
        let bindings = ShortcutAction::ALL
            .into_iter()
            .filter_map(|action| {
                action
                    .default_keys()
                    .parse::<Accelerator>()
                    .ok()
                    .map(|accelerator| (accelerator, action))
            })
            .collect();

        Self { bindings }
    }

    /// Defaults with `overrides` (action name to chord) applied in order.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self, ShortcutError> {
        let mut keymap = Self::new();
        for (action, keys) in overrides {
            keymap.bind(action.parse()?, keys)?;
        }
        Ok(keymap)
    }

    /// Bind `action` to `keys`, replacing its previous chord.
    pub fn bind(&mut self, action: ShortcutAction, keys: &str) -> Result<(), ShortcutError> {
        let accelerator: Accelerator = keys.parse()?;

        if let Some((_, other)) = self
            .bindings
            .iter()
            .find(|(bound, a)| *bound == accelerator && *a != action)
        {
            return Err(ShortcutError::Conflict {
                keys: accelerator.to_string(),
                action: other.to_string(),
            });
        }

        self.bindings.retain(|(_, a)| *a != action);
        self.bindings.push((accelerator, action));
        Ok(())
    }

    pub fn unbind(&mut self, action: ShortcutAction) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|(_, a)| *a != action);
        self.bindings.len() != before
    }

    /// The action bound to a key press, if any
    pub fn lookup(&self, press: &KeyPress) -> Option<ShortcutAction> {
        self.bindings
            .iter()
            .find(|(accelerator, _)| accelerator.matches(press))
            .map(|(_, action)| *action)
    }

    pub fn accelerator(&self, action: ShortcutAction) -> Option<&Accelerator> {
        self.bindings
            .iter()
            .find(|(_, a)| *a == action)
            .map(|(accelerator, _)| accelerator)
    }

    /// Bindings as action name to chord, for display
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.bindings
            .iter()
            .map(|(accelerator, action)| (action.to_string(), accelerator.to_string()))
            .collect()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}
