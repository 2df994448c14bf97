//! Key bindings matched against `bubbletea_rs::KeyMsg`.
//!
//! A [`Binding`] groups the key presses that trigger one action together
//! with the help text shown for it. Screens collect their bindings in a
//! struct and implement [`KeyMap`] so the help footer can render them.
//!
//! ```rust
//! use bubbletea_listviewport::key::Binding;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let down = Binding::new(vec![KeyCode::Down, KeyCode::Char('j')]).with_help("↓/j", "down");
//! let msg = KeyMsg { key: KeyCode::Char('j'), modifiers: KeyModifiers::NONE };
//! assert!(down.matches(&msg));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub code: KeyCode,
    /// Required modifiers.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// Help text of a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// How the keys are written in the footer, e.g. `↑/k`.
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// A set of key presses bound to one action.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding for the given keys.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// The keys of this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The help text of this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding takes part in matching and help rendering.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether `msg` is one of this binding's key presses.
    ///
    /// Shift is ignored for character keys, since terminals report it
    /// inconsistently for upper-case letters.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled() {
            return false;
        }
        self.keys.iter().any(|press| {
            if press.code != msg.key {
                return false;
            }
            let mut held = msg.modifiers;
            if matches!(msg.key, KeyCode::Char(_)) {
                held.remove(KeyModifiers::SHIFT);
            }
            held == press.modifiers
        })
    }
}

/// Implemented by key binding sets that can describe themselves in the help
/// footer.
pub trait KeyMap {
    /// Bindings for the single-line footer.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings grouped in columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// Whether `msg` matches any of `bindings`.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|binding| binding.matches(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_matches_any_listed_key() {
        let binding = Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]);
        assert!(binding.matches(&press(KeyCode::Up, KeyModifiers::NONE)));
        assert!(binding.matches(&press(KeyCode::Char('k'), KeyModifiers::NONE)));
        assert!(!binding.matches(&press(KeyCode::Char('j'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_modifiers_must_match() {
        let binding = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)]);
        assert!(binding.matches(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!binding.matches(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_shift_ignored_for_chars() {
        let binding = Binding::new(vec![KeyCode::Char('G')]);
        assert!(binding.matches(&press(KeyCode::Char('G'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut binding = Binding::new(vec![KeyCode::Enter]).with_help("enter", "select");
        binding.set_enabled(false);
        assert!(!binding.enabled());
        assert!(!binding.matches(&press(KeyCode::Enter, KeyModifiers::NONE)));
        assert_eq!(binding.help().desc, "select");
    }

    #[test]
    fn test_matches_helper() {
        let a = Binding::new(vec![KeyCode::Char('a')]);
        let b = Binding::new(vec![KeyCode::Char('b')]);
        assert!(matches(&press(KeyCode::Char('b'), KeyModifiers::NONE), &[&a, &b]));
        assert!(!matches(&press(KeyCode::Char('c'), KeyModifiers::NONE), &[&a, &b]));
    }
}
