use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

/// Viewport key bindings, one key string per action.
///
/// Key strings are the host UI's key names (`"KeyF"`, `"KeyW"`, ...). Only
/// `bindings` is persisted; the key → action index is rebuilt after loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeybindingOptions {
    /// Key string per action.
    pub bindings: FxHashMap<KeyAction, String>,
    #[serde(skip)]
    by_key: FxHashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let mut options = Self {
            bindings: [
                (KeyAction::FocusSelection, "KeyF"),
                (KeyAction::LocalTranslate, "KeyW"),
                (KeyAction::LocalRotate, "KeyE"),
                (KeyAction::LocalScale, "KeyR"),
            ]
            .into_iter()
            .map(|(action, key)| (action, key.to_owned()))
            .collect(),
            by_key: FxHashMap::default(),
        };
        options.rebuild_reverse_map();
        options
    }
}

impl KeybindingOptions {
    /// Re-index keys after `bindings` changed (e.g. after deserializing).
    pub fn rebuild_reverse_map(&mut self) {
        self.by_key = self
            .bindings
            .iter()
            .map(|(action, key)| (key.clone(), *action))
            .collect();
    }

    /// Bind `action` to `key`, replacing its previous key.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        let _ = self.bindings.insert(action, key.into());
        self.rebuild_reverse_map();
    }

    /// Action bound to a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.by_key.get(key).copied()
    }
}
