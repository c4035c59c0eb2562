use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::theme::preferences::{Preferences, DARK_MODE_KEY};
use crate::types::ThemeMode;

/// Handle returned by [`ThemeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// `{ "mode": "on" | "off" }`, the payload broadcast when the user flips
/// dark mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeEvent {
    pub mode: String,
}

impl ThemeEvent {
    pub fn for_mode(mode: ThemeMode) -> Self {
        let mode = if mode.is_dark() { "on" } else { "off" };
        Self { mode: mode.to_string() }
    }

    /// `"on"` is dark; any other value is light.
    pub fn theme_mode(&self) -> ThemeMode {
        if self.mode == "on" {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }
}

type Listener = Box<dyn FnMut(ThemeMode)>;

/// Current theme mode plus the listeners that react to it.
///
/// Listeners are notified in registration order, synchronously, once per
/// actual change.
pub struct ThemeStore {
    mode: ThemeMode,
    preferences: Preferences,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl ThemeStore {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            preferences: Preferences::in_memory(),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Start from the persisted `dark-mode` flag.
    pub fn from_preferences(preferences: Preferences) -> Self {
        let mode = ThemeMode::from_preference(preferences.get(DARK_MODE_KEY));
        Self {
            mode,
            preferences,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn current(&self) -> ThemeMode {
        self.mode
    }

    pub fn subscribe(&mut self, listener: impl FnMut(ThemeMode) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Change the mode, notify listeners, then persist the preference.
    ///
    /// Returns whether the mode changed. Listeners have already run when a
    /// persistence error is returned.
    pub fn set(&mut self, mode: ThemeMode) -> Result<bool> {
        if mode == self.mode {
            return Ok(false);
        }
        self.mode = mode;
        tracing::debug!(?mode, listeners = self.listeners.len(), "theme changed");
        for (_, listener) in self.listeners.iter_mut() {
            listener(mode);
        }
        self.preferences.set(DARK_MODE_KEY, mode.as_preference())?;
        Ok(true)
    }

    pub fn toggle(&mut self) -> Result<ThemeMode> {
        let next = self.mode.toggled();
        self.set(next)?;
        Ok(next)
    }

    pub fn dispatch(&mut self, event: &ThemeEvent) -> Result<bool> {
        self.set(event.theme_mode())
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }
}
