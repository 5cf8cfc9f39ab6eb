//! Light/dark theme resolution and persistence.

pub mod store;

use iced::{theme::Mode, Theme};

use crate::domain::ThemePreference;

pub use store::{JsonFileStore, MemoryStore, PreferenceStore, StoreError};

pub const THEME_KEY: &str = "theme";

pub struct ThemeManager {
    current: ThemePreference,
    store: Box<dyn PreferenceStore>,
    awaiting_system: bool,
}

impl ThemeManager {
    /// Resolves the startup theme from a saved preference, else from
    /// `forced`. With neither, light is shown until [`apply_system_mode`]
    /// reports the desktop's colour scheme.
    ///
    /// [`apply_system_mode`]: ThemeManager::apply_system_mode
    pub fn load(store: Box<dyn PreferenceStore>, forced: Option<ThemePreference>) -> Self {
        let resolved = match (store.get(THEME_KEY), forced) {
            // Anything saved other than "dark" counts as light.
            (Some(saved), _) => {
                Some(ThemePreference::parse(&saved).unwrap_or(ThemePreference::Light))
            }
            (None, forced) => forced,
        };

        let mut manager = Self {
            current: ThemePreference::Light,
            store,
            awaiting_system: resolved.is_none(),
        };
        if let Some(preference) = resolved {
            manager.apply(preference);
        }
        manager
    }

    /// True until the desktop colour scheme has been applied.
    pub fn awaiting_system(&self) -> bool {
        self.awaiting_system
    }

    /// Resolves a pending startup theme from the desktop colour scheme and
    /// saves it. Ignored once a theme has been resolved or toggled.
    pub fn apply_system_mode(&mut self, mode: Mode) {
        if !self.awaiting_system {
            return;
        }
        let preference = if matches!(mode, Mode::Dark) {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        };
        self.apply(preference);
    }

    pub fn toggle(&mut self) -> ThemePreference {
        let next = self.current.toggled();
        self.apply(next);
        next
    }

    fn apply(&mut self, preference: ThemePreference) {
        self.current = preference;
        self.awaiting_system = false;
        tracing::debug!(theme = preference.as_str(), "Applying theme");
        if let Err(e) = self.store.set(THEME_KEY, preference.as_str()) {
            tracing::warn!("Failed to save theme preference: {}", e);
        }
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    pub fn saved(&self) -> Option<String> {
        self.store.get(THEME_KEY)
    }

    pub fn theme(&self) -> Theme {
        match self.current {
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::Light => Theme::Light,
        }
    }
}
