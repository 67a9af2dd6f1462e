//! Persisted interface preferences (theme and language).

use crate::error::Result;
use crate::storage::{KeyValueStore, LANG_KEY, THEME_KEY};
use crate::types::{Language, Theme};
use tracing::{debug, warn};

/// User-facing preferences stored next to the glossary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
}

impl Preferences {
    /// Load preferences, using defaults for missing or unknown values.
    pub fn load(storage: &impl KeyValueStore) -> Self {
        Self::load_or(storage, Preferences::default())
    }

    /// Load preferences, taking missing or unknown values from `defaults`.
    pub fn load_or(storage: &impl KeyValueStore, defaults: Preferences) -> Self {
        Preferences {
            theme: read(storage, THEME_KEY).unwrap_or(defaults.theme),
            language: read(storage, LANG_KEY).unwrap_or(defaults.language),
        }
    }

    /// Persist both preferences.
    pub fn save(&self, storage: &impl KeyValueStore) -> Result<()> {
        storage.set(THEME_KEY, self.theme.as_str())?;
        storage.set(LANG_KEY, self.language.code())?;
        debug!(theme = %self.theme, language = %self.language, "Saved preferences");
        Ok(())
    }

    /// Switch between light and dark.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

fn read<T>(storage: &impl KeyValueStore, key: &str) -> Option<T>
where
    T: std::str::FromStr<Err = String>,
{
    match storage.get(key) {
        Ok(Some(raw)) => match raw.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Ignoring stored preference");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(key, error = %e, "Failed to read preference");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::load(&MemoryKeyValueStore::new());
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.language, Language::Mn);
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryKeyValueStore::new();
        let prefs = Preferences {
            theme: Theme::Dark,
            language: Language::Jp,
        };
        prefs.save(&storage).unwrap();

        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(storage.get(LANG_KEY).unwrap().as_deref(), Some("jp"));
        assert_eq!(Preferences::load(&storage), prefs);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let storage = MemoryKeyValueStore::new()
            .with_value(THEME_KEY, "sepia")
            .with_value(LANG_KEY, "en");
        let prefs = Preferences::load(&storage);
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.language, Language::En);
    }

    #[test]
    fn test_load_or_configured_defaults() {
        let storage = MemoryKeyValueStore::new().with_value(THEME_KEY, "dark");
        let defaults = Preferences {
            theme: Theme::Light,
            language: Language::Jp,
        };
        let prefs = Preferences::load_or(&storage, defaults);
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.language, Language::Jp);
    }

    #[test]
    fn test_toggle_theme() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.toggle_theme(), Theme::Dark);
        assert_eq!(prefs.toggle_theme(), Theme::Light);
    }
}
