//! The theme settings store.

use std::sync::{Mutex, PoisonError};

use super::broadcast::{ThemeBroadcast, ThemeSubscription};
use super::error::SettingsError;
use super::prefs::{JsonPreferences, PreferenceStore, StoreConfig};
use super::theme::AppTheme;

/// Read/write access to the user's theme preference.
///
/// The presentation layer depends on this trait rather than on [`Settings`],
/// so screens can be driven by any implementation.
pub trait UserSettings: Send + Sync {
    /// The current theme. Always the last successful write, or the value
    /// loaded at construction.
    fn theme(&self) -> AppTheme;

    /// Persists `theme`, then broadcasts it to every subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Storage`] if the value could not be persisted.
    /// Nothing is broadcast and [`theme`](Self::theme) is unchanged.
    fn set_theme(&self, theme: AppTheme) -> Result<(), SettingsError>;

    /// Subscribes to the theme. The subscription yields the current theme
    /// first, then every later successful write.
    fn theme_stream(&self) -> ThemeSubscription;
}

/// [`UserSettings`] backed by a [`PreferenceStore`].
///
/// Construct one per process and share it, e.g. behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use themeswitch::{AppTheme, MemoryPreferences, Settings, UserSettings, THEME_KEY};
///
/// let settings = Settings::open(MemoryPreferences::new(), THEME_KEY).unwrap();
/// let mut stream = settings.theme_stream();
///
/// settings.set_theme(AppTheme::Night).unwrap();
///
/// assert_eq!(settings.theme(), AppTheme::Night);
/// assert_eq!(stream.try_next(), Some(AppTheme::Auto));
/// assert_eq!(stream.try_next(), Some(AppTheme::Night));
/// ```
pub struct Settings<P> {
    prefs: P,
    key: String,
    broadcast: ThemeBroadcast,
    // Keeps persist-then-publish atomic with respect to other writers, so the
    // broadcast order always matches the order values reached storage.
    write_lock: Mutex<()>,
}

impl Settings<JsonPreferences> {
    /// Opens the JSON preference group described by `config`.
    pub fn from_config(config: &StoreConfig) -> Result<Self, SettingsError> {
        let prefs = JsonPreferences::open(config)?;
        Self::open(prefs, &config.key)
    }

    /// Like [`from_config`](Self::from_config), but never fails.
    ///
    /// If the group cannot be read, the failure is logged and returned next to
    /// a store that starts at [`AppTheme::Auto`]. That store still writes to
    /// the configured file, so later saves keep trying and keep reporting.
    pub fn from_config_or_default(config: &StoreConfig) -> (Self, Option<SettingsError>) {
        match Self::from_config(config) {
            Ok(settings) => (settings, None),
            Err(err) => {
                log::warn!("{}; starting with {}", err, AppTheme::default());
                let prefs = JsonPreferences::empty_at(config.group_path());
                (Self::with_initial(prefs, &config.key, AppTheme::default()), Some(err))
            }
        }
    }
}

impl<P: PreferenceStore> Settings<P> {
    /// Loads the theme stored under `key`.
    ///
    /// A missing entry yields [`AppTheme::Auto`]. An entry outside the
    /// valid ordinals is logged and also yields [`AppTheme::Auto`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Storage`] if the store cannot be read.
    pub fn open(prefs: P, key: &str) -> Result<Self, SettingsError> {
        let initial = match prefs.get_int(key)? {
            None => AppTheme::default(),
            Some(ordinal) => AppTheme::from_ordinal(ordinal).unwrap_or_else(|err| {
                log::warn!("{}; falling back to {}", err, AppTheme::default());
                AppTheme::default()
            }),
        };
        log::debug!("loaded theme {} from '{}'", initial, key);
        Ok(Self::with_initial(prefs, key, initial))
    }

    fn with_initial(prefs: P, key: &str, initial: AppTheme) -> Self {
        Self {
            prefs,
            key: key.to_string(),
            broadcast: ThemeBroadcast::new(initial),
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying preference store.
    pub fn prefs(&self) -> &P {
        &self.prefs
    }
}

impl<P: PreferenceStore> UserSettings for Settings<P> {
    fn theme(&self) -> AppTheme {
        self.broadcast.current()
    }

    fn set_theme(&self, theme: AppTheme) -> Result<(), SettingsError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = self.prefs.put_int(&self.key, theme.ordinal()) {
            log::warn!("could not persist theme {}: {}", theme, err);
            return Err(err.into());
        }
        self.broadcast.publish(theme);
        log::debug!("theme set to {}", theme);
        Ok(())
    }

    fn theme_stream(&self) -> ThemeSubscription {
        self.broadcast.subscribe()
    }
}

impl<P> std::fmt::Debug for Settings<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("key", &self.key)
            .field("theme", &self.broadcast.current())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::error::StorageError;
    use crate::settings::prefs::{MemoryPreferences, THEME_KEY};

    struct ReadOnlyPreferences;

    impl PreferenceStore for ReadOnlyPreferences {
        fn get_int(&self, _key: &str) -> Result<Option<i64>, StorageError> {
            Ok(Some(AppTheme::Day.ordinal()))
        }

        fn put_int(&self, _key: &str, _value: i64) -> Result<(), StorageError> {
            Err(StorageError::Unavailable {
                message: "read-only".into(),
            })
        }
    }

    struct UnreadablePreferences;

    impl PreferenceStore for UnreadablePreferences {
        fn get_int(&self, _key: &str) -> Result<Option<i64>, StorageError> {
            Err(StorageError::Unavailable {
                message: "unreadable".into(),
            })
        }

        fn put_int(&self, _key: &str, _value: i64) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_fresh_store_defaults_to_auto() {
        let settings = Settings::open(MemoryPreferences::new(), THEME_KEY).unwrap();
        assert_eq!(settings.theme(), AppTheme::Auto);
    }

    #[test]
    fn test_loads_persisted_theme() {
        let prefs = MemoryPreferences::with_entries([(THEME_KEY, 1)]);
        let settings = Settings::open(prefs, THEME_KEY).unwrap();
        assert_eq!(settings.theme(), AppTheme::Night);
    }

    #[test]
    fn test_out_of_range_ordinal_falls_back_to_auto() {
        let prefs = MemoryPreferences::with_entries([(THEME_KEY, 7)]);
        let settings = Settings::open(prefs, THEME_KEY).unwrap();
        assert_eq!(settings.theme(), AppTheme::Auto);
    }

    #[test]
    fn test_set_theme_persists_ordinal() {
        let settings = Settings::open(MemoryPreferences::new(), THEME_KEY).unwrap();
        settings.set_theme(AppTheme::Night).unwrap();
        assert_eq!(settings.theme(), AppTheme::Night);
        assert_eq!(settings.prefs().get_int(THEME_KEY).unwrap(), Some(1));
    }

    #[test]
    fn test_failed_write_keeps_previous_theme() {
        let settings = Settings::open(ReadOnlyPreferences, THEME_KEY).unwrap();
        let mut stream = settings.theme_stream();
        assert_eq!(stream.try_next(), Some(AppTheme::Day));

        let err = settings.set_theme(AppTheme::Night).unwrap_err();
        assert!(matches!(err, SettingsError::Storage(_)));
        assert_eq!(settings.theme(), AppTheme::Day);
        assert_eq!(stream.try_next(), None);
    }

    #[test]
    fn test_unreadable_store_fails_open() {
        let result = Settings::open(UnreadablePreferences, THEME_KEY);
        assert!(matches!(result, Err(SettingsError::Storage(_))));
    }

    #[test]
    fn test_unreadable_group_starts_at_auto_and_keeps_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::in_directory(dir.path());
        std::fs::create_dir(config.group_path()).unwrap();

        assert!(Settings::from_config(&config).is_err());

        let (settings, err) = Settings::from_config_or_default(&config);
        assert!(matches!(err, Some(SettingsError::Storage(_))));
        assert_eq!(settings.theme(), AppTheme::Auto);
        assert_eq!(settings.prefs().path(), config.group_path());

        // The path is still a directory, so saving keeps failing visibly.
        let err = settings.set_theme(AppTheme::Night).unwrap_err();
        assert!(matches!(err, SettingsError::Storage(_)));
        assert_eq!(settings.theme(), AppTheme::Auto);

        std::fs::remove_dir(config.group_path()).unwrap();
        settings.set_theme(AppTheme::Night).unwrap();
        assert_eq!(Settings::from_config(&config).unwrap().theme(), AppTheme::Night);
    }

    #[test]
    fn test_readable_group_reports_no_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::in_directory(dir.path());
        let (settings, err) = Settings::from_config_or_default(&config);
        assert!(err.is_none());
        assert_eq!(settings.theme(), AppTheme::Auto);
    }

    #[test]
    fn test_duplicate_write_leaves_theme_unchanged() {
        let settings = Settings::open(MemoryPreferences::new(), THEME_KEY).unwrap();
        settings.set_theme(AppTheme::Day).unwrap();
        settings.set_theme(AppTheme::Day).unwrap();
        assert_eq!(settings.theme(), AppTheme::Day);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let settings: Box<dyn UserSettings> =
            Box::new(Settings::open(MemoryPreferences::new(), THEME_KEY).unwrap());
        settings.set_theme(AppTheme::Night).unwrap();
        assert_eq!(settings.theme(), AppTheme::Night);
    }
}
