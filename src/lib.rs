//! # themeswitch - Day/Night/Auto theme preference with a live selector
//!
//! `themeswitch` keeps one user preference, the display theme, in a local
//! preference group and broadcasts every change to whoever is watching. A
//! terminal screen renders the choice as a radio group and writes the user's
//! pick back.
//!
//! ## Quick Start
//!
//! ```rust
//! use themeswitch::{AppTheme, MemoryPreferences, Settings, UserSettings, THEME_KEY};
//!
//! let settings = Settings::open(MemoryPreferences::new(), THEME_KEY).unwrap();
//! assert_eq!(settings.theme(), AppTheme::Auto);
//!
//! let mut stream = settings.theme_stream();
//! settings.set_theme(AppTheme::Day).unwrap();
//! settings.set_theme(AppTheme::Night).unwrap();
//!
//! let seen: Vec<_> = std::iter::from_fn(|| stream.try_next()).collect();
//! assert_eq!(seen, [AppTheme::Auto, AppTheme::Day, AppTheme::Night]);
//! ```
//!
//! ## Storage
//!
//! [`JsonPreferences`] stores the theme as an integer ordinal under the key
//! `"app_theme"` in `<config dir>/themeswitch/sample_theme.json`:
//! `0` is Day, `1` is Night, `2` is Auto. A missing entry means Auto. An
//! entry outside that range is logged and also read as Auto.
//!
//! ## Wiring
//!
//! Open one [`Settings`] per process and hand it to screens as an
//! `Arc<dyn UserSettings>`. Screens never reach for a global.

pub mod settings;
pub mod ui;

pub use settings::{
    default_directory, AppTheme, DecodeError, JsonPreferences, MemoryPreferences,
    PreferenceStore, Settings, SettingsError, StorageError, StoreConfig, ThemeBroadcast,
    ThemeSubscription, UserSettings, DEFAULT_NAMESPACE, THEME_KEY,
};
pub use ui::{
    os_prefers_dark, ColorMode, DarkModeProbe, Palette, RadioButtonItem, RadioGroup,
    ScreenAction, ThemeScreen,
};
