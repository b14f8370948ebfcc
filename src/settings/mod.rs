//! The theme settings store.
//!
//! This module provides:
//!
//! - [`AppTheme`]: the Day/Night/Auto preference and its persisted ordinal
//! - [`UserSettings`]: getter, setter and live stream for the theme
//! - [`Settings`]: the [`UserSettings`] implementation over a [`PreferenceStore`]
//! - [`JsonPreferences`] / [`MemoryPreferences`]: durable and in-memory stores
//! - [`ThemeBroadcast`] / [`ThemeSubscription`]: the latest-value broadcast
//!
//! A write goes to storage first and is broadcast only once it is durable.

mod broadcast;
mod error;
mod prefs;
mod store;
mod theme;

pub use broadcast::{ThemeBroadcast, ThemeSubscription};
pub use error::{DecodeError, SettingsError, StorageError};
pub use prefs::{
    default_directory, JsonPreferences, MemoryPreferences, PreferenceStore, StoreConfig,
    DEFAULT_NAMESPACE, THEME_KEY,
};
pub use store::{Settings, UserSettings};
pub use theme::AppTheme;
