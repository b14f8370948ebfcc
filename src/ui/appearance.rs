//! Effective color mode for a theme preference.

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};

use crate::settings::AppTheme;

/// The color mode a screen is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Light,
    Dark,
}

/// Reports whether the system is currently in dark mode.
///
/// Screens take one of these so tests can pin the answer without asking the OS.
pub type DarkModeProbe = fn() -> bool;

impl ColorMode {
    /// Resolves the mode for `theme`.
    ///
    /// `system_is_dark` is consulted only for [`AppTheme::Auto`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use themeswitch::{AppTheme, ColorMode};
    ///
    /// assert_eq!(ColorMode::resolve(AppTheme::Night, || false), ColorMode::Dark);
    /// assert_eq!(ColorMode::resolve(AppTheme::Auto, || true), ColorMode::Dark);
    /// assert_eq!(ColorMode::resolve(AppTheme::Auto, || false), ColorMode::Light);
    /// ```
    pub fn resolve(theme: AppTheme, system_is_dark: impl FnOnce() -> bool) -> Self {
        match theme {
            AppTheme::Day => ColorMode::Light,
            AppTheme::Night => ColorMode::Dark,
            AppTheme::Auto => {
                if system_is_dark() {
                    ColorMode::Dark
                } else {
                    ColorMode::Light
                }
            }
        }
    }
}

/// Asks the operating system whether it is in dark mode.
pub fn os_prefers_dark() -> bool {
    match detect_os_theme() {
        OsThemeMode::Dark => true,
        OsThemeMode::Light => false,
    }
}
