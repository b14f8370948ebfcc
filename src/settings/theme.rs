//! The persisted display-mode preference.

use super::error::DecodeError;

/// The user's display-mode preference.
///
/// The discriminants are the persisted ordinals. Never reorder the variants:
/// stored values would be reinterpreted as a different mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppTheme {
    /// Always light.
    Day = 0,
    /// Always dark.
    Night = 1,
    /// Follow the operating system's light/dark signal.
    #[default]
    Auto = 2,
}

impl AppTheme {
    /// Every theme, in ordinal order.
    pub const ALL: [AppTheme; 3] = [AppTheme::Day, AppTheme::Night, AppTheme::Auto];

    /// Returns the integer this theme is persisted as.
    pub fn ordinal(self) -> i64 {
        self as i64
    }

    /// Decodes a persisted ordinal.
    ///
    /// # Example
    ///
    /// ```rust
    /// use themeswitch::AppTheme;
    ///
    /// assert_eq!(AppTheme::from_ordinal(1).unwrap(), AppTheme::Night);
    /// assert!(AppTheme::from_ordinal(7).is_err());
    /// ```
    pub fn from_ordinal(ordinal: i64) -> Result<Self, DecodeError> {
        match ordinal {
            0 => Ok(AppTheme::Day),
            1 => Ok(AppTheme::Night),
            2 => Ok(AppTheme::Auto),
            _ => Err(DecodeError { ordinal }),
        }
    }

    /// Short lowercase name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            AppTheme::Day => "day",
            AppTheme::Night => "night",
            AppTheme::Auto => "auto",
        }
    }
}

impl std::fmt::Display for AppTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
