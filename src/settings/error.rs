//! Settings errors.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// A persisted ordinal that does not name any [`AppTheme`](super::AppTheme).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("persisted theme ordinal {ordinal} is outside 0..=2")]
pub struct DecodeError {
    pub ordinal: i64,
}

/// The preference group could not be read or written.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("preference storage at '{}' failed: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The preference group could not be serialized.
    #[error("preference group '{}' could not be encoded: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A storage backend refused the operation.
    #[error("preference storage unavailable: {message}")]
    Unavailable { message: String },
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Error returned by [`UserSettings`](super::UserSettings) operations.
///
/// Malformed stored values are not errors here: they are logged and read as
/// the default theme. [`DecodeError`] only reaches callers of
/// [`AppTheme::from_ordinal`](super::AppTheme::from_ordinal).
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let msg = DecodeError { ordinal: 7 }.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains("0..=2"));
    }

    #[test]
    fn test_io_error_display_names_path() {
        let err = StorageError::io(
            Path::new("/prefs/sample_theme.json"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("sample_theme.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_settings_error_is_transparent() {
        let err = SettingsError::from(StorageError::Unavailable {
            message: "disk gone".into(),
        });
        assert_eq!(err.to_string(), "preference storage unavailable: disk gone");
    }
}
