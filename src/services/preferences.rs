//! Preference Store: a single persisted theme flag.
//!
//! Values are kept as strings in a small `confy` managed key-value file, so
//! the flag reads as dark only when the stored value is the literal `"true"`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::models::AppError;

const APP_NAME: &str = "voice-greeter";
const PREFERENCES_FILE: &str = "preferences";
const THEME_KEY: &str = "darkMode";

type Entries = BTreeMap<String, String>;

/// File-backed preference store.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined.
    pub fn default_location() -> Result<Self, AppError> {
        let path = confy::get_configuration_file_path(APP_NAME, PREFERENCES_FILE)?;
        Ok(Self::at(path))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the theme flag: `true` means dark.
    ///
    /// Missing or unreadable state, and any stored value other than the
    /// literal `"true"`, read as `false` (light).
    #[must_use]
    pub fn theme(&self) -> bool {
        match self.read_entries() {
            Ok(entries) => entries.get(THEME_KEY).is_some_and(|value| value == "true"),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "Could not read preferences, using light theme");
                false
            }
        }
    }

    /// Persists the theme flag. Takes effect on the next read.
    ///
    /// # Errors
    ///
    /// Returns a `PreferenceError` if the file cannot be written.
    pub fn set_theme(&self, dark: bool) -> Result<(), AppError> {
        // an unreadable file is replaced rather than blocking the write
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(THEME_KEY.to_string(), dark.to_string());
        confy::store_path(&self.path, &entries)?;
        debug!(dark, path = %self.path.display(), "Stored theme preference");
        Ok(())
    }

    /// Flips the theme flag and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns a `PreferenceError` if the file cannot be written.
    pub fn toggle_theme(&self) -> Result<bool, AppError> {
        let dark = !self.theme();
        self.set_theme(dark)?;
        Ok(dark)
    }

    fn read_entries(&self) -> Result<Entries, AppError> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }
        Ok(confy::load_path(&self.path)?)
    }
}
