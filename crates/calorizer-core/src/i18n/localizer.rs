//! Shared, reloadable translation table.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, warn};

use super::{Language, LocalizationError, Translations};

/// Resolves message keys to display text.
///
/// Readers take a snapshot `Arc` of the current table; [`Localizer::reload`]
/// swaps the whole table at once.
#[derive(Debug)]
pub struct Localizer {
    source: Option<PathBuf>,
    table: RwLock<Arc<Translations>>,
}

impl Localizer {
    /// A localizer with no table; every key resolves to itself.
    pub fn empty() -> Self {
        Self::from_translations(Translations::default())
    }

    /// A localizer over a fixed table, without a backing file.
    pub fn from_translations(translations: Translations) -> Self {
        Self {
            source: None,
            table: RwLock::new(Arc::new(translations)),
        }
    }

    /// Load from a JSON file.
    ///
    /// A missing or malformed file is logged and leaves the table empty; it
    /// never prevents startup. The path is remembered for [`Localizer::reload`].
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let translations = match read_table(&path) {
            Ok(table) => {
                info!(path = %path.display(), count = table.len(), "loaded translations");
                table
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "translations unavailable, keys will be shown as-is"
                );
                Translations::default()
            }
        };

        Self {
            source: Some(path),
            table: RwLock::new(Arc::new(translations)),
        }
    }

    /// Re-read the backing file and swap the table.
    ///
    /// On failure the previous table stays in place and the error is returned.
    pub fn reload(&self) -> Result<usize, LocalizationError> {
        let path = self.source.as_ref().ok_or(LocalizationError::NoSource)?;
        let translations = match read_table(path) {
            Ok(table) => table,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "translation reload failed, keeping previous table"
                );
                return Err(e);
            }
        };

        let count = translations.len();
        *self.table.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(translations);
        info!(path = %path.display(), count, "reloaded translations");
        Ok(count)
    }

    /// Current table snapshot.
    pub fn snapshot(&self) -> Arc<Translations> {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*table)
    }

    /// Display text for `key`, or the key itself when it is unknown.
    pub fn resolve(&self, key: &str, language: Language) -> String {
        match self.snapshot().get(key) {
            Some(entry) => {
                let value = entry.value(language);
                if value.is_empty() {
                    key.to_string()
                } else {
                    value.to_string()
                }
            }
            None => {
                if !key.is_empty() {
                    warn!(key, language = %language, "translation key not found");
                }
                key.to_string()
            }
        }
    }

    /// Display text for `key`, or `fallback` when it is unknown or blank.
    pub fn get_or(&self, key: &str, language: Language, fallback: &str) -> String {
        let table = self.snapshot();
        match table.get(key).map(|entry| entry.value(language)) {
            Some(value) if !value.is_empty() && value != key => value.to_string(),
            _ => {
                debug!(key, "no usable translation, using fallback");
                fallback.to_string()
            }
        }
    }

    /// The whole table in one language.
    pub fn all(&self, language: Language) -> HashMap<String, String> {
        self.snapshot().values(language)
    }

    /// Path of the backing file, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::empty()
    }
}

fn read_table(path: &Path) -> Result<Translations, LocalizationError> {
    let json = fs::read_to_string(path).map_err(|source| LocalizationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Translations::from_json(&json)
}
