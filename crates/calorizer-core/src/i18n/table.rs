//! Translation table parsing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::{Language, LocalizationError};

/// Both display values for one key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizationEntry {
    pub value_en: String,
    pub value_ar: String,
}

impl LocalizationEntry {
    pub fn new(value_en: impl Into<String>, value_ar: impl Into<String>) -> Self {
        Self {
            value_en: value_en.into(),
            value_ar: value_ar.into(),
        }
    }

    /// Value for a language; a blank Arabic value falls back to English.
    pub fn value(&self, language: Language) -> &str {
        match language {
            Language::Ar if !self.value_ar.is_empty() => &self.value_ar,
            _ => &self.value_en,
        }
    }
}

/// Immutable key → entry table with case-insensitive keys.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    // lowercased key -> (key as written in the source, entry)
    entries: HashMap<String, (String, LocalizationEntry)>,
}

impl Translations {
    /// Parse a flat JSON document.
    ///
    /// `//` and `/* */` comments and trailing commas are accepted. Entry
    /// property names match case-insensitively and unknown properties are
    /// ignored. Entries that are not objects are skipped with a warning.
    pub fn from_json(json: &str) -> Result<Self, LocalizationError> {
        let document: Value = serde_json::from_str(&drop_trailing_commas(&strip_comments(json)))?;
        let Value::Object(map) = document else {
            return Err(LocalizationError::NotAnObject);
        };

        let mut translations = Self::default();
        for (key, value) in map {
            match entry_from_value(&value) {
                Some(entry) => translations.insert(key, entry),
                None => warn!(key = %key, "skipping localization entry that is not an object"),
            }
        }
        Ok(translations)
    }

    /// Add or replace an entry. Later keys win over earlier ones that differ
    /// only by case.
    pub fn insert(&mut self, key: impl Into<String>, entry: LocalizationEntry) {
        let key = key.into();
        self.entries.insert(key.to_lowercase(), (key, entry));
    }

    pub fn get(&self, key: &str) -> Option<&LocalizationEntry> {
        self.entries.get(&key.to_lowercase()).map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every key with its value in one language.
    pub fn values(&self, language: Language) -> HashMap<String, String> {
        self.entries
            .values()
            .map(|(key, entry)| (key.clone(), entry.value(language).to_string()))
            .collect()
    }
}

impl FromIterator<(String, LocalizationEntry)> for Translations {
    fn from_iter<I: IntoIterator<Item = (String, LocalizationEntry)>>(iter: I) -> Self {
        let mut translations = Self::default();
        for (key, entry) in iter {
            translations.insert(key, entry);
        }
        translations
    }
}

/// Blank out comments, leaving string contents untouched.
fn strip_comments(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut chars = json.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => out.extend(chars.next()),
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    out
}

/// Remove commas directly followed (after whitespace) by `}` or `]`.
fn drop_trailing_commas(json: &str) -> String {
    let chars: Vec<char> = json.chars().collect();
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(&escaped) = chars.get(i + 1) {
                    out.push(escaped);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|n| !n.is_whitespace());
            if !matches!(next, Some('}') | Some(']')) {
                out.push(c);
            }
        } else {
            in_string = c == '"';
            out.push(c);
        }
        i += 1;
    }
    out
}

fn entry_from_value(value: &Value) -> Option<LocalizationEntry> {
    let fields = value.as_object()?;
    let mut entry = LocalizationEntry::default();
    for (name, field) in fields {
        let Some(text) = field.as_str() else { continue };
        if name.eq_ignore_ascii_case("valueEn") {
            entry.value_en = text.to_string();
        } else if name.eq_ignore_ascii_case("valueAr") {
            entry.value_ar = text.to_string();
        }
    }
    Some(entry)
}
