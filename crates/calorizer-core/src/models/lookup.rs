//! Reference data models.

use serde::{Deserialize, Serialize};

/// Known lookup categories, by category code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i64)]
pub enum LookupType {
    Gender = 1,
}

impl LookupType {
    /// Category code stored in `lookup_categories.code`.
    pub fn code(self) -> i64 {
        self as i64
    }
}

/// A group of lookups (e.g. "Gender").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LookupCategory {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub code: i64,
    pub created_by: i64,
}

/// A single reference value (e.g. "Female").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Lookup {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub code: Option<String>,
    pub category_id: i64,
    pub created_by: i64,
}

/// Lookup as shown to callers (dropdown options).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LookupDto {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub code: Option<String>,
}

impl From<Lookup> for LookupDto {
    fn from(lookup: Lookup) -> Self {
        Self {
            id: lookup.id,
            name_en: lookup.name_en,
            name_ar: lookup.name_ar,
            code: lookup.code,
        }
    }
}
