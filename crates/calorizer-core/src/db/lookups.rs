//! Lookup table codecs.

use rusqlite::{Row, ToSql};

use super::Entity;
use crate::models::{Lookup, LookupCategory};

impl Entity for LookupCategory {
    const TABLE: &'static str = "lookup_categories";
    const COLUMNS: &'static [&'static str] = &["name_en", "name_ar", "code", "created_by"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(LookupCategory {
            id: row.get(0)?,
            name_en: row.get(1)?,
            name_ar: row.get(2)?,
            code: row.get(3)?,
            created_by: row.get(4)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![&self.name_en, &self.name_ar, &self.code, &self.created_by]
    }
}

impl Entity for Lookup {
    const TABLE: &'static str = "lookups";
    const COLUMNS: &'static [&'static str] =
        &["name_en", "name_ar", "code", "category_id", "created_by"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Lookup {
            id: row.get(0)?,
            name_en: row.get(1)?,
            name_ar: row.get(2)?,
            code: row.get(3)?,
            category_id: row.get(4)?,
            created_by: row.get(5)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.name_en,
            &self.name_ar,
            &self.code,
            &self.category_id,
            &self.created_by,
        ]
    }
}
