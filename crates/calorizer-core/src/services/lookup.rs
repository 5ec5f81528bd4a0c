//! Read-only reference data.

use crate::db::{Database, DbResult, Predicate};
use crate::models::{Lookup, LookupCategory, LookupDto, LookupType};

pub struct LookupService<'a> {
    db: &'a Database,
}

impl<'a> LookupService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Lookups of a known category.
    pub fn lookup_items(&self, lookup_type: LookupType) -> DbResult<Vec<LookupDto>> {
        self.lookup_items_by_category(lookup_type.code())
    }

    /// Lookups whose category has the given code, in id order. An unknown
    /// code yields an empty list.
    pub fn lookup_items_by_category(&self, category_code: i64) -> DbResult<Vec<LookupDto>> {
        let categories = self
            .db
            .repository::<LookupCategory>()
            .find(&Predicate::eq("code", category_code))?;

        let lookups = self.db.repository::<Lookup>();
        let mut items = Vec::new();
        for category in categories {
            let found = lookups.find(&Predicate::eq("category_id", category.id))?;
            items.extend(found.into_iter().map(LookupDto::from));
        }
        Ok(items)
    }

    pub fn lookup_by_id(&self, id: i64) -> DbResult<Option<LookupDto>> {
        Ok(self.db.repository::<Lookup>().get_by_id(id)?.map(Into::into))
    }
}
