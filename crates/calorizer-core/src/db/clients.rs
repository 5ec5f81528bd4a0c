//! Client table codec.

use rusqlite::{Row, ToSql};

use super::Entity;
use crate::models::Client;

impl Entity for Client {
    const TABLE: &'static str = "clients";
    const COLUMNS: &'static [&'static str] = &[
        "full_name_en",
        "full_name_ar",
        "mobile_number",
        "gender_id",
        "address",
        "date_of_birth",
        "weight",
        "height",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Client {
            id: row.get(0)?,
            full_name_en: row.get(1)?,
            full_name_ar: row.get(2)?,
            mobile_number: row.get(3)?,
            gender_id: row.get(4)?,
            address: row.get(5)?,
            date_of_birth: row.get(6)?,
            weight: row.get(7)?,
            height: row.get(8)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.full_name_en,
            &self.full_name_ar,
            &self.mobile_number,
            &self.gender_id,
            &self.address,
            &self.date_of_birth,
            &self.weight,
            &self.height,
        ]
    }
}
