//! Sub-record table codecs.

use rusqlite::{Row, ToSql};

use super::Entity;
use crate::models::{BiochemicalMedicalTest, DrugsSupplement, MedicalHistory, WeightHistory};

impl Entity for WeightHistory {
    const TABLE: &'static str = "weight_histories";
    const COLUMNS: &'static [&'static str] =
        &["client_id", "weight", "height", "created_on", "created_by"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(WeightHistory {
            id: row.get(0)?,
            client_id: row.get(1)?,
            weight: row.get(2)?,
            height: row.get(3)?,
            created_on: row.get(4)?,
            created_by: row.get(5)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.client_id,
            &self.weight,
            &self.height,
            &self.created_on,
            &self.created_by,
        ]
    }
}

impl Entity for BiochemicalMedicalTest {
    const TABLE: &'static str = "biochemical_medical_tests";
    const COLUMNS: &'static [&'static str] =
        &["client_id", "medical_data", "created_on", "created_by"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(BiochemicalMedicalTest {
            id: row.get(0)?,
            client_id: row.get(1)?,
            medical_data: row.get(2)?,
            created_on: row.get(3)?,
            created_by: row.get(4)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.client_id,
            &self.medical_data,
            &self.created_on,
            &self.created_by,
        ]
    }
}

impl Entity for DrugsSupplement {
    const TABLE: &'static str = "drugs_supplements";
    const COLUMNS: &'static [&'static str] = &["client_id", "drug", "created_on", "created_by"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(DrugsSupplement {
            id: row.get(0)?,
            client_id: row.get(1)?,
            drug: row.get(2)?,
            created_on: row.get(3)?,
            created_by: row.get(4)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![&self.client_id, &self.drug, &self.created_on, &self.created_by]
    }
}

impl Entity for MedicalHistory {
    const TABLE: &'static str = "medical_histories";
    const COLUMNS: &'static [&'static str] =
        &["client_id", "medical_note", "created_on", "created_by"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(MedicalHistory {
            id: row.get(0)?,
            client_id: row.get(1)?,
            medical_note: row.get(2)?,
            created_on: row.get(3)?,
            created_by: row.get(4)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.client_id,
            &self.medical_note,
            &self.created_on,
            &self.created_by,
        ]
    }
}

#[cfg(test)]
mod tests {
    use crate::db::{Database, Predicate};
    use crate::models::WeightHistory;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_weight_history_keeps_timestamp_and_nulls() {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO clients (id, full_name_en, gender_id, date_of_birth)
                 VALUES (1, 'Hana', 2, '1979-09-09')",
                [],
            )
            .unwrap();

        let created_on = Utc.with_ymd_and_hms(2024, 3, 15, 14, 5, 9).unwrap();
        let repo = db.repository::<WeightHistory>();
        let saved = repo
            .add(WeightHistory {
                id: 0,
                client_id: 1,
                weight: Some(64.25),
                height: None,
                created_on,
                created_by: 3,
            })
            .unwrap();

        let rows = repo.find(&Predicate::client_id(1)).unwrap();
        assert_eq!(rows, vec![saved]);
        assert_eq!(rows[0].created_on, created_on);
        assert_eq!(rows[0].height, None);
    }
}
