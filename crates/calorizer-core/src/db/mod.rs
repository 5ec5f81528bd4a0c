//! Database layer for calorizer.

mod schema;
mod repository;
mod clients;
mod records;
mod lookups;

pub use schema::*;
pub use repository::*;

use rusqlite::{Connection, ErrorCode};
use std::path::Path;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Unknown column {column} for table {table}")]
    UnknownColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl DbError {
    /// Classify a raw SQLite error, splitting out constraint violations
    /// (foreign keys, NOT NULL, CHECK) from everything else.
    pub fn classify(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
                DbError::Constraint(msg.clone().unwrap_or_else(|| e.to_string()))
            }
            _ => DbError::Sqlite(err),
        }
    }

    /// Check whether this error came from a store constraint.
    pub fn is_constraint(&self) -> bool {
        matches!(self, DbError::Constraint(_))
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema and seed reference data.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Gateway for one record type on the main connection.
    pub fn repository<T: Entity>(&self) -> Repository<'_, T> {
        Repository::new(&self.conn)
    }

    /// Begin a transaction.
    ///
    /// Takes `&self` so services holding a shared borrow can group writes; the
    /// connection is never shared across threads without the outer mutex.
    pub fn transaction(&self) -> DbResult<rusqlite::Transaction<'_>> {
        Ok(self.conn.unchecked_transaction()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();

        // Check that tables exist
        let tables: Vec<String> = db
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"clients".to_string()));
        assert!(tables.contains(&"weight_histories".to_string()));
        assert!(tables.contains(&"biochemical_medical_tests".to_string()));
        assert!(tables.contains(&"drugs_supplements".to_string()));
        assert!(tables.contains(&"medical_histories".to_string()));
        assert!(tables.contains(&"lookups".to_string()));
        assert!(tables.contains(&"lookup_categories".to_string()));
    }

    #[test]
    fn test_reopen_file_keeps_seed_single() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calorizer.db");

        Database::open(&path).unwrap();
        let db = Database::open(&path).unwrap();

        let genders: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM lookups", [], |row| row.get(0))
            .unwrap();
        assert_eq!(genders, 2);
    }

    #[test]
    fn test_classify_foreign_key_violation() {
        let db = Database::open_in_memory().unwrap();
        let err = db
            .conn()
            .execute(
                "INSERT INTO medical_histories (client_id, medical_note, created_on, created_by)
                 VALUES (999, 'note', '2024-01-01T00:00:00Z', 1)",
                [],
            )
            .unwrap_err();

        assert!(DbError::classify(err).is_constraint());
    }
}
