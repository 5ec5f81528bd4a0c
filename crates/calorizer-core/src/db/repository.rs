//! Generic persistence gateway.
//!
//! Every stored record type describes its table and row codec through
//! [`Entity`]; [`Repository`] then provides the same get/find/add/update/delete
//! surface for all of them. A repository borrows a [`Connection`], so it works
//! equally on the main connection and inside a transaction.

use std::marker::PhantomData;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row, ToSql};

use super::{DbError, DbResult};

/// A record type with a table, an integer primary key `id`, and a row codec.
pub trait Entity: Sized {
    /// Table name.
    const TABLE: &'static str;

    /// Non-key columns, in the order used by [`Entity::from_row`] (after `id`)
    /// and [`Entity::values`].
    const COLUMNS: &'static [&'static str];

    /// Primary key, `0` before insert.
    fn id(&self) -> i64;

    /// Record the store-assigned primary key.
    fn set_id(&mut self, id: i64);

    /// Decode a row selected as `id, COLUMNS...`.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Values for `COLUMNS`, same order.
    fn values(&self) -> Vec<&dyn ToSql>;
}

/// Equality predicate on one column, used by [`Repository::find`].
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    column: &'static str,
    value: Value,
}

impl Predicate {
    /// `column = value`.
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }

    /// Shorthand for the owning-client filter shared by all sub-records.
    pub fn client_id(client_id: i64) -> Self {
        Self::eq("client_id", client_id)
    }

    pub fn column(&self) -> &'static str {
        self.column
    }
}

/// Store operations for one record type.
pub struct Repository<'c, T> {
    conn: &'c Connection,
    _marker: PhantomData<T>,
}

impl<'c, T: Entity> Repository<'c, T> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            _marker: PhantomData,
        }
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", T::COLUMNS.join(", "), T::TABLE)
    }

    /// Get a record by primary key.
    pub fn get_by_id(&self, id: i64) -> DbResult<Option<T>> {
        let sql = format!("{} WHERE id = ?1", Self::select_sql());
        self.conn
            .query_row(&sql, [id], |row| T::from_row(row))
            .optional()
            .map_err(Into::into)
    }

    /// List every record, in insertion order.
    pub fn get_all(&self) -> DbResult<Vec<T>> {
        let sql = format!("{} ORDER BY id", Self::select_sql());
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| T::from_row(row))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List records matching a column predicate, in insertion order.
    pub fn find(&self, predicate: &Predicate) -> DbResult<Vec<T>> {
        if predicate.column != "id" && !T::COLUMNS.contains(&predicate.column) {
            return Err(DbError::UnknownColumn {
                table: T::TABLE,
                column: predicate.column,
            });
        }

        let sql = format!(
            "{} WHERE {} = ?1 ORDER BY id",
            Self::select_sql(),
            predicate.column
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([&predicate.value], |row| T::from_row(row))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Insert a record and return it with its assigned id.
    pub fn add(&self, mut entity: T) -> DbResult<T> {
        let placeholders = (1..=T::COLUMNS.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders
        );

        self.conn
            .execute(&sql, params_from_iter(entity.values()))
            .map_err(DbError::classify)?;
        entity.set_id(self.conn.last_insert_rowid());
        Ok(entity)
    }

    /// Overwrite every column of an existing record.
    ///
    /// Returns `false` when no row has the entity's id.
    pub fn update(&self, entity: &T) -> DbResult<bool> {
        let assignments = T::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", column, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            T::TABLE,
            assignments,
            T::COLUMNS.len() + 1
        );

        let id = entity.id();
        let mut values = entity.values();
        values.push(&id);

        let rows_affected = self
            .conn
            .execute(&sql, params_from_iter(values))
            .map_err(DbError::classify)?;
        Ok(rows_affected > 0)
    }

    /// Delete a record by id.
    ///
    /// Missing ids are a no-op and return `false`.
    pub fn delete(&self, id: i64) -> DbResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", T::TABLE);
        let rows_affected = self
            .conn
            .execute(&sql, [id])
            .map_err(DbError::classify)?;
        Ok(rows_affected > 0)
    }

    /// Check whether a record exists.
    pub fn exists(&self, id: i64) -> DbResult<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", T::TABLE);
        self.conn
            .query_row(&sql, [id], |row| row.get(0))
            .map_err(Into::into)
    }
}
