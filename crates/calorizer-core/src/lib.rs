//! Calorizer Core Library
//!
//! Client record management for a nutrition clinic: client demographics plus
//! four append-only medical sub-records, bilingual (English/Arabic) messages
//! and server-side validation.
//!
//! # Architecture
//!
//! ```text
//! submitted form
//!       │
//!       ▼
//!  Validation ──── violations ───► Localizer ──► Response (422, brokenRules)
//!       │
//!       ▼ valid
//!  Record service ── store error ─► Localizer ──► Response (400, message)
//!       │
//!       ▼
//!  Repository<T> (insert + derived weight history, one transaction)
//!       │
//!       ▼
//!  reload newest-first collection ──────────────► Response (200, data)
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer and generic repository
//! - [`models`]: Stored records and submitted forms
//! - [`validation`]: Per-form rule sets
//! - [`i18n`]: Reloadable English/Arabic message table
//! - [`response`]: Uniform result envelope
//! - [`services`]: Client, sub-record and lookup services
//! - [`config`]: Startup configuration

pub mod config;
pub mod db;
pub mod i18n;
pub mod models;
pub mod response;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use config::CoreConfig;
pub use db::{Database, DbError, DbResult};
pub use i18n::{Language, LocalizationError, Localizer};
pub use models::{
    BiochemicalMedicalTest, BiochemicalMedicalTestDto, Client, ClientDetails, ClientDto,
    DrugsSupplement, DrugsSupplementDto, LookupDto, LookupType, MedicalHistory,
    MedicalHistoryDto, WeightHistory, WeightHistoryDto,
};
pub use response::{BrokenRule, Response};
pub use services::{ClientService, LookupService};
pub use validation::{RuleViolation, Validate};

use std::sync::{Arc, Mutex};

// =========================================================================
// Error Type
// =========================================================================

#[derive(Debug, thiserror::Error)]
pub enum CalorizerError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Localization error: {0}")]
    LocalizationError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type CalorizerResult<T> = Result<T, CalorizerError>;

impl From<db::DbError> for CalorizerError {
    fn from(e: db::DbError) -> Self {
        CalorizerError::DatabaseError(e.to_string())
    }
}

impl From<i18n::LocalizationError> for CalorizerError {
    fn from(e: i18n::LocalizationError) -> Self {
        CalorizerError::LocalizationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for CalorizerError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        CalorizerError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe handle over the store and the message table.
///
/// The database sits behind a mutex; every operation locks it for the
/// duration of one synchronous closure, so no guard outlives a request step.
#[derive(Clone)]
pub struct Calorizer {
    db: Arc<Mutex<Database>>,
    localizer: Arc<Localizer>,
    acting_user_id: i64,
}

impl Calorizer {
    /// Open the configured database and load the configured message table.
    pub fn open(config: &CoreConfig) -> CalorizerResult<Self> {
        let db = Database::open(config.database_path())?;
        let localizer = match config.localization_path() {
            Some(path) => Localizer::load(path),
            None => Localizer::empty(),
        };
        tracing::info!(
            database = %config.database_path().display(),
            translations = localizer.snapshot().len(),
            "opened calorizer store"
        );

        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            localizer: Arc::new(localizer),
            acting_user_id: config.acting_user_id(),
        })
    }

    /// In-memory store (for testing).
    pub fn open_in_memory(localizer: Localizer) -> CalorizerResult<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            localizer: Arc::new(localizer),
            acting_user_id: config::DEFAULT_ACTING_USER_ID,
        })
    }

    /// Run `f` with a client service for `language`.
    pub fn with_clients<T>(
        &self,
        language: Language,
        f: impl FnOnce(&ClientService<'_>) -> T,
    ) -> CalorizerResult<T> {
        let db = self.db.lock()?;
        let service = ClientService::new(&db, &self.localizer, language);
        Ok(f(&service))
    }

    /// Run `f` with the lookup service.
    pub fn with_lookups<T>(&self, f: impl FnOnce(&LookupService<'_>) -> T) -> CalorizerResult<T> {
        let db = self.db.lock()?;
        Ok(f(&LookupService::new(&db)))
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    /// Re-read the message table from its file.
    pub fn reload_translations(&self) -> CalorizerResult<usize> {
        Ok(self.localizer.reload()?)
    }

    /// Id stamped as `createdBy` while authentication is stubbed.
    pub fn acting_user_id(&self) -> i64 {
        self.acting_user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_handle_round_trip() {
        let core = Calorizer::open_in_memory(Localizer::empty()).unwrap();
        let user = core.acting_user_id();

        let form = ClientDto {
            full_name_en: "Adam Fathy".into(),
            full_name_ar: "آدم فتحي".into(),
            gender_id: 1,
            date_of_birth: NaiveDate::from_ymd_opt(1983, 10, 3),
            weight: Some(95.0),
            height: Some(182.0),
            ..Default::default()
        };

        let created = core
            .with_clients(Language::En, |clients| clients.create_client(&form, user))
            .unwrap();
        let id = created.data.unwrap().id;

        let all = core
            .with_clients(Language::En, |clients| clients.all_clients())
            .unwrap()
            .unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);

        let genders = core
            .with_lookups(|lookups| lookups.lookup_items(LookupType::Gender))
            .unwrap()
            .unwrap();
        assert_eq!(genders.len(), 2);
    }

    #[test]
    fn test_open_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::new(dir.path().join("calorizer.db"), None, 3).unwrap();

        let core = Calorizer::open(&config).unwrap();
        assert_eq!(core.acting_user_id(), 3);
        assert!(core.reload_translations().is_err());
    }
}
