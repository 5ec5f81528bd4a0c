//! Core runtime configuration.
//!
//! Resolved once at process startup and passed into [`crate::Calorizer`].
//! Nothing in this crate reads environment variables while serving requests.

use std::path::{Path, PathBuf};

use crate::{CalorizerError, CalorizerResult};

/// Acting user id used while authentication is stubbed.
pub const DEFAULT_ACTING_USER_ID: i64 = 1;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_path: PathBuf,
    localization_path: Option<PathBuf>,
    acting_user_id: i64,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(
        database_path: PathBuf,
        localization_path: Option<PathBuf>,
        acting_user_id: i64,
    ) -> CalorizerResult<Self> {
        if database_path.as_os_str().is_empty() {
            return Err(CalorizerError::InvalidConfig(
                "database path cannot be empty".into(),
            ));
        }
        if acting_user_id <= 0 {
            return Err(CalorizerError::InvalidConfig(format!(
                "acting user id must be positive, got {}",
                acting_user_id
            )));
        }

        Ok(Self {
            database_path,
            localization_path,
            acting_user_id,
        })
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn localization_path(&self) -> Option<&Path> {
        self.localization_path.as_deref()
    }

    pub fn acting_user_id(&self) -> i64 {
        self.acting_user_id
    }
}

/// Parse an acting user id from an optional raw value (e.g. an environment
/// variable), defaulting to [`DEFAULT_ACTING_USER_ID`].
pub fn acting_user_id_from_value(value: Option<&str>) -> CalorizerResult<i64> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(DEFAULT_ACTING_USER_ID),
        Some(raw) => raw.parse().map_err(|_| {
            CalorizerError::InvalidConfig(format!("acting user id is not an integer: {}", raw))
        }),
    }
}
