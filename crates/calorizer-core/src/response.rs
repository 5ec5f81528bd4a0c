//! Uniform result envelope for mutating operations.

use serde::{Deserialize, Serialize};

use crate::i18n::{Language, Localizer};
use crate::validation::RuleViolation;

/// Envelope status codes.
pub mod status {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const BUSINESS_RULE_VIOLATION: u16 = 422;
}

/// Top-level message key of a validation failure.
pub const VALIDATION_ERROR: &str = "ValidationError";

/// A translated field-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenRule {
    pub property_name: String,
    pub message: String,
}

/// Outcome of a mutating operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response<T> {
    pub succeeded: bool,
    pub status_code: u16,
    pub message: String,
    pub broken_rules: Vec<BrokenRule>,
    pub data: Option<T>,
}

impl<T> Response<T> {
    pub fn success(data: T) -> Self {
        Self {
            succeeded: true,
            status_code: status::OK,
            message: String::new(),
            broken_rules: Vec::new(),
            data: Some(data),
        }
    }

    /// 422 with every violation translated into `language`.
    pub fn validation_failure(
        violations: &[RuleViolation],
        localizer: &Localizer,
        language: Language,
    ) -> Self {
        Self {
            succeeded: false,
            status_code: status::BUSINESS_RULE_VIOLATION,
            message: localizer.resolve(VALIDATION_ERROR, language),
            broken_rules: violations
                .iter()
                .map(|v| BrokenRule {
                    property_name: v.field.to_string(),
                    message: localizer.resolve(v.rule, language),
                })
                .collect(),
            data: None,
        }
    }

    /// 400 with a translated error key.
    pub fn failure(key: &str, localizer: &Localizer, language: Language) -> Self {
        Self {
            succeeded: false,
            status_code: status::BAD_REQUEST,
            message: localizer.resolve(key, language),
            broken_rules: Vec::new(),
            data: None,
        }
    }

    /// Transform the payload, keeping the outcome.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            succeeded: self.succeeded,
            status_code: self.status_code,
            message: self.message,
            broken_rules: self.broken_rules,
            data: self.data.map(f),
        }
    }
}
