//! Field validation for submitted forms.
//!
//! Each form type implements [`Validate`] with a fixed rule set. Rules are
//! evaluated per field and every failing rule is reported, so a caller gets
//! the complete picture in one round trip. A violation carries the field name
//! as it appears on the wire and an untranslated rule key; translation happens
//! when the violation is put into a response envelope.

mod rules;

use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Inclusive bounds for weight and height values.
pub const MEASUREMENT_MIN: f64 = 0.01;
pub const MEASUREMENT_MAX: f64 = 999.99;

/// A single failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RuleViolation {
    /// Wire (camelCase) field name, e.g. `fullNameEn`
    pub field: &'static str,
    /// Rule key, e.g. `FullNameEnRequired`
    pub rule: &'static str,
}

/// A form with a compile-time rule set.
pub trait Validate {
    /// Validate against an explicit "today", used by date rules.
    fn validate_as_of(&self, today: NaiveDate) -> Vec<RuleViolation>;

    /// Validate against the local calendar date.
    fn validate(&self) -> Vec<RuleViolation> {
        self.validate_as_of(Local::now().date_naive())
    }

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Collects violations for one form.
#[derive(Debug, Default)]
pub(crate) struct FieldRules {
    violations: Vec<RuleViolation>,
}

impl FieldRules {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `rule` against `field` unless `ok` holds.
    pub(crate) fn check(&mut self, field: &'static str, rule: &'static str, ok: bool) -> &mut Self {
        if !ok {
            self.violations.push(RuleViolation { field, rule });
        }
        self
    }

    /// Non-blank text no longer than `max` characters.
    pub(crate) fn required_text(
        &mut self,
        field: &'static str,
        value: &str,
        max: usize,
        required_rule: &'static str,
        length_rule: &'static str,
    ) -> &mut Self {
        self.check(field, required_rule, !is_blank(value))
            .check(field, length_rule, char_len(value) <= max)
    }

    /// Optional text; length is checked only when present and non-empty.
    pub(crate) fn optional_text(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        max: usize,
        length_rule: &'static str,
    ) -> &mut Self {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.check(field, length_rule, char_len(v) <= max),
            None => self,
        }
    }

    /// Measurement that must be supplied and in range.
    pub(crate) fn required_measurement(
        &mut self,
        field: &'static str,
        value: Option<f64>,
        required_rule: &'static str,
        range_rule: &'static str,
    ) -> &mut Self {
        match value {
            Some(v) => self.check(field, range_rule, in_measurement_range(v)),
            None => self.check(field, required_rule, false),
        }
    }

    /// Measurement checked only when supplied.
    pub(crate) fn optional_measurement(
        &mut self,
        field: &'static str,
        value: Option<f64>,
        range_rule: &'static str,
    ) -> &mut Self {
        match value {
            Some(v) => self.check(field, range_rule, in_measurement_range(v)),
            None => self,
        }
    }

    pub(crate) fn finish(&mut self) -> Vec<RuleViolation> {
        std::mem::take(&mut self.violations)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn in_measurement_range(value: f64) -> bool {
    (MEASUREMENT_MIN..=MEASUREMENT_MAX).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_collects_only_failing_rules() {
        let violations = FieldRules::new()
            .required_text("drug", "   ", 5, "DrugRequired", "DrugMaxLength")
            .finish();
        assert_eq!(
            violations,
            vec![RuleViolation {
                field: "drug",
                rule: "DrugRequired"
            }]
        );
    }

    #[test]
    fn test_length_counts_characters() {
        // 5 Arabic letters are 10 bytes
        let violations = FieldRules::new()
            .required_text("name", "مرحبا", 5, "Required", "MaxLength")
            .finish();
        assert!(violations.is_empty());

        let violations = FieldRules::new()
            .required_text("name", "مرحباً", 5, "Required", "MaxLength")
            .finish();
        assert_eq!(violations[0].rule, "MaxLength");
    }

    #[test]
    fn test_measurement_bounds_inclusive() {
        assert!(in_measurement_range(0.01));
        assert!(in_measurement_range(999.99));
        assert!(!in_measurement_range(0.0));
        assert!(!in_measurement_range(1000.0));
        assert!(!in_measurement_range(f64::NAN));
    }

    #[test]
    fn test_optional_measurement_skips_missing() {
        let violations = FieldRules::new()
            .optional_measurement("weight", None, "WeightRange")
            .optional_measurement("height", Some(-1.0), "HeightRange")
            .finish();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "height");
    }
}
