//! Append-only client sub-records.
//!
//! Each record family has a stored type (with id and creation stamp) and a
//! submitted form (`*Dto`) carrying only what the caller may choose. The
//! owning client, creation time and author are always stamped by the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::blank_as_none;

/// A weight/height measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightHistory {
    pub id: i64,
    pub client_id: i64,
    /// Weight in kg
    pub weight: Option<f64>,
    /// Height in cm
    pub height: Option<f64>,
    pub created_on: DateTime<Utc>,
    pub created_by: i64,
}

/// Free-text biochemical lab results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BiochemicalMedicalTest {
    pub id: i64,
    pub client_id: i64,
    pub medical_data: String,
    pub created_on: DateTime<Utc>,
    pub created_by: i64,
}

/// A drug or supplement the client takes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DrugsSupplement {
    pub id: i64,
    pub client_id: i64,
    pub drug: String,
    pub created_on: DateTime<Utc>,
    pub created_by: i64,
}

/// A medical history note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistory {
    pub id: i64,
    pub client_id: i64,
    pub medical_note: String,
    pub created_on: DateTime<Utc>,
    pub created_by: i64,
}

/// Submitted weight/height measurement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WeightHistoryDto {
    pub client_id: i64,
    #[serde(deserialize_with = "blank_as_none")]
    pub weight: Option<f64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub height: Option<f64>,
}

/// Submitted biochemical test.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BiochemicalMedicalTestDto {
    pub client_id: i64,
    pub medical_data: String,
}

/// Submitted drug/supplement entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DrugsSupplementDto {
    pub client_id: i64,
    pub drug: String,
}

/// Submitted medical history note.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicalHistoryDto {
    pub client_id: i64,
    pub medical_note: String,
}
