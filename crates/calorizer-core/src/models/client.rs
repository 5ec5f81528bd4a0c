//! Client models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    blank_as_none, BiochemicalMedicalTest, DrugsSupplement, LookupDto, MedicalHistory,
    WeightHistory,
};

/// A stored client record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Store-assigned id
    pub id: i64,
    /// Full name in English
    pub full_name_en: String,
    /// Full name in Arabic
    pub full_name_ar: Option<String>,
    /// Mobile number (free-form, digits/spaces/dashes/parentheses)
    pub mobile_number: Option<String>,
    /// Gender lookup id
    pub gender_id: i64,
    /// Postal address
    pub address: Option<String>,
    /// Date of birth
    pub date_of_birth: NaiveDate,
    /// Current weight, mirrors the latest weight history entry
    pub weight: Option<f64>,
    /// Current height, mirrors the latest weight history entry
    pub height: Option<f64>,
}

impl Client {
    /// Build a new (unsaved) client from a submitted form.
    ///
    /// Returns `None` when the form has no date of birth, which validation
    /// already reports as a broken rule.
    pub fn from_dto(dto: &ClientDto) -> Option<Self> {
        let mut client = Self {
            id: 0,
            full_name_en: String::new(),
            full_name_ar: None,
            mobile_number: None,
            gender_id: 0,
            address: None,
            date_of_birth: dto.date_of_birth?,
            weight: None,
            height: None,
        };
        client.apply(dto)?;
        Some(client)
    }

    /// Overwrite the editable fields with a submitted form, keeping `id`.
    pub fn apply(&mut self, dto: &ClientDto) -> Option<()> {
        self.date_of_birth = dto.date_of_birth?;
        self.full_name_en = dto.full_name_en.clone();
        self.full_name_ar = non_blank(Some(dto.full_name_ar.as_str()));
        self.mobile_number = non_blank(dto.mobile_number.as_deref());
        self.gender_id = dto.gender_id;
        self.address = non_blank(dto.address.as_deref());
        self.weight = dto.weight;
        self.height = dto.height;
        Some(())
    }

    /// Check whether the form carries a different weight or height.
    pub fn measurement_differs(&self, dto: &ClientDto) -> bool {
        self.weight != dto.weight || self.height != dto.height
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// Client form as submitted by and returned to callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientDto {
    pub id: i64,
    pub full_name_en: String,
    pub full_name_ar: String,
    pub mobile_number: Option<String>,
    pub gender_id: i64,
    pub address: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(deserialize_with = "blank_as_none")]
    pub weight: Option<f64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub height: Option<f64>,
}

impl From<Client> for ClientDto {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            full_name_en: client.full_name_en,
            full_name_ar: client.full_name_ar.unwrap_or_default(),
            mobile_number: client.mobile_number,
            gender_id: client.gender_id,
            address: client.address,
            date_of_birth: Some(client.date_of_birth),
            weight: client.weight,
            height: client.height,
        }
    }
}

/// A client together with everything the edit screen shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetails {
    pub client: ClientDto,
    pub genders: Vec<LookupDto>,
    pub weight_histories: Vec<WeightHistory>,
    pub biochemical_tests: Vec<BiochemicalMedicalTest>,
    pub drugs_supplements: Vec<DrugsSupplement>,
    pub medical_histories: Vec<MedicalHistory>,
}
