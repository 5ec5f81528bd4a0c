//! Rule sets per form type.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use super::{FieldRules, RuleViolation, Validate};
use crate::models::{
    BiochemicalMedicalTestDto, ClientDto, DrugsSupplementDto, MedicalHistoryDto, WeightHistoryDto,
};

const NAME_MAX: usize = 500;
const MOBILE_MAX: usize = 20;
const ADDRESS_MAX: usize = 2000;
const NOTE_MAX: usize = 4000;
const DRUG_MAX: usize = 500;

fn mobile_pattern() -> &'static Regex {
    static MOBILE: OnceLock<Regex> = OnceLock::new();
    MOBILE.get_or_init(|| Regex::new(r"^\+?[0-9\s\-()]*$").expect("mobile pattern compiles"))
}

impl Validate for ClientDto {
    fn validate_as_of(&self, today: NaiveDate) -> Vec<RuleViolation> {
        let mut rules = FieldRules::new();

        rules
            .required_text(
                "fullNameEn",
                &self.full_name_en,
                NAME_MAX,
                "FullNameEnRequired",
                "FullNameEnMaxLength",
            )
            .required_text(
                "fullNameAr",
                &self.full_name_ar,
                NAME_MAX,
                "FullNameArRequired",
                "FullNameArMaxLength",
            );

        if let Some(mobile) = self.mobile_number.as_deref().filter(|m| !m.is_empty()) {
            rules
                .optional_text("mobileNumber", Some(mobile), MOBILE_MAX, "MobileNumberMaxLength")
                .check(
                    "mobileNumber",
                    "MobileNumberInvalid",
                    mobile_pattern().is_match(mobile),
                );
        }

        rules
            .check("genderId", "GenderRequired", self.gender_id > 0)
            .optional_text(
                "address",
                self.address.as_deref(),
                ADDRESS_MAX,
                "AddressMaxLength",
            );

        match self.date_of_birth {
            Some(born) => rules.check("dateOfBirth", "DateOfBirthMustBeInPast", born < today),
            None => rules.check("dateOfBirth", "DateOfBirthRequired", false),
        };

        rules
            .required_measurement("weight", self.weight, "WeightRequired", "WeightRange")
            .required_measurement("height", self.height, "HeightRequired", "HeightRange")
            .finish()
    }
}

impl Validate for WeightHistoryDto {
    fn validate_as_of(&self, _today: NaiveDate) -> Vec<RuleViolation> {
        FieldRules::new()
            .optional_measurement("weight", self.weight, "WeightRange")
            .optional_measurement("height", self.height, "HeightRange")
            .finish()
    }
}

impl Validate for BiochemicalMedicalTestDto {
    fn validate_as_of(&self, _today: NaiveDate) -> Vec<RuleViolation> {
        FieldRules::new()
            .required_text(
                "medicalData",
                &self.medical_data,
                NOTE_MAX,
                "MedicalDataRequired",
                "MedicalDataMaxLength",
            )
            .finish()
    }
}

impl Validate for DrugsSupplementDto {
    fn validate_as_of(&self, _today: NaiveDate) -> Vec<RuleViolation> {
        FieldRules::new()
            .required_text("drug", &self.drug, DRUG_MAX, "DrugRequired", "DrugMaxLength")
            .finish()
    }
}

impl Validate for MedicalHistoryDto {
    fn validate_as_of(&self, _today: NaiveDate) -> Vec<RuleViolation> {
        FieldRules::new()
            .required_text(
                "medicalNote",
                &self.medical_note,
                NOTE_MAX,
                "MedicalNoteRequired",
                "MedicalNoteMaxLength",
            )
            .finish()
    }
}
