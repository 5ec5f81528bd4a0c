//! Golden tests for client form validation.
//!
//! Each case starts from a valid form, applies one edit, and lists the exact
//! (field, rule) pairs expected back.

use calorizer_core::models::ClientDto;
use calorizer_core::validation::{RuleViolation, Validate};
use chrono::NaiveDate;

/// Test case from golden file.
struct GoldenCase {
    id: &'static str,
    edit: fn(&mut ClientDto),
    expected: &'static [(&'static str, &'static str)],
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
}

fn valid_form() -> ClientDto {
    ClientDto {
        full_name_en: "Heba Mostafa".to_string(),
        full_name_ar: "هبة مصطفى".to_string(),
        mobile_number: Some("(02) 2345-6789".to_string()),
        gender_id: 2,
        address: Some("Smouha, Alexandria".to_string()),
        date_of_birth: NaiveDate::from_ymd_opt(2000, 7, 7),
        weight: Some(58.3),
        height: Some(162.5),
        ..Default::default()
    }
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "valid",
            edit: |_| {},
            expected: &[],
        },
        GoldenCase {
            id: "blank-english-name",
            edit: |f| f.full_name_en = "   ".to_string(),
            expected: &[("fullNameEn", "FullNameEnRequired")],
        },
        GoldenCase {
            id: "long-arabic-name",
            edit: |f| f.full_name_ar = "ن".repeat(501),
            expected: &[("fullNameAr", "FullNameArMaxLength")],
        },
        GoldenCase {
            id: "mobile-letters",
            edit: |f| f.mobile_number = Some("0100-CALL-NOW".to_string()),
            expected: &[("mobileNumber", "MobileNumberInvalid")],
        },
        GoldenCase {
            id: "mobile-plus-in-middle",
            edit: |f| f.mobile_number = Some("010+5550199".to_string()),
            expected: &[("mobileNumber", "MobileNumberInvalid")],
        },
        GoldenCase {
            id: "mobile-too-long",
            edit: |f| f.mobile_number = Some("+20 100 555 0199 0000".to_string()),
            expected: &[("mobileNumber", "MobileNumberMaxLength")],
        },
        GoldenCase {
            id: "mobile-missing",
            edit: |f| f.mobile_number = None,
            expected: &[],
        },
        GoldenCase {
            id: "no-gender",
            edit: |f| f.gender_id = 0,
            expected: &[("genderId", "GenderRequired")],
        },
        GoldenCase {
            id: "negative-gender",
            edit: |f| f.gender_id = -3,
            expected: &[("genderId", "GenderRequired")],
        },
        GoldenCase {
            id: "address-at-limit",
            edit: |f| f.address = Some("a".repeat(2000)),
            expected: &[],
        },
        GoldenCase {
            id: "birth-date-tomorrow",
            edit: |f| f.date_of_birth = NaiveDate::from_ymd_opt(2025, 2, 2),
            expected: &[("dateOfBirth", "DateOfBirthMustBeInPast")],
        },
        GoldenCase {
            id: "birth-date-yesterday",
            edit: |f| f.date_of_birth = NaiveDate::from_ymd_opt(2025, 1, 31),
            expected: &[],
        },
        GoldenCase {
            id: "no-birth-date",
            edit: |f| f.date_of_birth = None,
            expected: &[("dateOfBirth", "DateOfBirthRequired")],
        },
        GoldenCase {
            id: "weight-lower-bound",
            edit: |f| f.weight = Some(0.01),
            expected: &[],
        },
        GoldenCase {
            id: "height-upper-bound",
            edit: |f| f.height = Some(999.99),
            expected: &[],
        },
        GoldenCase {
            id: "no-measurements",
            edit: |f| {
                f.weight = None;
                f.height = None;
            },
            expected: &[("weight", "WeightRequired"), ("height", "HeightRequired")],
        },
        GoldenCase {
            id: "empty-name-and-tall",
            edit: |f| {
                f.full_name_en = String::new();
                f.height = Some(1000.0);
            },
            expected: &[("fullNameEn", "FullNameEnRequired"), ("height", "HeightRange")],
        },
    ]
}

#[test]
fn test_golden_cases() {
    for case in get_golden_cases() {
        let mut form = valid_form();
        (case.edit)(&mut form);

        let expected: Vec<RuleViolation> = case
            .expected
            .iter()
            .map(|&(field, rule)| RuleViolation { field, rule })
            .collect();
        assert_eq!(
            form.validate_as_of(today()),
            expected,
            "golden case {} failed",
            case.id
        );
    }
}
