//! Property tests for validation, message resolution and list ordering.

use calorizer_core::db::Database;
use calorizer_core::i18n::{Language, LocalizationEntry, Localizer, Translations};
use calorizer_core::models::{ClientDto, WeightHistoryDto};
use calorizer_core::services::{ClientService, ManualClock};
use calorizer_core::validation::{Validate, MEASUREMENT_MAX, MEASUREMENT_MIN};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

fn base_client() -> ClientDto {
    ClientDto {
        full_name_en: "Tarek Nabil".to_string(),
        full_name_ar: "طارق نبيل".to_string(),
        gender_id: 1,
        date_of_birth: NaiveDate::from_ymd_opt(1975, 12, 1),
        weight: Some(80.0),
        height: Some(170.0),
        ..Default::default()
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

proptest! {
    /// A weight is accepted exactly when it lies inside the inclusive range.
    #[test]
    fn weight_range_matches_bounds(weight in -10.0..1100.0f64) {
        let mut form = base_client();
        form.weight = Some(weight);

        let rules: Vec<_> = form.validate_as_of(today()).into_iter().map(|v| v.rule).collect();
        let in_range = (MEASUREMENT_MIN..=MEASUREMENT_MAX).contains(&weight);
        prop_assert_eq!(rules.is_empty(), in_range);
        if !in_range {
            prop_assert_eq!(rules, vec!["WeightRange"]);
        }
    }

    /// Names are measured in characters, so Arabic text up to 500 letters passes.
    #[test]
    fn arabic_name_length_in_characters(len in 1usize..600) {
        let mut form = base_client();
        form.full_name_ar = "ع".repeat(len);

        let violations = form.validate_as_of(today());
        prop_assert_eq!(violations.is_empty(), len <= 500);
    }

    /// Unknown keys resolve to themselves in both languages, every time.
    #[test]
    fn unknown_keys_resolve_to_themselves(key in "[A-Za-z]{1,24}") {
        let table: Translations = vec![(
            "KnownKey".to_string(),
            LocalizationEntry::new("Known", "معروف"),
        )]
        .into_iter()
        .collect();
        let localizer = Localizer::from_translations(table);
        prop_assume!(!key.eq_ignore_ascii_case("KnownKey"));

        let en = localizer.resolve(&key, Language::En);
        let ar = localizer.resolve(&key, Language::Ar);
        prop_assert_eq!(&en, &key);
        prop_assert_eq!(&ar, &key);
        prop_assert_eq!(localizer.resolve(&key, Language::En), en);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Weight histories come back newest first whatever order they were
    /// stamped in.
    #[test]
    fn weight_histories_newest_first(offsets in proptest::collection::vec(0i64..10_000, 1..12)) {
        let db = Database::open_in_memory().unwrap();
        let localizer = Localizer::empty();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let service = ClientService::new(&db, &localizer, Language::En).with_clock(&clock);

        let client = service.create_client(&base_client(), 1).data.unwrap();
        for offset in &offsets {
            clock.set(start + Duration::minutes(*offset));
            let form = WeightHistoryDto {
                client_id: client.id,
                weight: Some(75.0),
                height: None,
            };
            let added = service.add_weight_history(client.id, &form, 1);
            prop_assert!(added.succeeded);
        }

        let histories = service.weight_histories(client.id).unwrap();
        prop_assert_eq!(histories.len(), offsets.len() + 1);
        for pair in histories.windows(2) {
            prop_assert!(pair[0].created_on >= pair[1].created_on);
            if pair[0].created_on == pair[1].created_on {
                prop_assert!(pair[0].id > pair[1].id);
            }
        }
    }
}
