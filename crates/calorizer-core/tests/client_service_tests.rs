//! Client service integration tests.

use calorizer_core::db::{Database, Predicate};
use calorizer_core::i18n::{Language, Localizer};
use calorizer_core::models::{
    ClientDto, DrugsSupplementDto, MedicalHistoryDto, WeightHistory, WeightHistoryDto,
};
use calorizer_core::services::{ClientService, Clock, ManualClock};
use chrono::{Duration, NaiveDate, TimeZone, Utc};

const ACTING_USER: i64 = 7;

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 9, 10, 8, 30, 0).unwrap())
}

fn make_client(weight: f64, height: f64) -> ClientDto {
    ClientDto {
        full_name_en: "Mariam Khaled".to_string(),
        full_name_ar: "مريم خالد".to_string(),
        mobile_number: Some("+20 122 000 1111".to_string()),
        gender_id: 2,
        address: Some("Heliopolis, Cairo".to_string()),
        date_of_birth: NaiveDate::from_ymd_opt(1987, 3, 22),
        weight: Some(weight),
        height: Some(height),
        ..Default::default()
    }
}

#[test]
fn test_create_client_writes_one_history_row() {
    let db = Database::open_in_memory().unwrap();
    let localizer = Localizer::empty();
    let clock = clock();
    let service = ClientService::new(&db, &localizer, Language::En).with_clock(&clock);

    let created = service.create_client(&make_client(70.0, 175.0), ACTING_USER);
    assert!(created.succeeded);
    assert_eq!(created.status_code, 200);
    let client = created.data.unwrap();

    let histories = service.weight_histories(client.id).unwrap();
    assert_eq!(histories.len(), 1);
    assert_eq!(histories[0].client_id, client.id);
    assert_eq!(histories[0].weight, Some(70.0));
    assert_eq!(histories[0].height, Some(175.0));
    assert_eq!(histories[0].created_by, ACTING_USER);
}

#[test]
fn test_update_address_only_adds_no_history() {
    let db = Database::open_in_memory().unwrap();
    let localizer = Localizer::empty();
    let clock = clock();
    let service = ClientService::new(&db, &localizer, Language::En).with_clock(&clock);

    let mut client = service
        .create_client(&make_client(70.0, 175.0), ACTING_USER)
        .data
        .unwrap();

    client.address = Some("Maadi, Cairo".to_string());
    let updated = service.update_client(&client, ACTING_USER);
    assert!(updated.succeeded);
    assert_eq!(
        updated.data.unwrap().address.as_deref(),
        Some("Maadi, Cairo")
    );

    assert_eq!(service.weight_histories(client.id).unwrap().len(), 1);
}

#[test]
fn test_update_weight_appends_history() {
    let db = Database::open_in_memory().unwrap();
    let localizer = Localizer::empty();
    let clock = clock();
    let service = ClientService::new(&db, &localizer, Language::En).with_clock(&clock);

    let mut client = service
        .create_client(&make_client(70.0, 175.0), ACTING_USER)
        .data
        .unwrap();

    clock.advance(Duration::days(14));
    client.weight = Some(71.0);
    assert!(service.update_client(&client, ACTING_USER).succeeded);

    let histories = service.weight_histories(client.id).unwrap();
    assert_eq!(histories.len(), 2);
    // Newest first
    assert_eq!(histories[0].weight, Some(71.0));
    assert_eq!(histories[0].created_on, clock.now());
    assert_eq!(histories[1].weight, Some(70.0));

    let stored = service.client_by_id(client.id).unwrap().unwrap();
    assert_eq!(stored.weight, Some(71.0));
}

#[test]
fn test_invalid_client_touches_nothing() {
    let db = Database::open_in_memory().unwrap();
    let localizer = Localizer::empty();
    let clock = clock();
    let service = ClientService::new(&db, &localizer, Language::En).with_clock(&clock);

    let mut form = make_client(70.0, 1000.0);
    form.full_name_en = String::new();

    let response = service.create_client(&form, ACTING_USER);
    assert!(!response.succeeded);
    assert_eq!(response.status_code, 422);
    assert_eq!(response.message, "ValidationError");
    let fields: Vec<_> = response
        .broken_rules
        .iter()
        .map(|r| (r.property_name.as_str(), r.message.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![("fullNameEn", "FullNameEnRequired"), ("height", "HeightRange")]
    );

    assert!(service.all_clients().unwrap().is_empty());
    let rows: i64 = db
        .conn()
        .query_row("SELECT COUNT(*) FROM weight_histories", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn test_add_then_find_has_server_stamps() {
    let db = Database::open_in_memory().unwrap();
    let localizer = Localizer::empty();
    let clock = clock();
    let service = ClientService::new(&db, &localizer, Language::En).with_clock(&clock);
    let client = service
        .create_client(&make_client(70.0, 175.0), ACTING_USER)
        .data
        .unwrap();

    clock.advance(Duration::hours(1));
    let response = service.add_weight_history(
        client.id,
        &WeightHistoryDto {
            client_id: client.id,
            weight: Some(69.2),
            height: None,
        },
        ACTING_USER,
    );
    assert!(response.succeeded);

    let found = db
        .repository::<WeightHistory>()
        .find(&Predicate::client_id(client.id))
        .unwrap();
    let added = found.iter().find(|h| h.weight == Some(69.2)).unwrap();
    assert!(added.id > 0);
    assert_eq!(added.created_on, clock.now());
    assert_eq!(added.created_by, ACTING_USER);

    // Only the supplied measurement is copied onto the client
    let stored = service.client_by_id(client.id).unwrap().unwrap();
    assert_eq!(stored.weight, Some(69.2));
    assert_eq!(stored.height, Some(175.0));
}

#[test]
fn test_delete_missing_sub_record_returns_unchanged_list() {
    let db = Database::open_in_memory().unwrap();
    let localizer = Localizer::empty();
    let clock = clock();
    let service = ClientService::new(&db, &localizer, Language::En).with_clock(&clock);
    let client = service
        .create_client(&make_client(70.0, 175.0), ACTING_USER)
        .data
        .unwrap();

    let added = service.add_drugs_supplement(
        client.id,
        &DrugsSupplementDto {
            client_id: client.id,
            drug: "Omega-3".to_string(),
        },
        ACTING_USER,
    );
    let before = added.data.unwrap();

    let response = service.delete_drugs_supplement(9_999, client.id);
    assert!(response.succeeded);
    assert_eq!(response.data.unwrap(), before);
}

#[test]
fn test_delete_sub_record_returns_refreshed_list() {
    let db = Database::open_in_memory().unwrap();
    let localizer = Localizer::empty();
    let clock = clock();
    let service = ClientService::new(&db, &localizer, Language::En).with_clock(&clock);
    let client = service
        .create_client(&make_client(70.0, 175.0), ACTING_USER)
        .data
        .unwrap();

    for note in ["Gastritis", "Iron deficiency"] {
        clock.advance(Duration::minutes(1));
        service.add_medical_history(
            client.id,
            &MedicalHistoryDto {
                client_id: client.id,
                medical_note: note.to_string(),
            },
            ACTING_USER,
        );
    }

    let notes = service.medical_histories(client.id).unwrap();
    assert_eq!(notes[0].medical_note, "Iron deficiency");

    let response = service.delete_medical_history(notes[0].id, client.id);
    let remaining = response.data.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].medical_note, "Gastritis");
}

#[test]
fn test_messages_follow_request_language() {
    let db = Database::open_in_memory().unwrap();
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../localization/translations.json");
    let localizer = Localizer::load(path);
    let clock = clock();
    let service = ClientService::new(&db, &localizer, Language::Ar).with_clock(&clock);

    let mut form = make_client(70.0, 175.0);
    form.gender_id = 0;
    let response = service.create_client(&form, ACTING_USER);

    assert_eq!(response.message, "يرجى تصحيح الحقول المحددة");
    assert_eq!(response.broken_rules[0].property_name, "genderId");
    assert_eq!(response.broken_rules[0].message, "النوع مطلوب");
}
