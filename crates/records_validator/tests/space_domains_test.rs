//! Integration tests for the validation engine.
//!
//! These tests build the space station, alien contact and space mission
//! record types in code and run them through realistic inputs.

use pretty_assertions::assert_eq;
use records_core::{
    EnumSpec, FieldSpec, FieldType, RawRecord, RecordType, Value, ViolationKind,
};
use records_validator::{Validator, rules};
use serde_json::json;

fn raw(value: serde_json::Value) -> RawRecord {
    serde_json::from_value(value).expect("test input must be an object")
}

fn field(name: &str, field_type: FieldType) -> records_core::FieldSpecBuilder {
    FieldSpec::builder(name, field_type)
}

fn space_station() -> RecordType {
    RecordType::builder("SpaceStation")
        .field(field("station_id", FieldType::String).length(3, 10).build().unwrap())
        .field(field("name", FieldType::String).length(1, 50).build().unwrap())
        .field(field("crew_size", FieldType::Integer).range(1.0, 20.0).build().unwrap())
        .field(field("power_level", FieldType::Float).range(0.0, 100.0).build().unwrap())
        .field(field("oxygen_level", FieldType::Float).range(0.0, 100.0).build().unwrap())
        .field(field("last_maintenance", FieldType::Timestamp).build().unwrap())
        .field(field("is_operational", FieldType::Boolean).default(true).build().unwrap())
        .field(
            field("notes", FieldType::String)
                .optional(true)
                .max_length(200)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

fn alien_contact() -> RecordType {
    let contact_type = EnumSpec::new("ContactType", ["radio", "visual", "physical", "telepathic"]);
    RecordType::builder("AlienContact")
        .field(field("contact_id", FieldType::String).length(5, 15).build().unwrap())
        .field(field("timestamp", FieldType::Timestamp).build().unwrap())
        .field(field("location", FieldType::String).length(3, 100).build().unwrap())
        .field(field("contact_type", FieldType::Enum(contact_type)).build().unwrap())
        .field(field("signal_strength", FieldType::Float).range(0.0, 10.0).build().unwrap())
        .field(field("duration_minutes", FieldType::Integer).range(1.0, 1440.0).build().unwrap())
        .field(field("witness_count", FieldType::Integer).range(1.0, 100.0).build().unwrap())
        .field(
            field("message_received", FieldType::String)
                .optional(true)
                .max_length(500)
                .build()
                .unwrap(),
        )
        .field(field("is_verified", FieldType::Boolean).default(false).build().unwrap())
        .rule(rules::starts_with(
            "contact_id_prefix",
            "contact_id",
            "AC",
            "Contact ID must start with \"AC\" (Alien Contact)",
        ))
        .rule(rules::requires_true_when(
            "physical_contact_verified",
            "contact_type",
            "physical",
            "is_verified",
            "Physical contact reports must be verified",
        ))
        .rule(rules::minimum_when(
            "telepathic_witnesses",
            "contact_type",
            "telepathic",
            "witness_count",
            3.0,
            "Telepathic contact requires at least 3 witnesses",
        ))
        .rule(rules::requires_present_above(
            "strong_signal_message",
            "signal_strength",
            7.0,
            "message_received",
            "Strong signals (> 7.0) should include received messages",
        ))
        .build()
        .unwrap()
}

fn crew_member() -> RecordType {
    let rank = EnumSpec::new("Rank", ["cadet", "officer", "lieutenant", "captain", "commander"]);
    RecordType::builder("CrewMember")
        .field(field("member_id", FieldType::String).length(3, 10).build().unwrap())
        .field(field("name", FieldType::String).length(2, 50).build().unwrap())
        .field(field("rank", FieldType::Enum(rank)).build().unwrap())
        .field(field("age", FieldType::Integer).range(18.0, 80.0).build().unwrap())
        .field(field("specialization", FieldType::String).length(3, 30).build().unwrap())
        .field(field("years_experience", FieldType::Integer).range(0.0, 50.0).build().unwrap())
        .field(field("is_active", FieldType::Boolean).default(true).build().unwrap())
        .build()
        .unwrap()
}

fn space_mission() -> RecordType {
    RecordType::builder("SpaceMission")
        .field(field("mission_id", FieldType::String).length(5, 15).build().unwrap())
        .field(field("mission_name", FieldType::String).length(3, 100).build().unwrap())
        .field(field("destination", FieldType::String).length(3, 50).build().unwrap())
        .field(field("launch_date", FieldType::Timestamp).build().unwrap())
        .field(field("duration_days", FieldType::Integer).range(1.0, 3650.0).build().unwrap())
        .field(
            field("crew", FieldType::list_of(FieldType::Record(crew_member())))
                .length(1, 12)
                .build()
                .unwrap(),
        )
        .field(field("mission_status", FieldType::String).default("planned").build().unwrap())
        .field(field("budget_millions", FieldType::Float).range(1.0, 10000.0).build().unwrap())
        .rule(rules::starts_with(
            "mission_id_prefix",
            "mission_id",
            "M",
            "Mission ID must start with \"M\"",
        ))
        .rule(rules::any_member_in(
            "crew_leader",
            "crew",
            "rank",
            ["captain", "commander"],
            "Mission must have at least one Commander or Captain",
        ))
        .rule(rules::min_share_when(
            "experienced_crew",
            "duration_days",
            365.0,
            "crew",
            "years_experience",
            5.0,
            0.5,
            "Not enough experienced crew",
        ))
        .rule(rules::all_members_true(
            "crew_active",
            "crew",
            "is_active",
            "All crew members must be active",
        ))
        .build()
        .unwrap()
}

fn valid_station() -> serde_json::Value {
    json!({
        "station_id": "ISS001",
        "name": "International Space Station",
        "crew_size": 6,
        "power_level": 85.5,
        "oxygen_level": 92.3,
        "last_maintenance": "2026-02-01T10:30:00",
        "notes": "All systems nominal.",
    })
}

fn valid_contact() -> serde_json::Value {
    json!({
        "contact_id": "AC_2024_001",
        "timestamp": "2026-02-06T12:30:00",
        "location": "Area 51, Nevada",
        "contact_type": "radio",
        "signal_strength": 8.5,
        "duration_minutes": 45,
        "witness_count": 5,
        "message_received": "Greetings from Zeta Reticuli",
        "is_verified": false,
    })
}

fn member(id: &str, rank: &str, years: i64) -> serde_json::Value {
    json!({
        "member_id": id,
        "name": format!("Crew {}", id),
        "rank": rank,
        "age": 30,
        "specialization": "Engineering",
        "years_experience": years,
        "is_active": true,
    })
}

fn mission(duration: i64, crew: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "mission_id": "M2024_MARS",
        "mission_name": "Mars Colony Establishment",
        "destination": "Mars",
        "launch_date": "2026-03-01T09:00:00",
        "duration_days": duration,
        "budget_millions": 2500.0,
        "crew": crew,
    })
}

fn first_message(result: &records_core::ValidationOutcome) -> String {
    result
        .as_ref()
        .err()
        .and_then(|failure| failure.first())
        .map(|violation| violation.message.clone())
        .unwrap_or_default()
}

#[test]
fn test_valid_station() {
    let record = Validator::new()
        .validate(&space_station(), &raw(valid_station()))
        .unwrap();

    assert_eq!(record.get_str("station_id"), Some("ISS001"));
    assert_eq!(record.get_i64("crew_size"), Some(6));
    assert_eq!(record.get_f64("power_level"), Some(85.5));
    assert_eq!(record.get_f64("oxygen_level"), Some(92.3));
    assert_eq!(record.get_bool("is_operational"), Some(true));
    assert_eq!(record.get_str("notes"), Some("All systems nominal."));
}

#[test]
fn test_station_crew_size_out_of_range() {
    let mut input = valid_station();
    input["station_id"] = json!("BAD01");
    input["crew_size"] = json!(30);

    let failure = Validator::new()
        .validate(&space_station(), &raw(input))
        .unwrap_err();

    assert_eq!(failure.len(), 1);
    let violation = &failure.violations()[0];
    assert_eq!(violation.kind, ViolationKind::ConstraintViolation);
    assert_eq!(violation.field, "crew_size");
    assert_eq!(violation.message, "Input should be less than or equal to 20");
}

#[test]
fn test_missing_required_field() {
    let mut input = valid_station();
    input.as_object_mut().unwrap().remove("name");

    let failure = Validator::new()
        .validate(&space_station(), &raw(input))
        .unwrap_err();

    assert_eq!(failure.len(), 1);
    assert_eq!(failure.violations()[0].kind, ViolationKind::MissingField);
    assert_eq!(failure.violations()[0].field, "name");
}

#[test]
fn test_field_violations_accumulate_in_declaration_order() {
    let mut input = valid_station();
    input["oxygen_level"] = json!(120.0);
    input["station_id"] = json!("X");
    input["crew_size"] = json!(0);

    let failure = Validator::new()
        .validate(&space_station(), &raw(input))
        .unwrap_err();

    let fields: Vec<_> = failure.violations().iter().map(|v| v.field.as_str()).collect();
    assert_eq!(fields, vec!["station_id", "crew_size", "oxygen_level"]);
}

#[test]
fn test_valid_contact() {
    let record = Validator::new()
        .validate(&alien_contact(), &raw(valid_contact()))
        .unwrap();

    assert_eq!(record.get_enum("contact_type"), Some("radio"));
    assert_eq!(record.get_bool("is_verified"), Some(false));
}

#[test]
fn test_telepathic_contact_needs_witnesses() {
    let input = json!({
        "contact_id": "AC_2024_002",
        "timestamp": "2026-02-06T13:00:00",
        "location": "Desert Zone",
        "contact_type": "telepathic",
        "signal_strength": 5.0,
        "duration_minutes": 30,
        "witness_count": 1,
        "is_verified": false,
    });

    let result = Validator::new().validate(&alien_contact(), &raw(input));
    let failure = result.as_ref().unwrap_err();

    assert_eq!(failure.len(), 1);
    assert_eq!(failure.violations()[0].kind, ViolationKind::RuleViolation);
    assert_eq!(failure.violations()[0].field, "record");
    assert_eq!(
        first_message(&result),
        "Telepathic contact requires at least 3 witnesses"
    );
}

#[test]
fn test_strong_signal_requires_message() {
    let validator = Validator::new();
    assert!(validator.validate(&alien_contact(), &raw(valid_contact())).is_ok());

    let mut input = valid_contact();
    input.as_object_mut().unwrap().remove("message_received");
    let result = validator.validate(&alien_contact(), &raw(input));

    assert_eq!(
        first_message(&result),
        "Strong signals (> 7.0) should include received messages"
    );
}

#[test]
fn test_only_first_rule_reported() {
    // Breaks both the prefix rule and the physical verification rule.
    let mut input = valid_contact();
    input["contact_id"] = json!("XX_2024_003");
    input["contact_type"] = json!("physical");

    let failure = Validator::new()
        .validate(&alien_contact(), &raw(input))
        .unwrap_err();

    assert_eq!(failure.len(), 1);
    assert_eq!(failure.violations()[0].rule.as_deref(), Some("contact_id_prefix"));
}

#[test]
fn test_invalid_enum_value() {
    let mut input = valid_contact();
    input["contact_type"] = json!("smoke_signal");

    let failure = Validator::new()
        .validate(&alien_contact(), &raw(input))
        .unwrap_err();

    assert_eq!(failure.violations()[0].kind, ViolationKind::TypeMismatch);
    assert_eq!(
        failure.violations()[0].message,
        "Input should be 'radio', 'visual', 'physical' or 'telepathic'"
    );
}

#[test]
fn test_valid_mission() {
    let input = mission(
        900,
        vec![
            member("CM001", "commander", 12),
            member("LT002", "lieutenant", 6),
            member("OF003", "officer", 5),
        ],
    );

    let record = Validator::new().validate(&space_mission(), &raw(input)).unwrap();

    assert_eq!(record.get_str("mission_status"), Some("planned"));
    let crew = record.get_list("crew").unwrap();
    assert_eq!(crew.len(), 3);
    assert_eq!(
        crew[0].as_record().and_then(|m| m.get_enum("rank")),
        Some("commander")
    );
}

#[test]
fn test_mission_without_leader() {
    let input = mission(30, vec![member("CD001", "cadet", 1)]);

    let result = Validator::new().validate(&space_mission(), &raw(input));

    assert_eq!(
        first_message(&result),
        "Mission must have at least one Commander or Captain"
    );
}

#[test]
fn test_long_mission_needs_experienced_crew() {
    let input = mission(
        900,
        vec![
            member("CM001", "commander", 12),
            member("OF002", "officer", 1),
            member("CD003", "cadet", 0),
        ],
    );

    let result = Validator::new().validate(&space_mission(), &raw(input));

    assert_eq!(first_message(&result), "Not enough experienced crew");
}

#[test]
fn test_inactive_crew_rejected() {
    let mut inactive = member("OF002", "officer", 8);
    inactive["is_active"] = json!(false);
    let input = mission(30, vec![member("CM001", "captain", 12), inactive]);

    let result = Validator::new().validate(&space_mission(), &raw(input));

    assert_eq!(first_message(&result), "All crew members must be active");
}

#[test]
fn test_invalid_crew_member_blocks_mission_rules() {
    let mut young = member("CD001", "cadet", 1);
    young["age"] = json!(12);
    // No leader either, but the field error must be the only report.
    let input = mission(30, vec![young]);

    let failure = Validator::new()
        .validate(&space_mission(), &raw(input))
        .unwrap_err();

    assert_eq!(failure.len(), 1);
    assert_eq!(failure.violations()[0].field, "crew[0].age");
    assert_eq!(failure.violations()[0].kind, ViolationKind::ConstraintViolation);
}

#[test]
fn test_empty_crew_rejected_by_length() {
    let failure = Validator::new()
        .validate(&space_mission(), &raw(mission(30, vec![])))
        .unwrap_err();

    assert_eq!(failure.violations()[0].field, "crew");
    assert_eq!(failure.violations()[0].message, "List should have at least 1 item");
}

#[test]
fn test_round_trip_is_idempotent() {
    let validator = Validator::new();
    let cases = [
        (space_station(), valid_station()),
        (alien_contact(), valid_contact()),
        (
            space_mission(),
            mission(
                900,
                vec![
                    member("CM001", "commander", 12),
                    member("LT002", "lieutenant", 6),
                ],
            ),
        ),
    ];

    for (record_type, input) in cases {
        let first = validator.validate(&record_type, &raw(input)).unwrap();
        let second = validator.validate(&record_type, &first.to_raw()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_record_types_are_shareable_across_threads() {
    let record_type = space_station();
    let validator = Validator::new();

    let handles: Vec<_> = (1..=4)
        .map(|crew| {
            let record_type = record_type.clone();
            let validator = validator.clone();
            std::thread::spawn(move || {
                let mut input = valid_station();
                input["crew_size"] = json!(crew);
                validator.validate(&record_type, &raw(input)).map(|r| r.get_i64("crew_size"))
            })
        })
        .collect();

    for (crew, handle) in (1..=4).zip(handles) {
        assert_eq!(handle.join().unwrap(), Ok(Some(crew)));
    }
}

#[test]
fn test_absent_optional_is_null() {
    let mut input = valid_station();
    input.as_object_mut().unwrap().remove("notes");

    let record = Validator::new()
        .validate(&space_station(), &raw(input))
        .unwrap();

    assert_eq!(record.get("notes"), Some(&Value::Null));
}
