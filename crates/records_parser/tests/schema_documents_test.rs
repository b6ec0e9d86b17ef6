//! Integration tests that load the bundled schema documents and validate
//! data documents against them.

use pretty_assertions::assert_eq;
use records_core::{RawRecord, RecordType, RecordValidator, ViolationKind};
use records_parser::{SchemaFormat, parse_file, parse_records};
use records_validator::Validator;
use std::path::{Path, PathBuf};

fn schema_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../schemas")
        .join(name)
}

fn load(name: &str) -> RecordType {
    parse_file(&schema_path(name)).expect("bundled schema must parse")
}

fn one(json: &str) -> RawRecord {
    parse_records(json, SchemaFormat::Json)
        .expect("test data must parse")
        .remove(0)
}

#[test]
fn test_bundled_schemas_compile() {
    let station = load("space_station.yml");
    assert_eq!(station.name(), "SpaceStation");
    assert_eq!(station.fields().len(), 8);
    assert!(station.rules().is_empty());

    let contact = load("alien_contact.yml");
    let rule_names: Vec<&str> = contact.rules().iter().map(|r| r.name()).collect();
    assert_eq!(
        rule_names,
        vec![
            "contact_id_prefix",
            "physical_contact_verified",
            "telepathic_witnesses",
            "strong_signal_message"
        ]
    );

    let mission = load("space_mission.yml");
    assert_eq!(mission.rules().len(), 4);
}

#[test]
fn test_toml_and_yaml_station_agree() {
    let yaml = load("space_station.yml");
    let toml = load("space_station.toml");

    let names = |record_type: &RecordType| -> Vec<String> {
        record_type
            .fields()
            .iter()
            .map(|f| f.name().to_string())
            .collect()
    };
    assert_eq!(names(&yaml), names(&toml));

    let input = one(
        r#"{
            "station_id": "ISS001",
            "name": "International Space Station",
            "crew_size": 30,
            "power_level": 85.5,
            "oxygen_level": 92.3,
            "last_maintenance": "2026-02-01T10:30:00"
        }"#,
    );
    let validator = Validator::new();
    let from_yaml = validator.validate(&yaml, &input).unwrap_err();
    let from_toml = validator.validate(&toml, &input).unwrap_err();
    assert_eq!(from_yaml.violations(), from_toml.violations());
    assert_eq!(
        from_yaml.violations()[0].message,
        "Input should be less than or equal to 20"
    );
}

#[test]
fn test_station_defaults_applied() {
    let station = load("space_station.yml");
    let record = Validator::new()
        .validate(
            &station,
            &one(
                r#"{
                    "station_id": "ISS001",
                    "name": "International Space Station",
                    "crew_size": 6,
                    "power_level": 85.5,
                    "oxygen_level": 92.3,
                    "last_maintenance": "2026-02-01T10:30:00"
                }"#,
            ),
        )
        .unwrap();

    assert_eq!(record.get_bool("is_operational"), Some(true));
    assert!(!record.is_present("notes"));
}

#[test]
fn test_contact_rules_from_document() {
    let contact = load("alien_contact.yml");
    let validator = Validator::new();

    let telepathic = one(
        r#"{
            "contact_id": "AC_2024_002",
            "timestamp": "2026-02-06T13:00:00",
            "location": "Desert Zone",
            "contact_type": "telepathic",
            "signal_strength": 5.0,
            "duration_minutes": 30,
            "witness_count": 1
        }"#,
    );
    let failure = validator.validate(&contact, &telepathic).unwrap_err();
    assert_eq!(failure.len(), 1);
    assert_eq!(failure.violations()[0].kind, ViolationKind::RuleViolation);
    assert_eq!(
        failure.violations()[0].message,
        "Telepathic contact requires at least 3 witnesses"
    );

    let physical = one(
        r#"{
            "contact_id": "AC_2024_003",
            "timestamp": "2026-02-06T14:00:00",
            "location": "Roswell",
            "contact_type": "physical",
            "signal_strength": 2.0,
            "duration_minutes": 10,
            "witness_count": 4
        }"#,
    );
    let failure = validator.validate(&contact, &physical).unwrap_err();
    assert_eq!(
        failure.violations()[0].rule.as_deref(),
        Some("physical_contact_verified")
    );
}

#[test]
fn test_mission_batch_from_yaml_data() {
    let mission = load("space_mission.yml");
    let yaml = r#"
- mission_id: M2024_MARS
  mission_name: Mars Colony Establishment
  destination: Mars
  launch_date: "2026-03-01T09:00:00"
  duration_days: 900
  budget_millions: 2500.0
  crew:
    - { member_id: CM001, name: Ada, rank: commander, age: 45, specialization: Command, years_experience: 12 }
    - { member_id: LT002, name: Bo, rank: lieutenant, age: 33, specialization: Piloting, years_experience: 6 }
- mission_id: M2025_LONG
  mission_name: Outer Belt Survey
  destination: Ceres
  launch_date: "2026-09-01T09:00:00"
  duration_days: 900
  budget_millions: 4000.0
  crew:
    - { member_id: CM001, name: Ada, rank: commander, age: 45, specialization: Command, years_experience: 12 }
    - { member_id: OF002, name: Cy, rank: officer, age: 25, specialization: Science, years_experience: 1 }
    - { member_id: CD003, name: Di, rank: cadet, age: 19, specialization: Medicine, years_experience: 0 }
"#;
    let records = parse_records(yaml, SchemaFormat::Yaml).unwrap();

    let report = Validator::new().validate_batch(&mission, &records);

    assert!(!report.passed);
    assert_eq!(report.stats.records_validated, 2);
    assert_eq!(report.stats.records_passed, 1);
    assert_eq!(report.stats.records_failed, 1);

    let passed = report.records().next().unwrap();
    assert_eq!(passed.get_str("mission_status"), Some("planned"));

    let (index, failed) = report.failures().next().unwrap();
    assert_eq!(index, 1);
    assert_eq!(failed.first().unwrap().message, "Not enough experienced crew");
}

#[test]
fn test_nested_violation_paths() {
    let mission = load("space_mission.yml");
    let input = one(
        r#"{
            "mission_id": "M2024_MARS",
            "mission_name": "Mars Colony Establishment",
            "destination": "Mars",
            "launch_date": "2026-03-01T09:00:00",
            "duration_days": 30,
            "budget_millions": 2500.0,
            "crew": [
                {"member_id": "CM001", "name": "Ada", "rank": "captain", "age": 45,
                 "specialization": "Command", "years_experience": 12},
                {"member_id": "CD001", "name": "Bo", "rank": "cadet", "age": 12,
                 "specialization": "Cooking", "years_experience": 1}
            ]
        }"#,
    );

    let failure = Validator::new().validate(&mission, &input).unwrap_err();
    assert_eq!(failure.len(), 1);
    assert_eq!(failure.violations()[0].field, "crew[1].age");
    assert_eq!(
        failure.violations()[0].message,
        "Input should be greater than or equal to 18"
    );
}

#[test]
fn test_toml_data_with_native_datetime() {
    let station = load("space_station.yml");
    let toml = r#"
station_id = "ISS001"
name = "International Space Station"
crew_size = 6
power_level = 85.5
oxygen_level = 92.3
last_maintenance = 2026-02-01T10:30:00
"#;
    let records = parse_records(toml, SchemaFormat::Toml).unwrap();

    let record = Validator::new().validate(&station, &records[0]).unwrap();
    assert_eq!(
        record.to_raw()["last_maintenance"],
        records_core::RawValue::String("2026-02-01T10:30:00".to_string())
    );
}
