use anyhow::{Context, Result};
use records_core::RecordValidator;
use records_parser::{parse_file, parse_records_file};
use records_validator::Validator;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(schema_path: &str, data_path: &str, all: bool, format: &str) -> Result<()> {
    info!("Validating {} against schema {}", data_path, schema_path);

    let record_type = parse_file(Path::new(schema_path))
        .with_context(|| format!("Failed to parse schema file: {}", schema_path))?;

    let records = parse_records_file(Path::new(data_path))
        .with_context(|| format!("Failed to load data file: {}", data_path))?;

    if format != "json" {
        output::print_info(&format!(
            "Schema loaded: {} ({} records to validate)",
            record_type.name(),
            records.len()
        ));
    }

    let report = Validator::new().validate_batch(&record_type, &records);
    info!(
        "Validated {} record(s) in {}ms",
        report.stats.records_validated, report.stats.duration_ms
    );

    output::print_validation_report(&report, format, all)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
