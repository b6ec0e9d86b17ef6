use anyhow::{Context, Result};
use records_core::{FieldSpec, RecordType};
use records_parser::parse_file;
use serde_json::json;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(schema_path: &str, format: &str) -> Result<()> {
    info!("Checking record schema: {}", schema_path);

    // A schema that parses and compiles is valid.
    let path = Path::new(schema_path);
    let record_type = parse_file(path)
        .with_context(|| format!("Failed to parse schema file: {}", schema_path))?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary_json(&record_type))?);
        return Ok(());
    }

    output::print_info(&format!("Schema loaded: {}", record_type.name()));
    output::print_success("Record schema is valid");

    println!("\nSchema Summary:");
    println!("  Name:        {}", record_type.name());
    println!(
        "  Description: {}",
        record_type.description().unwrap_or("N/A")
    );
    println!("  Fields:      {}", record_type.fields().len());
    println!("  Rules:       {}", record_type.rules().len());

    println!("\nFields:");
    for field in record_type.fields() {
        println!("  {}", describe_field(field));
    }

    if !record_type.rules().is_empty() {
        println!("\nRules:");
        for rule in record_type.rules() {
            println!("  {:<28} {}", rule.name(), rule.message());
        }
    }

    Ok(())
}

fn describe_field(field: &FieldSpec) -> String {
    let mut line = format!("{:<20} {}", field.name(), field.field_type().describe());
    if field.is_optional() {
        line.push_str(", optional");
    }
    if let Some(default) = field.default() {
        line.push_str(&format!(", default {}", default));
    }
    let constraints: Vec<&str> = field.constraints().iter().map(|c| c.kind()).collect();
    if !constraints.is_empty() {
        line.push_str(&format!(" [{}]", constraints.join(", ")));
    }
    line
}

fn summary_json(record_type: &RecordType) -> serde_json::Value {
    let fields: Vec<_> = record_type
        .fields()
        .iter()
        .map(|field| {
            json!({
                "name": field.name(),
                "type": field.field_type().describe(),
                "optional": field.is_optional(),
                "default": field.default(),
                "constraints": field.constraints().iter().map(|c| c.kind()).collect::<Vec<_>>(),
            })
        })
        .collect();
    let rules: Vec<_> = record_type
        .rules()
        .iter()
        .map(|rule| json!({ "name": rule.name(), "message": rule.message() }))
        .collect();

    json!({
        "valid": true,
        "name": record_type.name(),
        "description": record_type.description(),
        "fields": fields,
        "rules": rules,
    })
}
