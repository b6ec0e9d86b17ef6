//! Loading raw input records from data documents.
//!
//! A data document holds either a single object (one record) or an array of
//! objects (a batch). Values are kept raw; coercion is the validator's job.

use crate::{detect_format, ParserError, Result, SchemaFormat};
use records_core::{RawRecord, RawValue};
use std::path::Path;

/// Parses raw records from a data document in the given format.
///
/// # Errors
///
/// Returns [`ParserError::InvalidData`] when the document, or an element of
/// a top-level array, is not an object.
pub fn parse_records(content: &str, format: SchemaFormat) -> Result<Vec<RawRecord>> {
    let document: RawValue = match format {
        SchemaFormat::Yaml => serde_yaml_ng::from_str(content)?,
        SchemaFormat::Json => serde_json::from_str(content)?,
        SchemaFormat::Toml => {
            let table: toml::Table =
                toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
            toml_to_raw(toml::Value::Table(table))
        }
    };
    into_records(document)
}

/// Parses raw records from a file with automatic format detection.
pub fn parse_records_file(path: &Path) -> Result<Vec<RawRecord>> {
    let content = std::fs::read_to_string(path)?;
    let format = detect_format(path)?;
    let records = parse_records(&content, format)?;
    tracing::debug!(
        "Loaded {} record(s) from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Native TOML datetimes become their string form, left for the
/// timestamp converter to parse like any other timestamp string.
fn toml_to_raw(value: toml::Value) -> RawValue {
    match value {
        toml::Value::String(s) => RawValue::String(s),
        toml::Value::Integer(i) => RawValue::Int(i),
        toml::Value::Float(f) => RawValue::Float(f),
        toml::Value::Boolean(b) => RawValue::Bool(b),
        toml::Value::Datetime(datetime) => RawValue::String(datetime.to_string()),
        toml::Value::Array(items) => RawValue::List(items.into_iter().map(toml_to_raw).collect()),
        toml::Value::Table(table) => RawValue::Map(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_raw(value)))
                .collect(),
        ),
    }
}

fn into_records(document: RawValue) -> Result<Vec<RawRecord>> {
    match document {
        RawValue::Map(record) => Ok(vec![record]),
        RawValue::List(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                RawValue::Map(record) => Ok(record),
                other => Err(ParserError::InvalidData(format!(
                    "element {} is {}, expected an object",
                    index,
                    other.type_name()
                ))),
            })
            .collect(),
        other => Err(ParserError::InvalidData(format!(
            "document is {}, expected an object or an array of objects",
            other.type_name()
        ))),
    }
}
