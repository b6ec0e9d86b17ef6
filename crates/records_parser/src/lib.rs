//! Parser for record schema documents and raw data documents.
//!
//! Schema documents (YAML, TOML or JSON) describe a record type: its fields,
//! their types and constraints, and the cross-field rules. They deserialize
//! into a [`RecordDefinition`] and are compiled into an immutable
//! [`RecordType`].
//!
//! # Example
//!
//! ```rust
//! use records_parser::parse_yaml;
//!
//! let yaml = r#"
//! name: SpaceStation
//! fields:
//!   - name: station_id
//!     type: string
//!     constraints:
//!       - type: length
//!         min: 3
//!         max: 10
//!   - name: crew_size
//!     type: integer
//!     constraints:
//!       - type: range
//!         min: 1
//!         max: 20
//! rules:
//!   - name: station_prefix
//!     message: Station ID must start with "ISS"
//!     check:
//!       type: starts_with
//!       field: station_id
//!       prefix: ISS
//! "#;
//!
//! let station = parse_yaml(yaml).expect("Failed to parse schema");
//! assert_eq!(station.name(), "SpaceStation");
//! assert_eq!(station.rules().len(), 1);
//! ```

mod data;
mod definition;

pub use data::{parse_records, parse_records_file};
pub use definition::{
    CheckDefinition, ConstraintDefinition, EnumDefinition, FieldDefinition, RecordDefinition,
    RuleDefinition, TypeDefinition,
};

use records_core::{RecordType, SchemaError};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while parsing schema or data documents.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// The document parsed but does not describe a valid record type
    #[error("Invalid schema: {0}")]
    InvalidSchema(#[from] SchemaError),

    /// A data document does not hold records
    #[error("Invalid data document: {0}")]
    InvalidData(String),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Parse a record definition from a YAML string without compiling it.
///
/// Structured field types are written as single-key maps
/// (`type: { enum: { ... } }`), so enums are read in singleton map form.
pub fn parse_definition_yaml(content: &str) -> Result<RecordDefinition> {
    let deserializer = serde_yaml_ng::Deserializer::from_str(content);
    Ok(serde_yaml_ng::with::singleton_map_recursive::deserialize(
        deserializer,
    )?)
}

/// Parse a record definition from a TOML string without compiling it.
///
/// Native TOML datetimes (in defaults) are read as their string form.
pub fn parse_definition_toml(content: &str) -> Result<RecordDefinition> {
    let table: toml::Table =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    datetimes_as_strings(toml::Value::Table(table))
        .try_into()
        .map_err(|e: toml::de::Error| ParserError::TomlError(e.to_string()))
}

fn datetimes_as_strings(value: toml::Value) -> toml::Value {
    match value {
        toml::Value::Datetime(datetime) => toml::Value::String(datetime.to_string()),
        toml::Value::Array(items) => {
            toml::Value::Array(items.into_iter().map(datetimes_as_strings).collect())
        }
        toml::Value::Table(table) => toml::Value::Table(
            table
                .into_iter()
                .map(|(key, value)| (key, datetimes_as_strings(value)))
                .collect(),
        ),
        other => other,
    }
}

/// Parse a record definition from a JSON string without compiling it.
pub fn parse_definition_json(content: &str) -> Result<RecordDefinition> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a record type from a YAML string.
///
/// # Example
///
/// ```rust
/// use records_parser::parse_yaml;
///
/// let yaml = r#"
/// name: Probe
/// fields:
///   - name: launched
///     type: timestamp
///     optional: true
/// "#;
///
/// let probe = parse_yaml(yaml).unwrap();
/// assert!(probe.field("launched").unwrap().is_optional());
/// ```
pub fn parse_yaml(content: &str) -> Result<RecordType> {
    Ok(parse_definition_yaml(content)?.compile()?)
}

/// Parse a record type from a TOML string.
///
/// # Example
///
/// ```rust
/// use records_parser::parse_toml;
///
/// let toml = r#"
/// name = "Probe"
///
/// [[fields]]
/// name = "probe_id"
/// type = "string"
/// "#;
///
/// let probe = parse_toml(toml).unwrap();
/// assert_eq!(probe.fields().len(), 1);
/// ```
pub fn parse_toml(content: &str) -> Result<RecordType> {
    Ok(parse_definition_toml(content)?.compile()?)
}

/// Parse a record type from a JSON string.
pub fn parse_json(content: &str) -> Result<RecordType> {
    Ok(parse_definition_json(content)?.compile()?)
}

/// Parse a record type from a string in the given format.
pub fn parse_str(content: &str, format: SchemaFormat) -> Result<RecordType> {
    match format {
        SchemaFormat::Yaml => parse_yaml(content),
        SchemaFormat::Toml => parse_toml(content),
        SchemaFormat::Json => parse_json(content),
    }
}

/// Detect the document format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `SchemaFormat::Yaml`
/// * `.toml` → `SchemaFormat::Toml`
/// * `.json` → `SchemaFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<SchemaFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(SchemaFormat::Yaml),
        "toml" => Ok(SchemaFormat::Toml),
        "json" => Ok(SchemaFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a record type from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use records_parser::parse_file;
/// use std::path::Path;
///
/// let station = parse_file(Path::new("schemas/space_station.yml")).unwrap();
/// println!("Loaded record type: {}", station.name());
/// ```
pub fn parse_file(path: &Path) -> Result<RecordType> {
    let content = std::fs::read_to_string(path)?;
    let format = detect_format(path)?;
    let record_type = parse_str(&content, format)?;
    tracing::debug!(
        "Parsed record type '{}' with {} field(s) and {} rule(s) from {}",
        record_type.name(),
        record_type.fields().len(),
        record_type.rules().len(),
        path.display()
    );
    Ok(record_type)
}
