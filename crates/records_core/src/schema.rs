//! Record type definitions.
//!
//! This module contains the schema side of the engine: field types,
//! constraints, field specifications, cross-field rules and the record types
//! that group them. All of these are immutable once built and can be shared
//! freely across threads.

use crate::{FieldSpecBuilder, Record, RecordTypeBuilder};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Declared type of a field.
#[derive(Debug, Clone)]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Integer,
    /// 64-bit float
    Float,
    /// Boolean flag
    Boolean,
    /// Date and time, parsed by the validator's timestamp converter
    Timestamp,
    /// Closed set of string values
    Enum(EnumSpec),
    /// List of values of one type
    List(Box<FieldType>),
    /// Nested record, validated with its own fields and rules
    Record(RecordType),
}

impl FieldType {
    /// Creates a list type.
    pub fn list_of(item: FieldType) -> Self {
        FieldType::List(Box::new(item))
    }

    /// Human-readable description of the type (e.g. `list of CrewMember`).
    pub fn describe(&self) -> String {
        match self {
            FieldType::String => "string".to_string(),
            FieldType::Integer => "integer".to_string(),
            FieldType::Float => "float".to_string(),
            FieldType::Boolean => "boolean".to_string(),
            FieldType::Timestamp => "timestamp".to_string(),
            FieldType::Enum(spec) => format!("enum {}", spec.name()),
            FieldType::List(item) => format!("list of {}", item.describe()),
            FieldType::Record(record_type) => record_type.name().to_string(),
        }
    }

    pub(crate) fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Float)
    }

    pub(crate) fn has_length(&self) -> bool {
        matches!(self, FieldType::String | FieldType::List(_))
    }

    pub(crate) fn is_textual(&self) -> bool {
        matches!(self, FieldType::String | FieldType::Enum(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A named, closed set of string values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSpec {
    name: String,
    values: Vec<String>,
}

impl EnumSpec {
    /// Creates a new enum specification.
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Looks a variant up by its value.
    pub fn lookup(&self, value: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.as_str() == value)
            .map(String::as_str)
    }
}

/// Constraint applied to a coerced field value.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Numeric value within inclusive bounds
    Range {
        min: Option<f64>,
        max: Option<f64>,
    },

    /// String (in characters) or list (in items) length within inclusive bounds
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },

    /// String or enum value must be one of the listed values
    OneOf { values: Vec<String> },

    /// String value must match the regex
    Pattern { regex: Regex },
}

impl Constraint {
    /// Short name of the constraint kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::Range { .. } => "range",
            Constraint::Length { .. } => "length",
            Constraint::OneOf { .. } => "one_of",
            Constraint::Pattern { .. } => "pattern",
        }
    }

    pub(crate) fn applies_to(&self, field_type: &FieldType) -> bool {
        match self {
            Constraint::Range { .. } => field_type.is_numeric(),
            Constraint::Length { .. } => field_type.has_length(),
            Constraint::OneOf { .. } => field_type.is_textual(),
            Constraint::Pattern { .. } => matches!(field_type, FieldType::String),
        }
    }
}

/// Specification of a single field of a record type.
///
/// Built through [`FieldSpec::builder`], which enforces that declared ranges
/// are ordered, patterns compile, enums are non-empty and constraints fit the
/// declared type.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub(crate) name: String,
    pub(crate) field_type: FieldType,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) optional: bool,
    pub(crate) default: Option<crate::RawValue>,
    pub(crate) description: Option<String>,
}

impl FieldSpec {
    /// Starts building a field specification.
    pub fn builder(name: impl Into<String>, field_type: FieldType) -> FieldSpecBuilder {
        FieldSpecBuilder::new(name, field_type)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Whether the field may be absent (it then validates to null).
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Raw value substituted when the field is absent.
    pub fn default(&self) -> Option<&crate::RawValue> {
        self.default.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether an absent value is an error.
    pub fn is_required(&self) -> bool {
        !self.optional && self.default.is_none()
    }
}

/// Predicate over a validated record; `true` means the rule passes.
pub type RulePredicate = dyn Fn(&Record) -> bool + Send + Sync;

/// A named cross-field rule with a fixed failure message.
#[derive(Clone)]
pub struct RuleSpec {
    name: String,
    message: String,
    predicate: Arc<RulePredicate>,
}

impl RuleSpec {
    /// Creates a new rule from a predicate.
    pub fn new<F>(name: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            message: message.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Evaluates the rule against a record.
    pub fn check(&self, record: &Record) -> bool {
        (self.predicate)(record)
    }
}

impl fmt::Debug for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSpec")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// An immutable record type: ordered fields plus ordered rules.
///
/// Cloning is cheap; clones share the same definition.
#[derive(Debug, Clone)]
pub struct RecordType {
    inner: Arc<RecordTypeInner>,
}

#[derive(Debug)]
struct RecordTypeInner {
    name: String,
    description: Option<String>,
    fields: Vec<FieldSpec>,
    rules: Vec<RuleSpec>,
}

impl RecordType {
    /// Starts building a record type.
    pub fn builder(name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder::new(name)
    }

    pub(crate) fn from_parts(
        name: String,
        description: Option<String>,
        fields: Vec<FieldSpec>,
        rules: Vec<RuleSpec>,
    ) -> Self {
        Self {
            inner: Arc::new(RecordTypeInner {
                name,
                description,
                fields,
                rules,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn description(&self) -> Option<&str> {
        self.inner.description.as_deref()
    }

    /// Field specifications in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.inner.fields
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[RuleSpec] {
        &self.inner.rules
    }

    /// Looks a field specification up by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.inner.fields.iter().find(|f| f.name == name)
    }
}
