//! Serializable record type definitions.
//!
//! Record types hold compiled regexes and rule closures, so they are not
//! serializable themselves. Schema documents deserialize into the
//! definitions below, which [`RecordDefinition::compile`] turns into a
//! [`RecordType`].

use records_core::{
    Constraint, EnumSpec, FieldSpec, FieldType, RawValue, RecordType, RuleSpec, SchemaError,
};
use records_validator::rules;
use serde::{Deserialize, Serialize};

/// Definition of a record type: fields plus cross-field rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDefinition {
    /// Record type name
    pub name: String,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Fields, in validation order
    pub fields: Vec<FieldDefinition>,

    /// Rules, in evaluation order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleDefinition>,
}

/// Definition of a single field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub field_type: TypeDefinition,

    /// Whether the field may be absent
    #[serde(default)]
    pub optional: bool,

    /// Raw value substituted when the field is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<RawValue>,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Constraints on the coerced value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<ConstraintDefinition>,
}

/// Declared field type.
///
/// Scalars are written as plain strings (`type: integer`); structured types
/// as single-key maps (`type: { list: { record: { ... } } }`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeDefinition {
    #[serde(alias = "str")]
    String,
    #[serde(alias = "int")]
    Integer,
    #[serde(alias = "number")]
    Float,
    #[serde(alias = "bool")]
    Boolean,
    #[serde(alias = "datetime")]
    Timestamp,
    Enum(EnumDefinition),
    List(Box<TypeDefinition>),
    Record(Box<RecordDefinition>),
}

/// A named set of allowed string values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDefinition {
    pub name: String,
    pub values: Vec<String>,
}

/// Validation constraints that can be applied to a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintDefinition {
    /// Numeric value within inclusive bounds
    Range {
        min: Option<f64>,
        max: Option<f64>,
    },

    /// String or list length within inclusive bounds
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },

    /// Value must be one of the listed values
    OneOf { values: Vec<String> },

    /// String must match the regex
    Pattern { regex: String },
}

/// A named cross-field rule with its failure message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub name: String,
    pub message: String,
    pub check: CheckDefinition,
}

/// The predicate of a rule, one variant per rule constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckDefinition {
    /// `field` starts with `prefix`
    StartsWith { field: String, prefix: String },

    /// When `field` equals `equals`, `requires` must be true
    RequiresTrueWhen {
        field: String,
        equals: String,
        requires: String,
    },

    /// When `field` equals `equals`, `target` must be at least `min`
    MinimumWhen {
        field: String,
        equals: String,
        target: String,
        min: f64,
    },

    /// When `field` is above `above`, `requires` must be present
    RequiresPresentAbove {
        field: String,
        above: f64,
        requires: String,
    },

    /// Some member of `list` has `member` in `values`
    AnyMemberIn {
        list: String,
        member: String,
        values: Vec<String>,
    },

    /// When `field` is above `above`, at least `share` of `list` has
    /// `member` at or above `at_least`
    MinShareWhen {
        field: String,
        above: f64,
        list: String,
        member: String,
        at_least: f64,
        #[serde(default = "default_share")]
        share: f64,
    },

    /// Every member of `list` has `member` set to true
    AllMembersTrue { list: String, member: String },
}

fn default_share() -> f64 {
    0.5
}

impl RecordDefinition {
    /// Compiles the definition into an immutable record type.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found, in field order.
    pub fn compile(&self) -> Result<RecordType, SchemaError> {
        let mut builder = RecordType::builder(&self.name);
        if let Some(description) = &self.description {
            builder = builder.description(description);
        }
        for field in &self.fields {
            builder = builder.field(field.compile()?);
        }
        builder
            .rules(self.rules.iter().map(RuleDefinition::compile))
            .build()
    }
}

impl FieldDefinition {
    /// Compiles the definition into a field specification.
    pub fn compile(&self) -> Result<FieldSpec, SchemaError> {
        let mut builder =
            FieldSpec::builder(&self.name, self.field_type.compile()?).optional(self.optional);
        if let Some(default) = &self.default {
            builder = builder.default(default.clone());
        }
        if let Some(description) = &self.description {
            builder = builder.description(description);
        }
        for constraint in &self.constraints {
            builder = match constraint {
                ConstraintDefinition::Range { min, max } => builder.constraint(Constraint::Range {
                    min: *min,
                    max: *max,
                }),
                ConstraintDefinition::Length { min, max } => {
                    builder.constraint(Constraint::Length {
                        min: *min,
                        max: *max,
                    })
                }
                ConstraintDefinition::OneOf { values } => builder.constraint(Constraint::OneOf {
                    values: values.clone(),
                }),
                ConstraintDefinition::Pattern { regex } => builder.pattern(regex),
            };
        }
        builder.build()
    }
}

impl TypeDefinition {
    /// Compiles the definition into a field type.
    pub fn compile(&self) -> Result<FieldType, SchemaError> {
        Ok(match self {
            TypeDefinition::String => FieldType::String,
            TypeDefinition::Integer => FieldType::Integer,
            TypeDefinition::Float => FieldType::Float,
            TypeDefinition::Boolean => FieldType::Boolean,
            TypeDefinition::Timestamp => FieldType::Timestamp,
            TypeDefinition::Enum(spec) => {
                FieldType::Enum(EnumSpec::new(&spec.name, spec.values.clone()))
            }
            TypeDefinition::List(item) => FieldType::list_of(item.compile()?),
            TypeDefinition::Record(record) => FieldType::Record(record.compile()?),
        })
    }
}

impl RuleDefinition {
    /// Builds the rule through the matching constructor in
    /// [`records_validator::rules`].
    pub fn compile(&self) -> RuleSpec {
        let name = self.name.as_str();
        let message = self.message.as_str();
        match &self.check {
            CheckDefinition::StartsWith { field, prefix } => {
                rules::starts_with(name, field, prefix, message)
            }
            CheckDefinition::RequiresTrueWhen {
                field,
                equals,
                requires,
            } => rules::requires_true_when(name, field, equals, requires, message),
            CheckDefinition::MinimumWhen {
                field,
                equals,
                target,
                min,
            } => rules::minimum_when(name, field, equals, target, *min, message),
            CheckDefinition::RequiresPresentAbove {
                field,
                above,
                requires,
            } => rules::requires_present_above(name, field, *above, requires, message),
            CheckDefinition::AnyMemberIn {
                list,
                member,
                values,
            } => rules::any_member_in(name, list, member, values.iter().cloned(), message),
            CheckDefinition::MinShareWhen {
                field,
                above,
                list,
                member,
                at_least,
                share,
            } => rules::min_share_when(
                name, field, *above, list, member, *at_least, *share, message,
            ),
            CheckDefinition::AllMembersTrue { list, member } => {
                rules::all_members_true(name, list, member, message)
            }
        }
    }
}
