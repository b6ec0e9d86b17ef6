//! Builder pattern for creating record types.
//!
//! This module provides fluent builders for field specifications and record
//! types. Unlike plain struct literals, the builders check the schema
//! invariants and return a [`SchemaError`] when they are broken.

use crate::{Constraint, FieldSpec, FieldType, RawValue, RecordType, RuleSpec, SchemaError};
use regex::Regex;
use std::collections::HashSet;

/// Builder for creating a [`RecordType`].
///
/// # Example
///
/// ```rust
/// use records_core::{FieldSpec, FieldType, RecordType};
///
/// let record_type = RecordType::builder("CrewMember")
///     .description("A single crew member")
///     .field(FieldSpec::builder("age", FieldType::Integer).range(18.0, 80.0).build().unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(record_type.name(), "CrewMember");
/// ```
#[derive(Debug, Default)]
pub struct RecordTypeBuilder {
    name: String,
    description: Option<String>,
    fields: Vec<FieldSpec>,
    rules: Vec<RuleSpec>,
}

impl RecordTypeBuilder {
    /// Creates a new record type builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the record type description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a field; fields are validated in the order they are added.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends multiple fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Appends a rule; rules are evaluated in the order they are added.
    pub fn rule(mut self, rule: RuleSpec) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends multiple rules.
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleSpec>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Builds the record type.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, or if two fields or two rules
    /// share a name.
    pub fn build(self) -> Result<RecordType, SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::MissingName);
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    record: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.name()) {
                return Err(SchemaError::DuplicateRule {
                    record: self.name.clone(),
                    rule: rule.name().to_string(),
                });
            }
        }

        Ok(RecordType::from_parts(
            self.name,
            self.description,
            self.fields,
            self.rules,
        ))
    }
}

/// Builder for creating a [`FieldSpec`].
///
/// # Example
///
/// ```rust
/// use records_core::{FieldSpec, FieldType};
///
/// let notes = FieldSpec::builder("notes", FieldType::String)
///     .optional(true)
///     .max_length(200)
///     .build()
///     .unwrap();
///
/// assert!(notes.is_optional());
/// assert_eq!(notes.constraints().len(), 1);
/// ```
#[derive(Debug)]
pub struct FieldSpecBuilder {
    name: String,
    field_type: FieldType,
    optional: bool,
    default: Option<RawValue>,
    description: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    one_of: Option<Vec<String>>,
    patterns: Vec<String>,
    constraints: Vec<Constraint>,
}

impl FieldSpecBuilder {
    /// Creates a new field builder. Fields are required by default.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            optional: false,
            default: None,
            description: None,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            one_of: None,
            patterns: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Sets whether the field may be absent.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Sets the raw value substituted when the field is absent.
    pub fn default(mut self, value: impl Into<RawValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the field description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets inclusive numeric bounds.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Sets an inclusive numeric lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets an inclusive numeric upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets inclusive length bounds (characters for strings, items for lists).
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Restricts the value to a set of allowed values.
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_of = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Requires the value to match a regex; compiled on `build`.
    pub fn pattern(mut self, regex: impl Into<String>) -> Self {
        self.patterns.push(regex.into());
        self
    }

    /// Adds an already constructed constraint.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Builds the field specification.
    ///
    /// Constraints are checked in this order: range, length, membership,
    /// patterns, then any added through [`constraint`](Self::constraint).
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, a range is inverted, a pattern
    /// does not compile, an enum has no values, or a constraint does not fit
    /// the declared type.
    pub fn build(self) -> Result<FieldSpec, SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::MissingName);
        }
        check_enums(&self.name, &self.field_type)?;

        let mut constraints = Vec::new();
        if self.min.is_some() || self.max.is_some() {
            constraints.push(Constraint::Range {
                min: self.min,
                max: self.max,
            });
        }
        if self.min_length.is_some() || self.max_length.is_some() {
            constraints.push(Constraint::Length {
                min: self.min_length,
                max: self.max_length,
            });
        }
        if let Some(values) = self.one_of {
            constraints.push(Constraint::OneOf { values });
        }
        for pattern in self.patterns {
            let regex = Regex::new(&pattern).map_err(|e| SchemaError::InvalidPattern {
                field: self.name.clone(),
                pattern: pattern.clone(),
                error: e.to_string(),
            })?;
            constraints.push(Constraint::Pattern { regex });
        }
        constraints.extend(self.constraints);

        for constraint in &constraints {
            check_constraint(&self.name, &self.field_type, constraint)?;
        }

        Ok(FieldSpec {
            name: self.name,
            field_type: self.field_type,
            constraints,
            optional: self.optional,
            default: self.default,
            description: self.description,
        })
    }
}

fn check_enums(field: &str, field_type: &FieldType) -> Result<(), SchemaError> {
    match field_type {
        FieldType::Enum(spec) if spec.values().is_empty() => Err(SchemaError::EmptyEnum {
            field: field.to_string(),
            name: spec.name().to_string(),
        }),
        FieldType::List(item) => check_enums(field, item),
        _ => Ok(()),
    }
}

fn check_constraint(
    field: &str,
    field_type: &FieldType,
    constraint: &Constraint,
) -> Result<(), SchemaError> {
    if !constraint.applies_to(field_type) {
        return Err(SchemaError::InapplicableConstraint {
            field: field.to_string(),
            constraint: constraint.kind().to_string(),
            field_type: field_type.describe(),
        });
    }

    match constraint {
        Constraint::Range {
            min: Some(min),
            max: Some(max),
        } if min > max => Err(SchemaError::InvalidRange {
            field: field.to_string(),
            min: *min,
            max: *max,
        }),
        Constraint::Length {
            min: Some(min),
            max: Some(max),
        } if min > max => Err(SchemaError::InvalidRange {
            field: field.to_string(),
            min: *min as f64,
            max: *max as f64,
        }),
        _ => Ok(()),
    }
}
