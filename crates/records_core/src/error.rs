//! Error types for record validation.
//!
//! This module defines the errors raised while building record types
//! ([`SchemaError`]) and the violations reported when raw values fail
//! validation ([`Violation`], [`ValidationFailure`]).

use crate::RawValue;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Field name used for violations of record-level rules.
pub const RECORD_SCOPE: &str = "record";

/// Errors raised when a record type definition is malformed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Record type or field defined without a name
    #[error("Record types and fields must have a non-empty name")]
    MissingName,

    /// Two fields share a name within one record type
    #[error("Duplicate field '{field}' in record type '{record}'")]
    DuplicateField {
        /// Record type name
        record: String,
        /// Duplicated field name
        field: String,
    },

    /// Two rules share a name within one record type
    #[error("Duplicate rule '{rule}' in record type '{record}'")]
    DuplicateRule {
        /// Record type name
        record: String,
        /// Duplicated rule name
        rule: String,
    },

    /// Range declared with min greater than max
    #[error("Invalid range for field '{field}': min {min} is greater than max {max}")]
    InvalidRange {
        /// Field name
        field: String,
        /// Declared minimum
        min: f64,
        /// Declared maximum
        max: f64,
    },

    /// Regex pattern failed to compile
    #[error("Invalid regex pattern '{pattern}' for field '{field}': {error}")]
    InvalidPattern {
        /// Field name
        field: String,
        /// Pattern source
        pattern: String,
        /// Compiler error
        error: String,
    },

    /// Enum declared without any variants
    #[error("Enum '{name}' of field '{field}' has no values")]
    EmptyEnum {
        /// Field name
        field: String,
        /// Enum name
        name: String,
    },

    /// Constraint declared on a type it cannot apply to
    #[error("Constraint '{constraint}' cannot apply to field '{field}' of type {field_type}")]
    InapplicableConstraint {
        /// Field name
        field: String,
        /// Constraint kind
        constraint: String,
        /// Declared field type
        field_type: String,
    },
}

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Required field absent and no default
    MissingField,
    /// Raw value cannot be coerced to the declared type
    TypeMismatch,
    /// Coerced value outside its declared bounds, length or membership
    ConstraintViolation,
    /// Cross-field rule failed on an otherwise field-valid record
    RuleViolation,
}

impl ViolationKind {
    /// Returns the snake_case name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::MissingField => "missing_field",
            ViolationKind::TypeMismatch => "type_mismatch",
            ViolationKind::ConstraintViolation => "constraint_violation",
            ViolationKind::RuleViolation => "rule_violation",
        }
    }

    /// Returns true for kinds scoped to a single field.
    pub fn is_field_scoped(&self) -> bool {
        !matches!(self, ViolationKind::RuleViolation)
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported validation failure.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{field}: {message}")]
pub struct Violation {
    /// Failure category
    pub kind: ViolationKind,
    /// Field path (`crew[0].age`), or `record` for record-level rules
    pub field: String,
    /// Human-readable message
    pub message: String,
    /// Offending raw value, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<RawValue>,
    /// Name of the failed rule, for rule violations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

impl Violation {
    /// Creates a new missing field violation.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::MissingField,
            field: field.into(),
            message: "Field required".to_string(),
            value: None,
            rule: None,
        }
    }

    /// Creates a new type mismatch violation.
    pub fn type_mismatch(field: impl Into<String>, message: impl Into<String>, value: RawValue) -> Self {
        Self {
            kind: ViolationKind::TypeMismatch,
            field: field.into(),
            message: message.into(),
            value: Some(value),
            rule: None,
        }
    }

    /// Creates a new constraint violation.
    pub fn constraint(field: impl Into<String>, message: impl Into<String>, value: RawValue) -> Self {
        Self {
            kind: ViolationKind::ConstraintViolation,
            field: field.into(),
            message: message.into(),
            value: Some(value),
            rule: None,
        }
    }

    /// Creates a new rule violation scoped to the whole record.
    pub fn rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::RuleViolation,
            field: RECORD_SCOPE.to_string(),
            message: message.into(),
            value: None,
            rule: Some(rule.into()),
        }
    }

    /// Re-roots this violation under the path of an enclosing field.
    ///
    /// `age` under `crew[0]` becomes `crew[0].age`; a record-scoped rule
    /// violation becomes scoped to `crew[0]` itself. A field that happens to
    /// be named `record` is re-rooted like any other field.
    pub fn nested_under(mut self, path: &str) -> Self {
        let record_scoped =
            self.kind == ViolationKind::RuleViolation && self.field == RECORD_SCOPE;
        self.field = if record_scoped {
            path.to_string()
        } else {
            format!("{}.{}", path, self.field)
        };
        self
    }
}

/// Failed validation of one record: the ordered list of violations.
///
/// Field-scoped violations appear in field declaration order. A failure
/// caused by a record-level rule holds exactly one violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationFailure {
    record_type: String,
    violations: Vec<Violation>,
}

impl ValidationFailure {
    /// Creates a new failure for a record type.
    pub fn new(record_type: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            record_type: record_type.into(),
            violations,
        }
    }

    /// Name of the record type that failed validation.
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// All violations, in reporting order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The first violation in reporting order.
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Consumes the failure, returning its violations.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.violations.len();
        write!(
            f,
            "{} validation error{} for {}",
            count,
            if count == 1 { "" } else { "s" },
            self.record_type
        )?;
        for violation in &self.violations {
            write!(f, "\n{}\n  {} [type={}", violation.field, violation.message, violation.kind)?;
            if let Some(value) = &violation.value {
                write!(f, ", input_value={}", value)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}
