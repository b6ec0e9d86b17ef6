//! Main validation engine.
//!
//! This module provides the [`Validator`] that runs the field phase and the
//! rule phase over raw values and assembles validated records.

use crate::constraints::check_constraints;
use crate::{IsoTimestampConverter, TimestampConverter};
use records_core::{
    FieldSpec, RawRecord, RawValue, Record, RecordType, RecordValidator, ValidationFailure,
    ValidationOutcome, Value, Violation,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Options for a [`Validator`].
#[derive(Clone)]
pub struct ValidationOptions {
    timestamp_converter: Arc<dyn TimestampConverter>,
}

impl ValidationOptions {
    /// Creates options with the default ISO timestamp converter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the converter used for timestamp fields.
    pub fn with_timestamp_converter(mut self, converter: impl TimestampConverter + 'static) -> Self {
        self.timestamp_converter = Arc::new(converter);
        self
    }

    /// The converter used for timestamp fields.
    pub fn timestamp_converter(&self) -> &dyn TimestampConverter {
        self.timestamp_converter.as_ref()
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            timestamp_converter: Arc::new(IsoTimestampConverter),
        }
    }
}

impl fmt::Debug for ValidationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationOptions").finish_non_exhaustive()
    }
}

/// Validation engine for record types.
///
/// # Example
///
/// ```rust
/// use records_core::{FieldSpec, FieldType, RawRecord, RawValue, RecordType};
/// use records_validator::Validator;
///
/// let station = RecordType::builder("SpaceStation")
///     .field(FieldSpec::builder("crew_size", FieldType::Integer).range(1.0, 20.0).build().unwrap())
///     .field(FieldSpec::builder("is_operational", FieldType::Boolean).default(true).build().unwrap())
///     .build()
///     .unwrap();
///
/// let mut raw = RawRecord::new();
/// raw.insert("crew_size".to_string(), RawValue::Int(6));
///
/// let record = Validator::new().validate(&station, &raw).unwrap();
/// assert_eq!(record.get_i64("crew_size"), Some(6));
/// assert_eq!(record.get_bool("is_operational"), Some(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    /// Creates a validator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with the given options.
    pub fn with_options(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validates raw values against a record type.
    ///
    /// Field-level violations of all fields are collected; if there are any,
    /// they are returned and no rule is evaluated. Otherwise rules run in
    /// order and the first failing rule is the only violation returned.
    pub fn validate(&self, record_type: &RecordType, raw: &RawRecord) -> ValidationOutcome {
        let fields = match self.validate_fields(record_type, raw) {
            Ok(fields) => fields,
            Err(violations) => {
                debug!(
                    "Record '{}' failed field validation with {} violation(s)",
                    record_type.name(),
                    violations.len()
                );
                return Err(ValidationFailure::new(record_type.name(), violations));
            }
        };

        let record = Record::from_validated(record_type.name(), fields);

        if let Err(violation) = self.apply_rules(record_type, &record) {
            debug!(
                "Record '{}' failed rule '{}'",
                record_type.name(),
                violation.rule.as_deref().unwrap_or_default()
            );
            return Err(ValidationFailure::new(record_type.name(), vec![violation]));
        }

        debug!("Record '{}' passed validation", record_type.name());
        Ok(record)
    }

    /// Runs the field phase over every declared field.
    fn validate_fields(
        &self,
        record_type: &RecordType,
        raw: &RawRecord,
    ) -> Result<Vec<(String, Value)>, Vec<Violation>> {
        let mut violations = Vec::new();
        let mut fields = Vec::with_capacity(record_type.fields().len());

        for spec in record_type.fields() {
            if let Some(value) = self.validate_field(spec, raw, &mut violations) {
                fields.push((spec.name().to_string(), value));
            }
        }

        if violations.is_empty() {
            Ok(fields)
        } else {
            Err(violations)
        }
    }

    /// Looks up, defaults, coerces and constrains a single field.
    fn validate_field(
        &self,
        spec: &FieldSpec,
        raw: &RawRecord,
        violations: &mut Vec<Violation>,
    ) -> Option<Value> {
        // Null is treated the same as an absent key.
        let supplied = raw.get(spec.name()).filter(|v| !v.is_null());
        let raw_value: &RawValue = match supplied.or_else(|| spec.default().filter(|d| !d.is_null())) {
            Some(value) => value,
            None if spec.is_optional() => {
                trace!("Field '{}' absent, optional", spec.name());
                return Some(Value::Null);
            }
            None => {
                trace!("Field '{}' missing", spec.name());
                violations.push(Violation::missing_field(spec.name()));
                return None;
            }
        };

        let value = self.coerce(spec.name(), spec.field_type(), raw_value, violations)?;

        let failed = check_constraints(spec.name(), spec.constraints(), &value, raw_value);
        if !failed.is_empty() {
            trace!("Field '{}' failed {} constraint(s)", spec.name(), failed.len());
            violations.extend(failed);
            return None;
        }

        Some(value)
    }

    /// Runs the rule phase; stops at the first failing rule.
    fn apply_rules(&self, record_type: &RecordType, record: &Record) -> Result<(), Violation> {
        for rule in record_type.rules() {
            trace!("Evaluating rule '{}'", rule.name());
            if !rule.check(record) {
                return Err(Violation::rule(rule.name(), rule.message()));
            }
        }
        Ok(())
    }
}

impl RecordValidator for Validator {
    fn validate(&self, record_type: &RecordType, raw: &RawRecord) -> ValidationOutcome {
        Validator::validate(self, record_type, raw)
    }
}
