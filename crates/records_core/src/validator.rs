//! Validation traits and report types.
//!
//! This module defines the seam between record types and validator
//! implementations, plus the report produced when a batch of raw records is
//! validated at once.

use crate::{RawRecord, Record, RecordType, ValidationFailure};
use std::time::Instant;

/// Outcome of validating one raw record.
pub type ValidationOutcome = Result<Record, ValidationFailure>;

/// Core trait for validating raw records against a record type.
///
/// Implementations must be pure: the same record type and raw values always
/// produce the same outcome.
///
/// # Example
///
/// ```rust
/// use records_core::{RawRecord, Record, RecordType, RecordValidator, ValidationOutcome};
///
/// struct AcceptEmpty;
///
/// impl RecordValidator for AcceptEmpty {
///     fn validate(&self, record_type: &RecordType, _raw: &RawRecord) -> ValidationOutcome {
///         Ok(Record::from_validated(record_type.name(), Vec::new()))
///     }
/// }
/// ```
pub trait RecordValidator: Send + Sync {
    /// Validates raw field values against a record type.
    ///
    /// # Returns
    ///
    /// The validated record, or a failure listing every field-level violation
    /// (or the single first failing rule).
    fn validate(&self, record_type: &RecordType, raw: &RawRecord) -> ValidationOutcome;

    /// Validates a batch of raw records independently.
    fn validate_batch(&self, record_type: &RecordType, records: &[RawRecord]) -> ValidationReport {
        let start = Instant::now();
        let outcomes: Vec<_> = records
            .iter()
            .map(|raw| self.validate(record_type, raw))
            .collect();
        ValidationReport::from_outcomes(record_type.name(), outcomes, start)
    }
}

/// Report of a batch validation run.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Name of the record type validated against
    pub record_type: String,

    /// Whether every record passed
    pub passed: bool,

    /// One outcome per input record, in input order
    pub outcomes: Vec<ValidationOutcome>,

    /// Validation statistics
    pub stats: ValidationStats,
}

/// Statistics about a batch validation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationStats {
    /// Number of records validated
    pub records_validated: usize,

    /// Number of records that passed
    pub records_passed: usize,

    /// Number of records that failed
    pub records_failed: usize,

    /// Total violations across failed records
    pub violations: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    fn from_outcomes(record_type: &str, outcomes: Vec<ValidationOutcome>, start: Instant) -> Self {
        let records_failed = outcomes.iter().filter(|o| o.is_err()).count();
        let violations = outcomes
            .iter()
            .filter_map(|o| o.as_ref().err())
            .map(ValidationFailure::len)
            .sum();

        Self {
            record_type: record_type.to_string(),
            passed: records_failed == 0,
            stats: ValidationStats {
                records_validated: outcomes.len(),
                records_passed: outcomes.len() - records_failed,
                records_failed,
                violations,
                duration_ms: start.elapsed().as_millis() as u64,
            },
            outcomes,
        }
    }

    /// Iterates over the validated records.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok())
    }

    /// Iterates over `(input index, failure)` pairs.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &ValidationFailure)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, o)| o.as_ref().err().map(|f| (i, f)))
    }
}
