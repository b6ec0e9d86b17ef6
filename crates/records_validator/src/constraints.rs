//! Constraint validation logic.
//!
//! Constraints run against the coerced value of a field:
//! - Range: numeric value within inclusive min/max bounds
//! - Length: string characters or list items within inclusive bounds
//! - OneOf: string or enum value in an allowed set
//! - Pattern: string value matches a regex
//!
//! Every failing constraint of a field is reported.

use records_core::{Constraint, RawValue, Value, Violation};

/// Checks all constraints of a field, returning one violation per failure.
pub(crate) fn check_constraints(
    path: &str,
    constraints: &[Constraint],
    value: &Value,
    raw: &RawValue,
) -> Vec<Violation> {
    constraints
        .iter()
        .filter_map(|constraint| check_constraint(constraint, value))
        .map(|message| Violation::constraint(path, message, raw.clone()))
        .collect()
}

/// Returns the failure message of a single constraint, if it fails.
fn check_constraint(constraint: &Constraint, value: &Value) -> Option<String> {
    match constraint {
        Constraint::Range { min, max } => check_range(value.as_f64()?, *min, *max),
        Constraint::Length { min, max } => {
            let (len, subject, unit) = match value {
                Value::String(s) => (s.chars().count(), "String", "character"),
                Value::List(items) => (items.len(), "List", "item"),
                _ => return None,
            };
            check_length(len, subject, unit, *min, *max)
        }
        Constraint::OneOf { values } => {
            let text = value.as_str()?;
            if values.iter().any(|allowed| allowed == text) {
                None
            } else {
                Some(format!("Input should be one of: {}", values.join(", ")))
            }
        }
        Constraint::Pattern { regex } => {
            let text = value.as_str()?;
            if regex.is_match(text) {
                None
            } else {
                Some(format!("String should match pattern '{}'", regex.as_str()))
            }
        }
    }
}

fn check_range(number: f64, min: Option<f64>, max: Option<f64>) -> Option<String> {
    if let Some(min) = min {
        if number < min {
            return Some(format!("Input should be greater than or equal to {}", min));
        }
    }
    if let Some(max) = max {
        if number > max {
            return Some(format!("Input should be less than or equal to {}", max));
        }
    }
    None
}

fn check_length(
    len: usize,
    subject: &str,
    unit: &str,
    min: Option<usize>,
    max: Option<usize>,
) -> Option<String> {
    let plural = |n: usize| if n == 1 { "" } else { "s" };
    if let Some(min) = min {
        if len < min {
            return Some(format!(
                "{} should have at least {} {}{}",
                subject,
                min,
                unit,
                plural(min)
            ));
        }
    }
    if let Some(max) = max {
        if len > max {
            return Some(format!(
                "{} should have at most {} {}{}",
                subject,
                max,
                unit,
                plural(max)
            ));
        }
    }
    None
}
