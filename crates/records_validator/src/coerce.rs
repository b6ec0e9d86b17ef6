//! Coercion of raw values to declared field types.
//!
//! Coercion is lenient in the usual ways: integral floats and numeric strings
//! become integers, integers become floats, and a handful of spellings are
//! accepted for booleans. Anything else is a type mismatch whose message
//! names the expected type.

use crate::Validator;
use records_core::{EnumSpec, FieldType, RawValue, Value, Violation};

impl Validator {
    /// Coerces `raw` to `field_type`, recording violations under `path`.
    ///
    /// Lists coerce every element before reporting, and nested records are
    /// validated in full (including their own rules) so the caller sees every
    /// problem below this field.
    pub(crate) fn coerce(
        &self,
        path: &str,
        field_type: &FieldType,
        raw: &RawValue,
        violations: &mut Vec<Violation>,
    ) -> Option<Value> {
        match field_type {
            FieldType::List(item_type) => {
                let RawValue::List(items) = raw else {
                    violations.push(Violation::type_mismatch(
                        path,
                        "Input should be a valid list",
                        raw.clone(),
                    ));
                    return None;
                };
                let values: Vec<Option<Value>> = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        self.coerce(&format!("{}[{}]", path, i), item_type, item, violations)
                    })
                    .collect();
                values.into_iter().collect::<Option<Vec<_>>>().map(Value::List)
            }
            FieldType::Record(record_type) => {
                let RawValue::Map(map) = raw else {
                    violations.push(Violation::type_mismatch(
                        path,
                        format!(
                            "Input should be a valid dictionary or instance of {}",
                            record_type.name()
                        ),
                        raw.clone(),
                    ));
                    return None;
                };
                match self.validate(record_type, map) {
                    Ok(record) => Some(Value::Record(record)),
                    Err(failure) => {
                        violations.extend(
                            failure
                                .into_violations()
                                .into_iter()
                                .map(|v| v.nested_under(path)),
                        );
                        None
                    }
                }
            }
            FieldType::Timestamp => match raw {
                RawValue::String(s) => match self.options().timestamp_converter().convert(s) {
                    Ok(ts) => Some(Value::Timestamp(ts)),
                    Err(e) => {
                        violations.push(Violation::type_mismatch(
                            path,
                            format!("Input should be a valid datetime, {}", e),
                            raw.clone(),
                        ));
                        None
                    }
                },
                _ => {
                    violations.push(Violation::type_mismatch(
                        path,
                        "Input should be a valid datetime",
                        raw.clone(),
                    ));
                    None
                }
            },
            scalar => match coerce_scalar(scalar, raw) {
                Ok(value) => Some(value),
                Err(message) => {
                    violations.push(Violation::type_mismatch(path, message, raw.clone()));
                    None
                }
            },
        }
    }
}

fn coerce_scalar(field_type: &FieldType, raw: &RawValue) -> Result<Value, String> {
    match field_type {
        FieldType::String => match raw {
            RawValue::String(s) => Ok(Value::String(s.clone())),
            _ => Err("Input should be a valid string".to_string()),
        },
        FieldType::Integer => coerce_integer(raw).map(Value::Integer),
        FieldType::Float => coerce_float(raw).map(Value::Float),
        FieldType::Boolean => coerce_bool(raw)
            .map(Value::Boolean)
            .ok_or_else(|| "Input should be a valid boolean".to_string()),
        FieldType::Enum(spec) => raw
            .as_str()
            .and_then(|s| spec.lookup(s))
            .map(|v| Value::Enum(v.to_string()))
            .ok_or_else(|| enum_message(spec)),
        // Structured types are handled by `Validator::coerce`.
        FieldType::Timestamp | FieldType::List(_) | FieldType::Record(_) => {
            Err(format!("Input should be a valid {}", field_type.describe()))
        }
    }
}

fn coerce_integer(raw: &RawValue) -> Result<i64, String> {
    match raw {
        RawValue::Int(i) => Ok(*i),
        RawValue::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            if *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                Ok(*f as i64)
            } else {
                Err("Input should be a valid integer, value out of range".to_string())
            }
        }
        RawValue::Float(f) if f.is_finite() => {
            Err("Input should be a valid integer, got a number with a fractional part".to_string())
        }
        RawValue::String(s) => s.trim().parse::<i64>().map_err(|_| {
            "Input should be a valid integer, unable to parse string as an integer".to_string()
        }),
        _ => Err("Input should be a valid integer".to_string()),
    }
}

fn coerce_float(raw: &RawValue) -> Result<f64, String> {
    let value = match raw {
        RawValue::Float(f) => *f,
        RawValue::Int(i) => *i as f64,
        RawValue::String(s) => s.trim().parse::<f64>().map_err(|_| {
            "Input should be a valid number, unable to parse string as a number".to_string()
        })?,
        _ => return Err("Input should be a valid number".to_string()),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err("Input should be a finite number".to_string())
    }
}

fn coerce_bool(raw: &RawValue) -> Option<bool> {
    match raw {
        RawValue::Bool(b) => Some(*b),
        RawValue::Int(0) => Some(false),
        RawValue::Int(1) => Some(true),
        RawValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// `Input should be 'a', 'b' or 'c'`
fn enum_message(spec: &EnumSpec) -> String {
    let quoted: Vec<String> = spec.values().iter().map(|v| format!("'{}'", v)).collect();
    let listed = match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        Some((last, _)) => last.clone(),
        None => String::new(),
    };
    format!("Input should be {}", listed)
}
