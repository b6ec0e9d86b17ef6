//! Timestamp conversion.
//!
//! Date/time parsing is not part of validation proper: the validator hands
//! timestamp strings to a [`TimestampConverter`]. [`IsoTimestampConverter`]
//! is the default; any `Fn(&str) -> Result<NaiveDateTime, ConversionError>`
//! closure can be injected instead.

use crate::ConversionError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Converts raw timestamp strings into date-times.
pub trait TimestampConverter: Send + Sync {
    /// Parses a raw timestamp string.
    fn convert(&self, raw: &str) -> Result<NaiveDateTime, ConversionError>;
}

impl<F> TimestampConverter for F
where
    F: Fn(&str) -> Result<NaiveDateTime, ConversionError> + Send + Sync,
{
    fn convert(&self, raw: &str) -> Result<NaiveDateTime, ConversionError> {
        self(raw)
    }
}

/// Default converter accepting ISO 8601 style inputs.
///
/// Accepted, in order:
/// - RFC 3339 with offset (`2026-02-01T10:30:00Z`), normalized to UTC
/// - naive date-time with `T` or space separator, optional fractional seconds
/// - plain date (`2026-02-01`), at midnight
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoTimestampConverter;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

impl TimestampConverter for IsoTimestampConverter {
    fn convert(&self, raw: &str) -> Result<NaiveDateTime, ConversionError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConversionError::Empty);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.naive_utc());
        }

        for format in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(dt);
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| ConversionError::OutOfRange(raw.to_string()));
        }

        Err(ConversionError::invalid_format(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_naive_iso() {
        let dt = IsoTimestampConverter.convert("2026-02-01T10:30:00").unwrap();
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_rfc3339_normalized_to_utc() {
        let dt = IsoTimestampConverter
            .convert("2026-02-01T12:30:00+02:00")
            .unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_space_separator_and_fraction() {
        let dt = IsoTimestampConverter
            .convert("2026-02-01 10:30:00.250")
            .unwrap();
        assert_eq!(dt.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_plain_date() {
        let dt = IsoTimestampConverter.convert("2026-03-01").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            IsoTimestampConverter.convert("yesterday"),
            Err(ConversionError::invalid_format("yesterday"))
        );
        assert_eq!(IsoTimestampConverter.convert("  "), Err(ConversionError::Empty));
    }

    #[test]
    fn test_closure_converter() {
        let fixed = |_: &str| -> Result<NaiveDateTime, ConversionError> {
            IsoTimestampConverter.convert("2000-01-01T00:00:00")
        };
        let dt = fixed.convert("anything").unwrap();
        assert_eq!(dt.to_string(), "2000-01-01 00:00:00");
    }
}
