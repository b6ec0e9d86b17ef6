//! # Records Validator
//!
//! Validation engine for record types. Raw values go through two phases:
//!
//! - Field phase: each field in declaration order is looked up (with default
//!   substitution), coerced to its declared type and checked against its
//!   constraints. Every field is checked, and all violations are collected.
//! - Rule phase: only when the field phase is clean, the cross-field rules
//!   run in declaration order against the assembled record. The first
//!   failing rule ends validation.
//!
//! ## Example
//!
//! ```rust
//! use records_core::{FieldSpec, FieldType, RawRecord, RawValue, RecordType};
//! use records_validator::{Validator, rules};
//!
//! let contact = RecordType::builder("AlienContact")
//!     .field(FieldSpec::builder("contact_id", FieldType::String).length(5, 15).build().unwrap())
//!     .rule(rules::starts_with(
//!         "contact_id_prefix",
//!         "contact_id",
//!         "AC",
//!         "Contact ID must start with \"AC\" (Alien Contact)",
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let mut raw = RawRecord::new();
//! raw.insert("contact_id".to_string(), RawValue::from("XX_2024_001"));
//!
//! let failure = Validator::new().validate(&contact, &raw).unwrap_err();
//! assert_eq!(
//!     failure.first().map(|v| v.message.as_str()),
//!     Some("Contact ID must start with \"AC\" (Alien Contact)")
//! );
//! ```

mod coerce;
mod constraints;
mod engine;
mod error;
pub mod rules;
mod timestamp;

pub use engine::*;
pub use error::*;
pub use timestamp::*;
