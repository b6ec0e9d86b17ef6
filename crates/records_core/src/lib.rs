//! # Records Core
//!
//! Core data structures for the record validation engine.
//!
//! A record type is an ordered table of field specifications plus a list of
//! cross-field rules. Raw input values are checked against it by a
//! [`RecordValidator`] implementation, which either produces an immutable
//! [`Record`] or a [`ValidationFailure`] listing every [`Violation`].
//!
//! ## Key Concepts
//!
//! - **FieldSpec**: declared type, constraints, optionality and default of one field
//! - **RuleSpec**: named predicate over a fully field-valid record, with a fixed message
//! - **RecordType**: named, immutable collection of field specs and rules
//! - **Record**: validated instance, exposing typed values by field name
//! - **Violation**: one reported failure (missing field, type mismatch,
//!   constraint violation or rule violation)
//!
//! ## Example
//!
//! ```rust
//! use records_core::{FieldSpec, FieldType, RecordType, RuleSpec};
//!
//! let station = RecordType::builder("SpaceStation")
//!     .field(
//!         FieldSpec::builder("station_id", FieldType::String)
//!             .length(3, 10)
//!             .build()
//!             .unwrap(),
//!     )
//!     .field(
//!         FieldSpec::builder("crew_size", FieldType::Integer)
//!             .range(1.0, 20.0)
//!             .build()
//!             .unwrap(),
//!     )
//!     .rule(RuleSpec::new(
//!         "station_prefix",
//!         "Station ID must start with \"ISS\"",
//!         |record| record.get_str("station_id").is_some_and(|id| id.starts_with("ISS")),
//!     ))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(station.fields().len(), 2);
//! assert_eq!(station.rules().len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod schema;
pub mod validator;
pub mod value;

pub use builder::*;
pub use error::*;
pub use schema::*;
pub use validator::*;
pub use value::*;
