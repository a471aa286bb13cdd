//! # relay-id
//!
//! Identifier types shared by the relay update-event crates.
//!
//! ## Design Principles
//!
//! - Identifiers are assigned by the backend; clients never mint them for real data
//! - All identifiers have a canonical string representation with strict parsing
//! - Identifiers support roundtrip serialization (parse → format → parse)
//!
//! ## ID Format
//!
//! A push-channel envelope carries a single UUID shared by every event it
//! wraps, in canonical hyphenated form:
//!
//! - `8f0d3c1e-4a7b-11e6-8000-22000b0a5d61`

mod error;
mod types;

pub use error::IdError;
pub use types::*;

/// Re-export uuid for consumers that need raw UUID operations
pub use uuid::Uuid;
