//! Declarative input validation.
//!
//! A [`Schema`] is a list of [`FieldRule`]s addressed by dotted paths into a
//! JSON document. Validation is a pure function over the payload and the
//! schema: every violated constraint yields one [`FieldViolation`], and all
//! violations are collected rather than failing on the first one.
//!
//! Executors validate their input against a schema before any capability
//! is invoked, so malformed payloads never cost a paid or slow call.

pub mod report;
pub mod rules;
pub mod schema;

pub use report::{FieldViolation, ValidationReport};
pub use schema::{FieldRule, FieldType, Schema};

#[cfg(test)]
mod tests;
