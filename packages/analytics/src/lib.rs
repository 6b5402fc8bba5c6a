#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pure aggregation pipeline from raw case records to dashboard series.
//!
//! Every function in this crate is a pure function over its arguments:
//! no I/O, no shared mutable state, inputs are never mutated. The server
//! calls [`dashboard::dashboard`] once per request and throws the result
//! away after rendering.

pub mod aggregate;
pub mod dashboard;

use thiserror::Error;

/// Errors that can occur while deriving dashboard data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// No record in the series carries the `is_last` flag — the source
    /// data is malformed.
    #[error("No record is flagged as the latest for this location")]
    MissingLastRecord,

    /// The series is too short for the requested derivation.
    #[error("Insufficient data: {message}")]
    InsufficientData {
        /// Description of what was missing.
        message: String,
    },

    /// A ratio's denominator is zero.
    #[error("Division undefined: {message}")]
    DivisionUndefined {
        /// Description of the offending denominator.
        message: String,
    },

    /// A caller-supplied parameter is out of range.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the offending argument.
        message: String,
    },
}
