#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! IBGE reference table loading and dashboard scope resolution.
//!
//! Loads the static city reference table from a local CSV once at
//! startup and answers every geographic question the dashboard has:
//! which scope a selection resolves to, what its display label is, and
//! what the dependent dropdowns should offer. The table is immutable for
//! the process lifetime — there is no writer after initialization.

pub mod table;

pub use table::{GeoTable, state_options};

use thiserror::Error;

/// Errors that can occur during reference table operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Reading the reference file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The reference file is not valid CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A reference row carries data that cannot be used.
    #[error("Malformed reference row: {message}")]
    Malformed {
        /// Description of what went wrong.
        message: String,
    },

    /// A lookup was made for a code absent from the reference table.
    #[error("Unknown location code: {code}")]
    UnknownLocationCode {
        /// The code that failed to resolve.
        code: u32,
    },
}
