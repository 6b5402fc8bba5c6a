#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Case data source trait and the brasil.io client.
//!
//! The dashboard fetches its raw records fresh on every request — there
//! is no cache between requests. [`CaseSource`] is the seam the server
//! depends on; [`brasil_io::BrasilIoClient`] is the production
//! implementation.

pub mod brasil_io;
pub mod retry;

use async_trait::async_trait;
use covid_dashboard_case_models::DailyRecord;
use covid_dashboard_source_models::{CaseRow, RowError};

/// Errors that can occur during data source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with something other than the expected
    /// pagination envelope.
    #[error("Unexpected response: {message}")]
    UnexpectedResponse {
        /// Description of what went wrong.
        message: String,
    },

    /// A wire row failed boundary validation.
    #[error("Invalid row: {0}")]
    BadRow(#[from] RowError),
}

/// A provider of per-day case records.
///
/// Implementations must return series ordered by date ascending.
#[async_trait]
pub trait CaseSource: Send + Sync {
    /// The full time series of one city or state, by IBGE code.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the fetch or boundary validation
    /// fails.
    async fn fetch_place(&self, ibge_code: u32) -> Result<Vec<DailyRecord>, SourceError>;

    /// Every per-state row of the dataset, for nation-wide aggregation.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the fetch or boundary validation
    /// fails.
    async fn fetch_states_bulk(&self) -> Result<Vec<DailyRecord>, SourceError>;

    /// The most recent raw row of every city, for the reference table
    /// updater.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the fetch fails.
    async fn fetch_latest_cities(&self) -> Result<Vec<CaseRow>, SourceError>;
}
