//! brasil.io `covid19/caso_full` API client.
//!
//! The dataset is served through a paginated envelope
//! (`count`/`next`/`previous`/`results`); the client follows `next`
//! links until the envelope runs dry. Authenticated requests carry a
//! `Authorization: Token …` header.
//!
//! See <https://brasil.io/dataset/covid19/caso_full/>

use async_trait::async_trait;
use covid_dashboard_case_models::{DailyRecord, PlaceType};
use covid_dashboard_source_models::{CaseRow, Page};

use crate::{CaseSource, SourceError, retry};

/// Default API endpoint for the `caso_full` dataset.
pub const DEFAULT_BASE_URL: &str = "https://api.brasil.io/v1/dataset/covid19/caso_full/data/";

/// Rows requested per page.
const PAGE_SIZE: u32 = 10_000;

/// HTTP client for the brasil.io covid19 dataset.
pub struct BrasilIoClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BrasilIoClient {
    /// Creates a client against `base_url`, optionally authenticating
    /// with an API token.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    /// Creates a client from the `BRASIL_IO_URL` and `BRASIL_IO_TOKEN`
    /// environment variables, defaulting to the public endpoint.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BRASIL_IO_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let token = std::env::var("BRASIL_IO_TOKEN").ok();
        Self::new(base_url, token)
    }

    /// Fetches every page matching the query parameters.
    #[allow(clippy::future_not_send)]
    async fn fetch_pages(&self, params: &[(&str, String)]) -> Result<Vec<CaseRow>, SourceError> {
        let mut rows: Vec<CaseRow> = Vec::new();
        let mut next: Option<String> = None;

        loop {
            let build_request = || {
                let builder = next.as_ref().map_or_else(
                    || self.client.get(&self.base_url).query(params),
                    |url| self.client.get(url),
                );
                match &self.token {
                    Some(token) => builder.header(
                        reqwest::header::AUTHORIZATION,
                        format!("Token {token}"),
                    ),
                    None => builder,
                }
            };

            let body = retry::send_json(build_request).await?;
            let page: Page = serde_json::from_value(body)?;
            log::debug!(
                "Fetched {} of {} rows from brasil.io",
                rows.len() + page.results.len(),
                page.count
            );
            rows.extend(page.results);

            match page.next {
                Some(url) => next = Some(url),
                None => break,
            }
        }

        Ok(rows)
    }
}

/// Validates wire rows into canonical records, ordered by date.
fn records_from_rows(rows: Vec<CaseRow>) -> Result<Vec<DailyRecord>, SourceError> {
    let mut records = rows
        .iter()
        .map(CaseRow::to_daily_record)
        .collect::<Result<Vec<_>, _>>()?;
    records.sort_by_key(|record| record.date);
    Ok(records)
}

#[async_trait]
impl CaseSource for BrasilIoClient {
    #[allow(clippy::future_not_send)]
    async fn fetch_place(&self, ibge_code: u32) -> Result<Vec<DailyRecord>, SourceError> {
        let rows = self
            .fetch_pages(&[
                ("city_ibge_code", ibge_code.to_string()),
                ("page_size", PAGE_SIZE.to_string()),
            ])
            .await?;
        records_from_rows(rows)
    }

    #[allow(clippy::future_not_send)]
    async fn fetch_states_bulk(&self) -> Result<Vec<DailyRecord>, SourceError> {
        let rows = self
            .fetch_pages(&[
                ("place_type", PlaceType::State.to_string()),
                ("page_size", PAGE_SIZE.to_string()),
            ])
            .await?;
        records_from_rows(rows)
    }

    #[allow(clippy::future_not_send)]
    async fn fetch_latest_cities(&self) -> Result<Vec<CaseRow>, SourceError> {
        self.fetch_pages(&[
            ("is_last", "True".to_string()),
            ("place_type", PlaceType::City.to_string()),
            ("page_size", PAGE_SIZE.to_string()),
        ])
        .await
    }
}
