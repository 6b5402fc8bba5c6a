#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Wire types for the brasil.io `covid19/caso_full` dataset.
//!
//! [`CaseRow`] mirrors the API's rows field-for-field, nullable where
//! the API is nullable. The only way out of this crate is the validated
//! conversion into [`DailyRecord`] — downstream code never touches raw
//! wire fields.

use chrono::NaiveDate;
use covid_dashboard_case_models::{DailyRecord, EpiWeek, PlaceType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One page of the API's pagination envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Total rows matching the query, across all pages.
    pub count: u64,
    /// URL of the next page, if any.
    pub next: Option<String>,
    /// URL of the previous page, if any.
    pub previous: Option<String>,
    /// Rows of this page.
    pub results: Vec<CaseRow>,
}

/// One raw row of `covid19/caso_full`, exactly as the API sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRow {
    /// Municipality name. `None` for state rows and for the dataset's
    /// "Importados/Indefinidos" tranche.
    pub city: Option<String>,
    /// IBGE code of the place: seven digits for cities, two for states.
    /// `None` for the "Importados/Indefinidos" tranche.
    pub city_ibge_code: Option<u32>,
    /// Reporting date.
    pub date: NaiveDate,
    /// Epidemiological week as a `YYYYWW` code.
    pub epidemiological_week: u32,
    /// Current population estimate.
    pub estimated_population: Option<i64>,
    /// 2019 population estimate, kept by the dataset for continuity.
    pub estimated_population_2019: Option<i64>,
    /// Whether this is the most recent row for the place.
    pub is_last: bool,
    /// Whether the row repeats the previous day's report verbatim.
    #[serde(default)]
    pub is_repeated: bool,
    /// Cumulative confirmed cases.
    pub last_available_confirmed: i64,
    /// Cumulative deaths.
    pub last_available_deaths: i64,
    /// Confirmed cases newly reported on this date. May be negative.
    pub new_confirmed: i64,
    /// Deaths newly reported on this date. May be negative.
    pub new_deaths: i64,
    /// Administrative level of the place.
    pub place_type: PlaceType,
    /// Two-letter state abbreviation.
    pub state: String,
}

impl CaseRow {
    /// Validates this row into the canonical [`DailyRecord`].
    ///
    /// Prefers the current population estimate and falls back to the
    /// 2019 one.
    ///
    /// # Errors
    ///
    /// Returns [`RowError`] if the epidemiological week code is not a
    /// real week or no positive population estimate is present.
    pub fn to_daily_record(&self) -> Result<DailyRecord, RowError> {
        let epidemiological_week = EpiWeek::from_code(self.epidemiological_week)
            .map_err(|_| RowError::InvalidWeek {
                code: self.epidemiological_week,
            })?;
        let estimated_population = self
            .estimated_population
            .or(self.estimated_population_2019)
            .filter(|population| *population > 0)
            .ok_or(RowError::MissingPopulation)?;

        Ok(DailyRecord {
            date: self.date,
            confirmed: self.last_available_confirmed,
            deaths: self.last_available_deaths,
            new_confirmed: self.new_confirmed,
            new_deaths: self.new_deaths,
            epidemiological_week,
            estimated_population,
            is_last: self.is_last,
        })
    }
}

/// Error returned when a wire row cannot be validated into a
/// [`DailyRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The `epidemiological_week` field is not a real `YYYYWW` week.
    #[error("invalid epidemiological week code {code}")]
    InvalidWeek {
        /// The rejected code.
        code: u32,
    },

    /// Neither population estimate is present and positive.
    #[error("missing or non-positive estimated population")]
    MissingPopulation,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> serde_json::Value {
        serde_json::json!({
            "city": "Curitiba",
            "city_ibge_code": 4_106_902,
            "date": "2020-06-01",
            "epidemiological_week": 202_023,
            "estimated_population": 1_948_626,
            "estimated_population_2019": 1_933_105,
            "is_last": true,
            "is_repeated": false,
            "last_available_confirmed": 4_327,
            "last_available_deaths": 158,
            "new_confirmed": 71,
            "new_deaths": -2,
            "place_type": "city",
            "state": "PR"
        })
    }

    #[test]
    fn parses_and_validates_a_city_row() {
        let row: CaseRow = serde_json::from_value(fixture()).unwrap();
        assert_eq!(row.place_type, PlaceType::City);
        assert_eq!(row.city_ibge_code, Some(4_106_902));

        let record = row.to_daily_record().unwrap();
        assert_eq!(record.confirmed, 4_327);
        assert_eq!(record.deaths, 158);
        // negative corrections survive the boundary; clamping is the
        // aggregation layer's job
        assert_eq!(record.new_deaths, -2);
        assert_eq!(record.epidemiological_week.code(), 202_023);
        assert_eq!(record.estimated_population, 1_948_626);
        assert!(record.is_last);
    }

    #[test]
    fn falls_back_to_the_2019_population_estimate() {
        let mut value = fixture();
        value["estimated_population"] = serde_json::Value::Null;
        let row: CaseRow = serde_json::from_value(value).unwrap();
        assert_eq!(
            row.to_daily_record().unwrap().estimated_population,
            1_933_105
        );
    }

    #[test]
    fn rejects_a_row_without_population() {
        let mut value = fixture();
        value["estimated_population"] = serde_json::Value::Null;
        value["estimated_population_2019"] = serde_json::Value::Null;
        let row: CaseRow = serde_json::from_value(value).unwrap();
        assert_eq!(row.to_daily_record(), Err(RowError::MissingPopulation));
    }

    #[test]
    fn rejects_an_impossible_week_code() {
        let mut value = fixture();
        value["epidemiological_week"] = serde_json::json!(202_099);
        let row: CaseRow = serde_json::from_value(value).unwrap();
        assert_eq!(
            row.to_daily_record(),
            Err(RowError::InvalidWeek { code: 202_099 })
        );
    }

    #[test]
    fn parses_the_pagination_envelope() {
        let page: Page = serde_json::from_value(serde_json::json!({
            "count": 1,
            "next": "https://example.org/?page=2",
            "previous": null,
            "results": [fixture()]
        }))
        .unwrap();
        assert_eq!(page.count, 1);
        assert!(page.next.is_some());
        assert!(page.previous.is_none());
        assert_eq!(page.results.len(), 1);
    }
}
