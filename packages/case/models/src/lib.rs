#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Canonical epidemiological record types for the covid dashboard.
//!
//! This crate defines the typed per-day case record that every other
//! crate in the system works with. Data sources normalize their raw rows
//! into [`DailyRecord`] at the boundary; past that point no code touches
//! untyped JSON fields.

pub mod epiweek;

pub use epiweek::{EpiWeek, InvalidEpiWeekError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Administrative level of a location in the case dataset.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlaceType {
    /// A municipality.
    City,
    /// A federative unit (state or federal district).
    State,
}

/// One row of the case time series: the reported situation of a single
/// location on a single day.
///
/// Cumulative counts (`confirmed`, `deaths`) are monotone in well-formed
/// data. The incremental counts (`new_confirmed`, `new_deaths`) may be
/// negative when a health department retroactively corrects its totals;
/// clamping those for display is the aggregation layer's job, not the
/// record's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Calendar date of the report.
    pub date: NaiveDate,
    /// Cumulative confirmed case count up to this date.
    pub confirmed: i64,
    /// Cumulative death count up to this date.
    pub deaths: i64,
    /// Confirmed cases newly reported on this date.
    pub new_confirmed: i64,
    /// Deaths newly reported on this date.
    pub new_deaths: i64,
    /// Epidemiological week this date falls in.
    pub epidemiological_week: EpiWeek,
    /// Estimated population of the location.
    pub estimated_population: i64,
    /// Whether this is the most recent row for the location. Exactly one
    /// row per location carries this flag, and it is the chronologically
    /// latest one.
    pub is_last: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_type_string_forms() {
        assert_eq!(PlaceType::City.to_string(), "city");
        assert_eq!(PlaceType::State.to_string(), "state");
        assert_eq!("state".parse::<PlaceType>().unwrap(), PlaceType::State);
        assert!("country".parse::<PlaceType>().is_err());
    }

    #[test]
    fn daily_record_serde_roundtrip() {
        let record = DailyRecord {
            date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            confirmed: 10,
            deaths: 1,
            new_confirmed: 3,
            new_deaths: -1,
            epidemiological_week: EpiWeek::from_code(2020_10).unwrap(),
            estimated_population: 12_252_023,
            is_last: true,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"epidemiologicalWeek\":202010"));
        let back: DailyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
