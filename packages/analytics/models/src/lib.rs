#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived series and indicator types produced by the aggregation layer.
//!
//! Everything here is recomputed from scratch on each dashboard request
//! and discarded after rendering — none of these values is ever
//! persisted.

use chrono::NaiveDate;
use covid_dashboard_case_models::EpiWeek;
use serde::{Deserialize, Serialize};

/// One cleaned per-day chart point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    /// Calendar date.
    pub date: NaiveDate,
    /// Cumulative confirmed cases.
    pub confirmed: i64,
    /// Cumulative deaths.
    pub deaths: i64,
    /// New confirmed cases on this date (clamped to zero).
    pub new_confirmed: i64,
    /// New deaths on this date (clamped to zero).
    pub new_deaths: i64,
}

/// One epidemiological-week histogram bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBucket {
    /// The epidemiological week.
    pub week: EpiWeek,
    /// Confirmed cases newly reported during this week.
    pub new_confirmed: i64,
    /// Deaths newly reported during this week.
    pub new_deaths: i64,
}

/// Scalar indicators taken from the most recent record of a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicators {
    /// Cumulative confirmed cases.
    pub confirmed: i64,
    /// Cumulative deaths.
    pub deaths: i64,
    /// Confirmed cases newly reported on the latest day.
    pub new_confirmed: i64,
    /// Deaths newly reported on the latest day.
    pub new_deaths: i64,
    /// The latest reporting date.
    pub date: NaiveDate,
}

/// Week-over-week case growth, in new cases per 100k population.
///
/// Both values describe *completed* weeks — the trailing bucket of the
/// weekly series is an incomplete week and is never used here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRate {
    /// New cases per 100k in the most recent completed week.
    pub current: f64,
    /// New cases per 100k in the week before that.
    pub previous: f64,
}

impl GrowthRate {
    /// Change from the previous completed week to the current one.
    #[must_use]
    pub fn delta(self) -> f64 {
        self.current - self.previous
    }
}

/// Population- and case-relative death rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRates {
    /// Deaths per 100k population.
    pub mortality: f64,
    /// Deaths as a percentage of confirmed cases.
    pub lethality: f64,
}

/// Everything the dashboard renders for one scope: the six chart series
/// plus the indicator scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Cleaned per-day series (cumulative and daily charts).
    pub daily: Vec<DailyPoint>,
    /// Per-epidemiological-week histogram bars.
    pub weekly: Vec<WeeklyBucket>,
    /// 14-day moving average of new confirmed cases, point-for-point
    /// aligned with `daily`.
    pub new_confirmed_avg: Vec<f64>,
    /// 14-day moving average of new deaths, aligned with `daily`.
    pub new_deaths_avg: Vec<f64>,
    /// Latest-day totals and deltas.
    pub indicators: Indicators,
    /// Week-over-week case growth per 100k. `None` until the series
    /// spans three epidemiological weeks.
    pub growth: Option<GrowthRate>,
    /// Mortality and lethality rates. `None` while the location has no
    /// confirmed cases.
    pub rates: Option<CaseRates>,
}
