#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the dashboard server.
//!
//! These types are serialized to JSON for the REST API. They are
//! separate from the derived analytics types to allow independent
//! evolution of the API contract; indicator card values arrive
//! pre-formatted for display ([`fmt`]).

pub mod fmt;

use covid_dashboard_analytics_models::Dashboard;
use covid_dashboard_geography_models::DropdownOption;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Query parameters for the cities dropdown endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitiesQueryParams {
    /// Two-digit IBGE code of the selected state.
    pub state: Option<u32>,
}

/// Query parameters for the dashboard endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQueryParams {
    /// Two-digit IBGE code of the selected state.
    pub state: Option<u32>,
    /// Seven-digit IBGE code of the selected city.
    pub city: Option<u32>,
}

/// The cities dropdown payload. Mirrors the dependent-dropdown
/// contract: disabled and empty until a state is selected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCityOptions {
    /// Whether the dropdown should be disabled.
    pub disabled: bool,
    /// City options of the selected state.
    pub options: Vec<DropdownOption>,
}

/// A date-indexed chart point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDatePoint {
    /// Calendar date.
    pub date: chrono::NaiveDate,
    /// Value at this date.
    pub value: i64,
}

/// A week-indexed histogram bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiWeekPoint {
    /// Epidemiological week as its `YYYYWW` code.
    pub week: u32,
    /// Value summed over this week.
    pub value: i64,
}

/// A daily bar chart with its smoothing overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDailySeries {
    /// Daily bars.
    pub bars: Vec<ApiDatePoint>,
    /// 14-day moving average, aligned point-for-point with `bars`.
    pub average: Vec<f64>,
}

/// The six chart series of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCharts {
    /// Cumulative confirmed cases by date.
    pub cumulative_confirmed: Vec<ApiDatePoint>,
    /// Cumulative deaths by date.
    pub cumulative_deaths: Vec<ApiDatePoint>,
    /// New confirmed cases by notification date.
    pub daily_confirmed: ApiDailySeries,
    /// New deaths by notification date.
    pub daily_deaths: ApiDailySeries,
    /// New confirmed cases by epidemiological week.
    pub weekly_confirmed: Vec<ApiWeekPoint>,
    /// New deaths by epidemiological week.
    pub weekly_deaths: Vec<ApiWeekPoint>,
}

/// An indicator card holding a cumulative total and the latest-day
/// delta, pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCountCard {
    /// Cumulative total (e.g. `"1.234.567"`).
    pub total: String,
    /// Latest-day delta (e.g. `"1.028"`).
    pub delta: String,
    /// Latest reporting date as `dd/mm`.
    pub date: String,
}

/// The weekly growth indicator card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGrowthCard {
    /// New cases per 100k in the most recent completed week (e.g.
    /// `"60,00"`).
    pub current: String,
    /// Change since the week before, prefixed with `▲` or `▼`.
    pub delta: String,
    /// Whether the rate rose week over week.
    pub rising: bool,
}

/// The lethality/mortality indicator card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRatesCard {
    /// Deaths as a percentage of confirmed cases (e.g. `"2,00"`).
    pub lethality: String,
    /// Deaths per 100k population (e.g. `"10,00"`).
    pub mortality: String,
}

/// The four indicator cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCards {
    /// Confirmed cases card.
    pub confirmed: ApiCountCard,
    /// Deaths card.
    pub deaths: ApiCountCard,
    /// Weekly growth card. Absent while the series is too young.
    pub growth: Option<ApiGrowthCard>,
    /// Lethality/mortality card. Absent while nothing is confirmed.
    pub rates: Option<ApiRatesCard>,
}

/// The full dashboard payload for one scope.
///
/// On any aggregation or fetch failure the server answers with the
/// empty state (`available: false`, no charts, no cards) rather than a
/// partial view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDashboard {
    /// Display label of the scope (e.g. `"Curitiba (PR)"`, `"Brasil"`).
    pub location: String,
    /// Whether derived data is available for this scope.
    pub available: bool,
    /// The six chart series.
    pub charts: Option<ApiCharts>,
    /// The four indicator cards.
    pub cards: Option<ApiCards>,
}

impl ApiDashboard {
    /// Builds the response payload from a derived dashboard.
    #[must_use]
    pub fn from_parts(location: String, dashboard: &Dashboard) -> Self {
        let charts = ApiCharts {
            cumulative_confirmed: dashboard
                .daily
                .iter()
                .map(|point| ApiDatePoint {
                    date: point.date,
                    value: point.confirmed,
                })
                .collect(),
            cumulative_deaths: dashboard
                .daily
                .iter()
                .map(|point| ApiDatePoint {
                    date: point.date,
                    value: point.deaths,
                })
                .collect(),
            daily_confirmed: ApiDailySeries {
                bars: dashboard
                    .daily
                    .iter()
                    .map(|point| ApiDatePoint {
                        date: point.date,
                        value: point.new_confirmed,
                    })
                    .collect(),
                average: dashboard.new_confirmed_avg.clone(),
            },
            daily_deaths: ApiDailySeries {
                bars: dashboard
                    .daily
                    .iter()
                    .map(|point| ApiDatePoint {
                        date: point.date,
                        value: point.new_deaths,
                    })
                    .collect(),
                average: dashboard.new_deaths_avg.clone(),
            },
            weekly_confirmed: dashboard
                .weekly
                .iter()
                .map(|bucket| ApiWeekPoint {
                    week: bucket.week.code(),
                    value: bucket.new_confirmed,
                })
                .collect(),
            weekly_deaths: dashboard
                .weekly
                .iter()
                .map(|bucket| ApiWeekPoint {
                    week: bucket.week.code(),
                    value: bucket.new_deaths,
                })
                .collect(),
        };

        let indicators = &dashboard.indicators;
        let date = fmt::format_day_month(indicators.date);
        let cards = ApiCards {
            confirmed: ApiCountCard {
                total: fmt::format_count(indicators.confirmed),
                delta: fmt::format_count(indicators.new_confirmed),
                date: date.clone(),
            },
            deaths: ApiCountCard {
                total: fmt::format_count(indicators.deaths),
                delta: fmt::format_count(indicators.new_deaths),
                date,
            },
            growth: dashboard.growth.map(|growth| {
                let delta = growth.delta();
                let arrow = if delta > 0.0 { '▲' } else { '▼' };
                ApiGrowthCard {
                    current: fmt::format_rate(growth.current),
                    delta: format!("{arrow} {}", fmt::format_rate(delta.abs())),
                    rising: delta > 0.0,
                }
            }),
            rates: dashboard.rates.map(|rates| ApiRatesCard {
                lethality: fmt::format_rate(rates.lethality),
                mortality: fmt::format_rate(rates.mortality),
            }),
        };

        Self {
            location,
            available: true,
            charts: Some(charts),
            cards: Some(cards),
        }
    }

    /// The empty-state payload rendered when derivation fails.
    #[must_use]
    pub const fn empty(location: String) -> Self {
        Self {
            location,
            available: false,
            charts: None,
            cards: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use covid_dashboard_analytics_models::{
        CaseRates, DailyPoint, GrowthRate, Indicators, WeeklyBucket,
    };
    use covid_dashboard_case_models::EpiWeek;

    fn dashboard() -> Dashboard {
        let date = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        Dashboard {
            daily: vec![DailyPoint {
                date,
                confirmed: 1_234_567,
                deaths: 50_000,
                new_confirmed: 1_028,
                new_deaths: 23,
            }],
            weekly: vec![WeeklyBucket {
                week: EpiWeek::from_code(2020_23).unwrap(),
                new_confirmed: 1_028,
                new_deaths: 23,
            }],
            new_confirmed_avg: vec![1_028.0],
            new_deaths_avg: vec![23.0],
            indicators: Indicators {
                confirmed: 1_234_567,
                deaths: 50_000,
                new_confirmed: 1_028,
                new_deaths: 23,
                date,
            },
            growth: Some(GrowthRate {
                current: 60.0,
                previous: 50.0,
            }),
            rates: Some(CaseRates {
                mortality: 10.0,
                lethality: 2.0,
            }),
        }
    }

    #[test]
    fn cards_are_preformatted() {
        let api = ApiDashboard::from_parts("Brasil".to_string(), &dashboard());
        assert!(api.available);

        let cards = api.cards.unwrap();
        assert_eq!(cards.confirmed.total, "1.234.567");
        assert_eq!(cards.confirmed.delta, "1.028");
        assert_eq!(cards.confirmed.date, "01/06");
        assert_eq!(cards.deaths.total, "50.000");

        let growth = cards.growth.unwrap();
        assert_eq!(growth.current, "60,00");
        assert_eq!(growth.delta, "▲ 10,00");
        assert!(growth.rising);

        let rates = cards.rates.unwrap();
        assert_eq!(rates.lethality, "2,00");
        assert_eq!(rates.mortality, "10,00");
    }

    #[test]
    fn charts_stay_aligned_with_their_averages() {
        let api = ApiDashboard::from_parts("Brasil".to_string(), &dashboard());
        let charts = api.charts.unwrap();
        assert_eq!(
            charts.daily_confirmed.bars.len(),
            charts.daily_confirmed.average.len()
        );
        assert_eq!(charts.weekly_confirmed[0].week, 2020_23);
    }

    #[test]
    fn falling_growth_points_down() {
        let mut dashboard = dashboard();
        dashboard.growth = Some(GrowthRate {
            current: 40.0,
            previous: 50.0,
        });
        let api = ApiDashboard::from_parts("Brasil".to_string(), &dashboard);
        let growth = api.cards.unwrap().growth.unwrap();
        assert_eq!(growth.delta, "▼ 10,00");
        assert!(!growth.rising);
    }

    #[test]
    fn empty_state_has_no_charts() {
        let api = ApiDashboard::empty("Curitiba (PR)".to_string());
        assert!(!api.available);
        assert!(api.charts.is_none());
        assert!(api.cards.is_none());
        assert_eq!(api.location, "Curitiba (PR)");
    }
}
