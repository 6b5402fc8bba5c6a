//! Per-request dashboard assembly.
//!
//! The server calls [`dashboard`] with the raw series for the resolved
//! scope; everything it returns is derived on the spot and discarded
//! after rendering. Freshness over speed: there is no cache to
//! invalidate because there is no cache.

use covid_dashboard_analytics_models::{Dashboard, DailyPoint};
use covid_dashboard_case_models::DailyRecord;

use crate::aggregate::{
    clean, growth_rate, indicators_for, lethality_and_mortality, moving_average, weekly_aggregate,
};
use crate::AnalyticsError;

/// Smoothing window for the daily charts, in days.
pub const MOVING_AVERAGE_WINDOW: usize = 14;

/// Derives everything the dashboard renders for one location's series:
/// the six chart series (cumulative confirmed/deaths, daily
/// confirmed/deaths with moving averages, weekly confirmed/deaths) plus
/// the indicator scalars.
///
/// The input must be ordered by date, as fetched. Population for the
/// per-100k rates is taken from the series itself, which for the
/// nation-wide rollup is the fixed national constant.
///
/// The growth and lethality cards degrade gracefully: a series too
/// young to span three epidemiological weeks, or one with no confirmed
/// cases yet, yields `None` for that card rather than failing the
/// whole request.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if the series is empty or no record is
/// flagged as the latest. The caller renders the empty state in that
/// case — never a partial dashboard.
pub fn dashboard(series: &[DailyRecord]) -> Result<Dashboard, AnalyticsError> {
    if series.is_empty() {
        return Err(AnalyticsError::InsufficientData {
            message: "no records for this scope".to_string(),
        });
    }

    let cleaned = clean(series);
    let indicators = indicators_for(&cleaned)?;

    let latest = cleaned
        .iter()
        .find(|record| record.is_last)
        .ok_or(AnalyticsError::MissingLastRecord)?;

    let rates = match lethality_and_mortality(latest) {
        Ok(rates) => Some(rates),
        Err(AnalyticsError::DivisionUndefined { message }) => {
            log::debug!("Lethality card unavailable: {message}");
            None
        }
        Err(e) => return Err(e),
    };

    let weekly = weekly_aggregate(&cleaned);
    let growth = match growth_rate(&weekly, latest.estimated_population) {
        Ok(growth) => Some(growth),
        Err(AnalyticsError::InsufficientData { message }) => {
            log::debug!("Growth card unavailable: {message}");
            None
        }
        Err(e) => return Err(e),
    };

    let new_confirmed: Vec<i64> = cleaned.iter().map(|r| r.new_confirmed).collect();
    let new_deaths: Vec<i64> = cleaned.iter().map(|r| r.new_deaths).collect();
    let new_confirmed_avg = moving_average(&new_confirmed, MOVING_AVERAGE_WINDOW)?;
    let new_deaths_avg = moving_average(&new_deaths, MOVING_AVERAGE_WINDOW)?;

    let daily = cleaned
        .into_iter()
        .map(|record| DailyPoint {
            date: record.date,
            confirmed: record.confirmed,
            deaths: record.deaths,
            new_confirmed: record.new_confirmed,
            new_deaths: record.new_deaths,
        })
        .collect();

    Ok(Dashboard {
        daily,
        weekly,
        new_confirmed_avg,
        new_deaths_avg,
        indicators,
        growth,
        rates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use covid_dashboard_case_models::EpiWeek;

    fn series(days: u32) -> Vec<DailyRecord> {
        (0..days)
            .map(|offset| {
                let date = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()
                    + chrono::Duration::days(i64::from(offset));
                DailyRecord {
                    date,
                    confirmed: i64::from(offset + 1) * 10,
                    deaths: i64::from(offset + 1),
                    new_confirmed: 10,
                    new_deaths: 1,
                    epidemiological_week: EpiWeek::for_date(date),
                    estimated_population: 1_000_000,
                    is_last: offset == days - 1,
                }
            })
            .collect()
    }

    #[test]
    fn derives_all_chart_series() {
        let input = series(28);
        let dashboard = dashboard(&input).unwrap();

        assert_eq!(dashboard.daily.len(), 28);
        assert_eq!(dashboard.new_confirmed_avg.len(), 28);
        assert_eq!(dashboard.new_deaths_avg.len(), 28);
        // 2020-06-01 is the Monday of week 23; 28 days span weeks 23..=27
        assert_eq!(dashboard.weekly.len(), 5);
        assert_eq!(dashboard.indicators.confirmed, 280);
        assert_eq!(dashboard.indicators.new_confirmed, 10);
        // constant 10 cases/day means both completed weeks saw 70
        let growth = dashboard.growth.unwrap();
        assert!((growth.current - 7.0).abs() < 1e-9);
        let rates = dashboard.rates.unwrap();
        assert!((rates.lethality - 10.0).abs() < 1e-9);
    }

    #[test]
    fn empty_series_is_insufficient() {
        assert!(matches!(
            dashboard(&[]),
            Err(AnalyticsError::InsufficientData { .. })
        ));
    }

    #[test]
    fn unflagged_series_is_malformed() {
        let mut input = series(5);
        for record in &mut input {
            record.is_last = false;
        }
        assert_eq!(dashboard(&input), Err(AnalyticsError::MissingLastRecord));
    }

    #[test]
    fn first_day_city_reports_delta_equal_to_total() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let record = DailyRecord {
            date,
            confirmed: 3,
            deaths: 0,
            new_confirmed: 3,
            new_deaths: 0,
            epidemiological_week: EpiWeek::for_date(date),
            estimated_population: 50_000,
            is_last: true,
        };

        let dashboard = dashboard(&[record]).unwrap();
        assert_eq!(
            dashboard.indicators.new_confirmed,
            dashboard.indicators.confirmed
        );
        assert_eq!(dashboard.indicators.new_deaths, dashboard.indicators.deaths);
        assert_eq!(dashboard.daily.len(), 1);
        // one week of history cannot support the growth card
        assert!(dashboard.growth.is_none());
    }
}
