//! Aggregation primitives over per-day case records.
//!
//! Each function here mirrors one derivation step the dashboard needs:
//! cleaning reporting corrections, smoothing, weekly bucketing, and the
//! ratio indicators. They compose in [`crate::dashboard`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use covid_dashboard_analytics_models::{CaseRates, GrowthRate, Indicators, WeeklyBucket};
use covid_dashboard_case_models::DailyRecord;
use covid_dashboard_geography_models::NATION_POPULATION;

use crate::AnalyticsError;

/// Returns a copy of the series with negative daily deltas clamped to
/// zero.
///
/// Health departments occasionally correct their totals downward, which
/// shows up as negative `new_confirmed`/`new_deaths` values; those must
/// not appear as negative bars. Cumulative fields are never clamped.
/// Idempotent: cleaning an already-clean series is a no-op.
#[must_use]
pub fn clean(series: &[DailyRecord]) -> Vec<DailyRecord> {
    series
        .iter()
        .map(|record| DailyRecord {
            new_confirmed: record.new_confirmed.max(0),
            new_deaths: record.new_deaths.max(0),
            ..record.clone()
        })
        .collect()
}

/// Moving average with a window that truncates at the end of the series.
///
/// `out[i]` is the arithmetic mean of `values[i..min(i + window, len)]`,
/// so the output has exactly the same length as the input and overlays
/// the bar series point-for-point. Near the series end the window
/// shrinks instead of padding with zeros.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidArgument`] if `window` is zero.
#[allow(clippy::cast_precision_loss)]
pub fn moving_average(values: &[i64], window: usize) -> Result<Vec<f64>, AnalyticsError> {
    if window == 0 {
        return Err(AnalyticsError::InvalidArgument {
            message: "moving average window must be at least 1".to_string(),
        });
    }

    Ok((0..values.len())
        .map(|i| {
            let slice = &values[i..(i + window).min(values.len())];
            let sum: i64 = slice.iter().sum();
            sum as f64 / slice.len() as f64
        })
        .collect())
}

/// Sums daily deltas into epidemiological-week buckets.
///
/// Output is ascending by week code. Weeks with no rows inside the
/// observed range are emitted as zero-valued buckets so a histogram
/// never silently compresses its time axis — including across year
/// boundaries, where the week count rolls 52 or 53 to 1.
#[must_use]
pub fn weekly_aggregate(series: &[DailyRecord]) -> Vec<WeeklyBucket> {
    let mut sums: BTreeMap<_, (i64, i64)> = BTreeMap::new();
    for record in series {
        let entry = sums.entry(record.epidemiological_week).or_insert((0, 0));
        entry.0 += record.new_confirmed;
        entry.1 += record.new_deaths;
    }

    let (Some(&first), Some(&last)) = (sums.keys().next(), sums.keys().next_back()) else {
        return Vec::new();
    };

    let mut buckets = Vec::new();
    let mut week = first;
    loop {
        let (new_confirmed, new_deaths) = sums.get(&week).copied().unwrap_or((0, 0));
        buckets.push(WeeklyBucket {
            week,
            new_confirmed,
            new_deaths,
        });
        if week == last {
            break;
        }
        week = week.succ();
    }
    buckets
}

/// Week-over-week case growth per 100k population.
///
/// The trailing bucket of the weekly series is usually an incomplete
/// week, so `current` reads the second-to-last bucket and `previous`
/// the third-to-last.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] if fewer than three
/// weekly buckets exist, or [`AnalyticsError::InvalidArgument`] for a
/// non-positive population.
#[allow(clippy::cast_precision_loss)]
pub fn growth_rate(weekly: &[WeeklyBucket], population: i64) -> Result<GrowthRate, AnalyticsError> {
    if population <= 0 {
        return Err(AnalyticsError::InvalidArgument {
            message: format!("population must be positive, got {population}"),
        });
    }
    if weekly.len() < 3 {
        return Err(AnalyticsError::InsufficientData {
            message: format!(
                "growth rate needs at least 3 weekly buckets, got {}",
                weekly.len()
            ),
        });
    }

    let per_100k = |count: i64| count as f64 / population as f64 * 100_000.0;
    Ok(GrowthRate {
        current: per_100k(weekly[weekly.len() - 2].new_confirmed),
        previous: per_100k(weekly[weekly.len() - 3].new_confirmed),
    })
}

/// Mortality (deaths per 100k population) and lethality (deaths as a
/// percentage of confirmed cases) from a location's latest record.
///
/// # Errors
///
/// Returns [`AnalyticsError::DivisionUndefined`] if the record has zero
/// confirmed cases or a non-positive population.
#[allow(clippy::cast_precision_loss)]
pub fn lethality_and_mortality(latest: &DailyRecord) -> Result<CaseRates, AnalyticsError> {
    if latest.confirmed == 0 {
        return Err(AnalyticsError::DivisionUndefined {
            message: "lethality with zero confirmed cases".to_string(),
        });
    }
    if latest.estimated_population <= 0 {
        return Err(AnalyticsError::DivisionUndefined {
            message: "mortality with non-positive population".to_string(),
        });
    }

    Ok(CaseRates {
        mortality: latest.deaths as f64 / latest.estimated_population as f64 * 100_000.0,
        lethality: latest.deaths as f64 / latest.confirmed as f64 * 100.0,
    })
}

/// Latest-day totals and deltas for a location.
///
/// # Errors
///
/// Returns [`AnalyticsError::MissingLastRecord`] if no record carries
/// the `is_last` flag.
pub fn indicators_for(series: &[DailyRecord]) -> Result<Indicators, AnalyticsError> {
    let latest = series
        .iter()
        .find(|record| record.is_last)
        .ok_or(AnalyticsError::MissingLastRecord)?;

    Ok(Indicators {
        confirmed: latest.confirmed,
        deaths: latest.deaths,
        new_confirmed: latest.new_confirmed,
        new_deaths: latest.new_deaths,
        date: latest.date,
    })
}

/// Collapses per-state records into one nation-wide series.
///
/// Records are grouped by date and their counts summed. Every rolled-up
/// row carries the fixed national population, and only the
/// chronologically latest row is flagged `is_last`.
#[must_use]
pub fn nation_rollup(records: &[DailyRecord]) -> Vec<DailyRecord> {
    let mut by_date: BTreeMap<NaiveDate, DailyRecord> = BTreeMap::new();
    for record in records {
        let entry = by_date.entry(record.date).or_insert_with(|| DailyRecord {
            date: record.date,
            confirmed: 0,
            deaths: 0,
            new_confirmed: 0,
            new_deaths: 0,
            epidemiological_week: record.epidemiological_week,
            estimated_population: NATION_POPULATION,
            is_last: false,
        });
        entry.confirmed += record.confirmed;
        entry.deaths += record.deaths;
        entry.new_confirmed += record.new_confirmed;
        entry.new_deaths += record.new_deaths;
    }

    let mut series: Vec<DailyRecord> = by_date.into_values().collect();
    if let Some(latest) = series.last_mut() {
        latest.is_last = true;
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use covid_dashboard_case_models::EpiWeek;

    fn record(date: (i32, u32, u32), new_confirmed: i64, new_deaths: i64) -> DailyRecord {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        DailyRecord {
            date,
            confirmed: 100,
            deaths: 10,
            new_confirmed,
            new_deaths,
            epidemiological_week: EpiWeek::for_date(date),
            estimated_population: 1_000_000,
            is_last: false,
        }
    }

    #[test]
    fn clean_clamps_only_daily_deltas() {
        let mut dirty = record((2020, 6, 1), -5, -2);
        dirty.confirmed = 95;
        let cleaned = clean(&[dirty.clone()]);

        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].new_confirmed, 0);
        assert_eq!(cleaned[0].new_deaths, 0);
        // cumulative fields are untouched
        assert_eq!(cleaned[0].confirmed, 95);
        assert_eq!(cleaned[0].deaths, 10);
        // the input is not mutated
        assert_eq!(dirty.new_confirmed, -5);
    }

    #[test]
    fn clean_is_idempotent() {
        let series = vec![record((2020, 6, 1), -5, 3), record((2020, 6, 2), 7, -1)];
        let once = clean(&series);
        let twice = clean(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn moving_average_truncates_at_series_end() {
        let avg = moving_average(&[1, 2, 3, 4, 5], 3).unwrap();
        assert_eq!(avg, vec![2.0, 3.0, 4.0, 4.5, 5.0]);
    }

    #[test]
    fn moving_average_preserves_length() {
        for window in [1, 7, 14, 100] {
            let values: Vec<i64> = (0..30).collect();
            assert_eq!(moving_average(&values, window).unwrap().len(), 30);
        }
        assert!(moving_average(&[], 14).unwrap().is_empty());
    }

    #[test]
    fn moving_average_rejects_zero_window() {
        assert!(matches!(
            moving_average(&[1, 2, 3], 0),
            Err(AnalyticsError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn weekly_aggregate_sums_by_week() {
        // 2020-06-01 (Monday) and 06-02 share week 202023; 06-07 (Sunday)
        // opens week 202024
        let series = vec![
            record((2020, 6, 1), 10, 1),
            record((2020, 6, 2), 20, 2),
            record((2020, 6, 7), 5, 0),
        ];
        let weekly = weekly_aggregate(&series);

        assert_eq!(weekly.len(), 2);
        assert_eq!(weekly[0].week.code(), 2020_23);
        assert_eq!(weekly[0].new_confirmed, 30);
        assert_eq!(weekly[0].new_deaths, 3);
        assert_eq!(weekly[1].week.code(), 2020_24);
        assert_eq!(weekly[1].new_confirmed, 5);
    }

    #[test]
    fn weekly_aggregate_conserves_totals() {
        let series: Vec<DailyRecord> = (1..=28)
            .map(|day| record((2020, 6, day), i64::from(day), i64::from(day % 3)))
            .collect();
        let weekly = weekly_aggregate(&series);

        let daily_confirmed: i64 = series.iter().map(|r| r.new_confirmed).sum();
        let weekly_confirmed: i64 = weekly.iter().map(|b| b.new_confirmed).sum();
        assert_eq!(daily_confirmed, weekly_confirmed);

        let daily_deaths: i64 = series.iter().map(|r| r.new_deaths).sum();
        let weekly_deaths: i64 = weekly.iter().map(|b| b.new_deaths).sum();
        assert_eq!(daily_deaths, weekly_deaths);
    }

    #[test]
    fn weekly_aggregate_fills_gaps_with_zero_buckets() {
        let series = vec![record((2020, 6, 1), 10, 1), record((2020, 6, 21), 5, 0)];
        let weekly = weekly_aggregate(&series);

        let codes: Vec<u32> = weekly.iter().map(|b| b.week.code()).collect();
        assert_eq!(codes, vec![2020_23, 2020_24, 2020_25, 2020_26]);
        assert_eq!(weekly[1].new_confirmed, 0);
        assert_eq!(weekly[2].new_confirmed, 0);
    }

    #[test]
    fn weekly_aggregate_crosses_year_boundaries() {
        // 2020 has 53 epidemiological weeks; the range must not invent
        // weeks 54..99
        let series = vec![
            record((2020, 12, 20), 10, 1), // week 202052
            record((2021, 1, 10), 5, 0),   // week 202102
        ];
        let codes: Vec<u32> = weekly_aggregate(&series)
            .iter()
            .map(|b| b.week.code())
            .collect();
        assert_eq!(codes, vec![2020_52, 2020_53, 2021_01, 2021_02]);
    }

    #[test]
    fn weekly_aggregate_of_empty_series_is_empty() {
        assert!(weekly_aggregate(&[]).is_empty());
    }

    #[test]
    fn growth_rate_skips_the_trailing_bucket() {
        let bucket = |code: u32, new_confirmed: i64| WeeklyBucket {
            week: EpiWeek::from_code(code).unwrap(),
            new_confirmed,
            new_deaths: 0,
        };
        let weekly = vec![
            bucket(2020_20, 400),
            bucket(2020_21, 500),
            bucket(2020_22, 600),
            bucket(2020_23, 120), // partial week, ignored
        ];

        let growth = growth_rate(&weekly, 1_000_000).unwrap();
        assert!((growth.current - 60.0).abs() < 1e-9);
        assert!((growth.previous - 50.0).abs() < 1e-9);
        assert!((growth.delta() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn growth_rate_needs_three_buckets() {
        let weekly = weekly_aggregate(&[record((2020, 6, 1), 10, 1), record((2020, 6, 8), 5, 0)]);
        assert_eq!(weekly.len(), 2);
        assert!(matches!(
            growth_rate(&weekly, 1_000_000),
            Err(AnalyticsError::InsufficientData { .. })
        ));
    }

    #[test]
    fn growth_rate_rejects_non_positive_population() {
        assert!(matches!(
            growth_rate(&[], 0),
            Err(AnalyticsError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn rates_match_reference_values() {
        let mut latest = record((2020, 6, 1), 0, 0);
        latest.confirmed = 5_000;
        latest.deaths = 100;

        let rates = lethality_and_mortality(&latest).unwrap();
        assert!((rates.mortality - 10.0).abs() < 1e-9);
        assert!((rates.lethality - 2.0).abs() < 1e-9);
    }

    #[test]
    fn lethality_with_zero_confirmed_is_undefined() {
        let mut latest = record((2020, 6, 1), 0, 0);
        latest.confirmed = 0;
        assert!(matches!(
            lethality_and_mortality(&latest),
            Err(AnalyticsError::DivisionUndefined { .. })
        ));
    }

    #[test]
    fn indicators_read_the_flagged_record() {
        let mut series = vec![record((2020, 6, 1), 10, 1), record((2020, 6, 2), 7, 2)];
        series[1].confirmed = 117;
        series[1].deaths = 13;
        series[1].is_last = true;

        let indicators = indicators_for(&series).unwrap();
        assert_eq!(indicators.confirmed, 117);
        assert_eq!(indicators.deaths, 13);
        assert_eq!(indicators.new_confirmed, 7);
        assert_eq!(indicators.new_deaths, 2);
        assert_eq!(
            indicators.date,
            NaiveDate::from_ymd_opt(2020, 6, 2).unwrap()
        );
    }

    #[test]
    fn indicators_require_a_flagged_record() {
        let series = vec![record((2020, 6, 1), 10, 1)];
        assert_eq!(
            indicators_for(&series),
            Err(AnalyticsError::MissingLastRecord)
        );
    }

    #[test]
    fn nation_rollup_sums_states_by_date() {
        let mut sp = record((2020, 6, 1), 10, 1);
        sp.confirmed = 1_000;
        sp.deaths = 50;
        let mut pr = record((2020, 6, 1), 5, 0);
        pr.confirmed = 200;
        pr.deaths = 8;
        let mut sp_next = record((2020, 6, 2), 20, 2);
        sp_next.confirmed = 1_020;
        sp_next.deaths = 52;
        sp_next.is_last = true;

        let series = nation_rollup(&[sp, pr, sp_next]);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].confirmed, 1_200);
        assert_eq!(series[0].deaths, 58);
        assert_eq!(series[0].new_confirmed, 15);
        assert!(!series[0].is_last);
        assert_eq!(series[1].confirmed, 1_020);
        assert!(series[1].is_last);
        // national rates always use the fixed constant population
        assert_eq!(series[0].estimated_population, NATION_POPULATION);
        assert_eq!(series[1].estimated_population, NATION_POPULATION);
    }
}
