//! Brazilian epidemiological week arithmetic.
//!
//! Weeks run Sunday through Saturday. Week 1 of a reporting year is the
//! week containing at least four days of January, i.e. it begins on the
//! Sunday falling between December 29 and January 4 (the same convention
//! as the US MMWR week). A reporting year therefore has 52 or 53 weeks.
//!
//! Weeks are encoded as `YYYYWW` integers. The encoding orders
//! chronologically as plain integers: 202053 < 202101.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single epidemiological week, identified by reporting year and
/// 1-based week number.
///
/// Serializes as its `YYYYWW` integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct EpiWeek {
    year: i32,
    week: u32,
}

impl EpiWeek {
    /// Creates a week from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEpiWeekError`] if the year does not fit four
    /// digits (required by the `YYYYWW` encoding) or the week number is
    /// outside `1..=weeks_in_year(year)`.
    pub fn new(year: i32, week: u32) -> Result<Self, InvalidEpiWeekError> {
        if (1..=9999).contains(&year) && (1..=Self::weeks_in_year(year)).contains(&week) {
            Ok(Self { year, week })
        } else {
            Err(InvalidEpiWeekError { year, week })
        }
    }

    /// Decodes a `YYYYWW` integer code.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEpiWeekError`] if the code does not describe a
    /// real epidemiological week.
    pub fn from_code(code: u32) -> Result<Self, InvalidEpiWeekError> {
        let year = i32::try_from(code / 100).unwrap_or(i32::MAX);
        Self::new(year, code % 100)
    }

    /// The reporting year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// The 1-based week number within the reporting year.
    #[must_use]
    pub const fn week(self) -> u32 {
        self.week
    }

    /// The `YYYYWW` integer code.
    #[must_use]
    #[allow(clippy::cast_sign_loss)] // year is validated to 1..=9999
    pub const fn code(self) -> u32 {
        self.year as u32 * 100 + self.week
    }

    /// The week immediately after this one, rolling over to week 1 of
    /// the next reporting year past week 52 or 53.
    #[must_use]
    pub fn succ(self) -> Self {
        if self.week < Self::weeks_in_year(self.year) {
            Self {
                year: self.year,
                week: self.week + 1,
            }
        } else {
            Self {
                year: self.year + 1,
                week: 1,
            }
        }
    }

    /// The epidemiological week a calendar date falls in.
    ///
    /// Late-December dates can belong to week 1 of the next reporting
    /// year, and early-January dates to the last week of the previous
    /// one.
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        let mut year = date.year() + 1;
        let mut start = Self::year_start(year);
        while date < start {
            year -= 1;
            start = Self::year_start(year);
        }
        let week = u32::try_from((date - start).num_days() / 7 + 1).unwrap_or(1);
        Self { year, week }
    }

    /// Number of epidemiological weeks in a reporting year: 52 or 53.
    #[must_use]
    pub fn weeks_in_year(year: i32) -> u32 {
        let days = (Self::year_start(year + 1) - Self::year_start(year)).num_days();
        u32::try_from(days / 7).unwrap_or(52)
    }

    /// First day of week 1: the Sunday between December 29 and January 4.
    fn year_start(year: i32) -> NaiveDate {
        let jan4 = NaiveDate::from_ymd_opt(year, 1, 4)
            .expect("January 4th exists in every supported year");
        jan4 - chrono::Duration::days(i64::from(jan4.weekday().num_days_from_sunday()))
    }
}

impl std::fmt::Display for EpiWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:02}", self.year, self.week)
    }
}

impl TryFrom<u32> for EpiWeek {
    type Error = InvalidEpiWeekError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<EpiWeek> for u32 {
    fn from(week: EpiWeek) -> Self {
        week.code()
    }
}

/// Error returned when a year/week pair does not describe a real
/// epidemiological week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidEpiWeekError {
    /// The rejected reporting year.
    pub year: i32,
    /// The rejected week number.
    pub week: u32,
}

impl std::fmt::Display for InvalidEpiWeekError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid epidemiological week {} for year {}",
            self.week, self.year
        )
    }
}

impl std::error::Error for InvalidEpiWeekError {}
