//! Brazilian display formatting for indicator values.
//!
//! Counts use `.` as the thousands separator (`1.234.567`); rates use
//! `,` as the decimal separator with two places (`1.234,56`).

use chrono::NaiveDate;

/// Formats an integer count with `.` thousands separators.
#[must_use]
pub fn format_count(value: i64) -> String {
    let grouped = group_thousands(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats a rate with two decimal places, `,` as the decimal separator
/// and `.` as the thousands separator.
#[must_use]
pub fn format_rate(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let grouped = group_thousands(int_part);
    if value < 0.0 {
        format!("-{grouped},{frac_part}")
    } else {
        format!("{grouped},{frac_part}")
    }
}

/// Formats a date as `dd/mm` for the indicator cards.
#[must_use]
pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

/// Inserts a `.` every three digits, right to left.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_group_thousands_with_dots() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1.000");
        assert_eq!(format_count(1_234_567), "1.234.567");
        assert_eq!(format_count(210_147_125), "210.147.125");
    }

    #[test]
    fn negative_counts_keep_the_sign_outside_grouping() {
        assert_eq!(format_count(-1_234), "-1.234");
    }

    #[test]
    fn rates_use_comma_decimals() {
        assert_eq!(format_rate(60.0), "60,00");
        assert_eq!(format_rate(2.0), "2,00");
        assert_eq!(format_rate(0.456), "0,46");
        assert_eq!(format_rate(1_234.567), "1.234,57");
        assert_eq!(format_rate(-3.5), "-3,50");
    }

    #[test]
    fn dates_render_day_slash_month() {
        let date = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        assert_eq!(format_day_month(date), "01/06");
    }
}
