//! Human-readable date formatting.

use chrono::{Datelike, NaiveDate, Weekday};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English month name for 1..=12, `"?"` otherwise.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
        .unwrap_or("?")
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Two-letter weekday label used in calendar grid headers.
pub fn weekday_short(weekday: Weekday) -> &'static str {
    &weekday_name(weekday)[..2]
}

/// "Monday, 12 January 2026".
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {} {}",
        weekday_name(date.weekday()),
        date.day(),
        month_name(date.month()),
        date.year()
    )
}

/// "12.01".
pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%d.%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        assert_eq!(format_long_date(date), "Monday, 12 January 2026");
        assert_eq!(format_day_month(date), "12.01");
    }

    #[test]
    fn month_names_bounds() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "?");
        assert_eq!(month_name(13), "?");
    }

    #[test]
    fn short_weekdays() {
        assert_eq!(weekday_short(Weekday::Mon), "Mo");
        assert_eq!(weekday_short(Weekday::Sun), "Su");
    }
}
