// Date utility functions
// Week strips, inclusive ranges and display formats for naive local dates

use chrono::{Datelike, Duration, Local, Months, NaiveDate};

/// Short weekday labels, Sunday first.
pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The seven dates (Sunday through Saturday) of the week containing `date`.
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let offset = date.weekday().num_days_from_sunday() as i64;
    let week_start = date - Duration::days(offset);
    std::array::from_fn(|i| week_start + Duration::days(i as i64))
}

/// Every date from `start` to `end` inclusive; empty when `end < start`.
pub fn dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// `YYYY. MM. DD`, as shown in the date header.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%Y. %m. %d").to_string()
}

pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

/// Move by whole months, clamping the day to the target month's length.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_dates_start_on_sunday() {
        // 2024-01-03 is a Wednesday
        let week = week_dates(ymd(2024, 1, 3));
        assert_eq!(week[0], ymd(2023, 12, 31));
        assert_eq!(week[6], ymd(2024, 1, 6));
        assert!(week.contains(&ymd(2024, 1, 3)));
    }

    #[test]
    fn test_week_dates_on_sunday_itself() {
        let week = week_dates(ymd(2024, 1, 7));
        assert_eq!(week[0], ymd(2024, 1, 7));
    }

    #[test]
    fn test_dates_in_range_inclusive() {
        let dates = dates_in_range(ymd(2024, 2, 28), ymd(2024, 3, 1));
        assert_eq!(dates, vec![ymd(2024, 2, 28), ymd(2024, 2, 29), ymd(2024, 3, 1)]);
        assert!(dates_in_range(ymd(2024, 3, 1), ymd(2024, 2, 28)).is_empty());
    }

    #[test]
    fn test_display_format() {
        assert_eq!(format_display_date(ymd(2024, 1, 5)), "2024. 01. 05");
    }

    #[test]
    fn test_shift_months_clamps_day() {
        assert_eq!(shift_months(ymd(2024, 1, 31), 1), ymd(2024, 2, 29));
        assert_eq!(shift_months(ymd(2024, 3, 31), -1), ymd(2024, 2, 29));
        assert_eq!(shift_months(ymd(2024, 12, 15), 1), ymd(2025, 1, 15));
    }

    #[test]
    fn test_shift_days() {
        assert_eq!(shift_days(ymd(2024, 1, 1), -1), ymd(2023, 12, 31));
    }
}
