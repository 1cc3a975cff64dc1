use chrono::{Datelike, NaiveDate};

/// First day of `(year, month)` and first day of the following month.
///
/// Returns `None` when the pair does not name a representable month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, end))
}

/// Number of calendar days in `(year, month)`, leap years included.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (start, end) = month_bounds(year, month)?;
    u32::try_from(end.signed_duration_since(start).num_days()).ok()
}

/// Month that contains `date`, as `(year, month)`.
pub fn month_of(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}
