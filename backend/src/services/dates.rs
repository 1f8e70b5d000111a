//! Calendar-day helpers shared by the logging services. Days are UTC.

use crate::error::ApiError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

/// Longest range any list or summary query may span
pub const MAX_RANGE_DAYS: i64 = 366;

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Midnight at the start of `date`
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Query dates outside these years are rejected before any arithmetic
pub const MIN_QUERY_YEAR: i32 = 1900;
pub const MAX_QUERY_YEAR: i32 = 9999;

fn out_of_range() -> ApiError {
    ApiError::Validation(format!(
        "Dates must fall between the years {} and {}",
        MIN_QUERY_YEAR, MAX_QUERY_YEAR
    ))
}

/// Reject dates the calendar maths and the database cannot represent
pub fn check_query_date(date: NaiveDate) -> Result<NaiveDate, ApiError> {
    if (MIN_QUERY_YEAR..=MAX_QUERY_YEAR).contains(&date.year()) {
        Ok(date)
    } else {
        Err(out_of_range())
    }
}

/// `date` moved by `days`; an overflow is a 400, not a panic
pub fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate, ApiError> {
    date.checked_add_signed(Duration::days(days)).ok_or_else(out_of_range)
}

/// Half-open instant range `[start 00:00, end + 1 day 00:00)`
pub fn instant_bounds(
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ApiError> {
    let start = check_query_date(start)?;
    let after_end = shift_days(check_query_date(end)?, 1)?;
    Ok((day_start(start), day_start(after_end)))
}

/// Resolve optional `start`/`end` query dates into an inclusive range.
///
/// A missing end is today; a missing start is `default_days` before the end.
pub fn resolve_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    default_days: i64,
) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let end = check_query_date(end.unwrap_or_else(today))?;
    let start = match start {
        Some(start) => check_query_date(start)?,
        None => shift_days(end, -(default_days - 1))?,
    };

    if start > end {
        return Err(ApiError::Validation("start must not be after end".to_string()));
    }
    if (end - start).num_days() + 1 > MAX_RANGE_DAYS {
        return Err(ApiError::Validation(format!(
            "Date range cannot exceed {} days",
            MAX_RANGE_DAYS
        )));
    }

    Ok((start, end))
}
