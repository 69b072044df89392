//! Resolution of partial report times into absolute instants.
//!
//! Reports carry only a day-of-month and a time; the month and year are
//! implied by when the report was received. [`resolve_issued`] recovers the
//! issuance instant nearest a reference instant, and [`resolve_relative`]
//! projects validity days forward from an already-resolved issuance.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Timelike, Utc};

/// Resolve a day/hour/minute triple to the absolute instant nearest
/// `reference`.
///
/// Candidate instants are built in the previous, current and next month of
/// the reference; the one closest in time wins. When the day or hour is
/// absent the reference itself is returned, since some TAFs omit their
/// delivery time entirely.
pub fn resolve_issued(
    reference: DateTime<Utc>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: u32,
) -> DateTime<Utc> {
    let (Some(day), Some(hour)) = (day, hour) else {
        return reference;
    };

    let months = [
        reference
            .checked_sub_months(Months::new(1))
            .unwrap_or(reference),
        reference,
        reference
            .checked_add_months(Months::new(1))
            .unwrap_or(reference),
    ];

    months
        .into_iter()
        .map(|base| at_day_time(base, day, hour, minute))
        .min_by_key(|candidate| (*candidate - reference).abs())
        .unwrap_or(reference)
}

/// Project a validity day/hour forward from the issuance instant.
///
/// Validity days never precede the issuance day within one calendar, so a
/// smaller day-of-month means the next month. An end hour of 24 denotes
/// midnight at the close of the day.
pub fn resolve_relative(
    issued: DateTime<Utc>,
    day: u32,
    hour: u32,
    minute: u32,
) -> DateTime<Utc> {
    let base = match day < issued.day() {
        true => issued
            .checked_add_months(Months::new(1))
            .unwrap_or(issued),
        false => issued,
    };
    match hour {
        24 => at_day_time(base, day, 0, minute) + Duration::days(1),
        _ => at_day_time(base, day, hour, minute),
    }
}

/// Set day-of-month and time on `base`, clamping the day to the month's
/// last day when it does not exist there.
fn at_day_time(base: DateTime<Utc>, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    let day = day.clamp(1, days_in_month(base.year(), base.month()));
    base.with_day(day)
        .and_then(|dt| dt.with_hour(hour))
        .and_then(|dt| dt.with_minute(minute))
        .and_then(|dt| dt.with_second(0))
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(base)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next = match month {
        12 => NaiveDate::from_ymd_opt(year + 1, 1, 1),
        _ => NaiveDate::from_ymd_opt(year, month + 1, 1),
    };
    match next.and_then(|d| d.pred_opt()) {
        Some(last) => last.day(),
        None => 28,
    }
}
