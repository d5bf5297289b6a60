//! Leave date parsing and the date rules applied at application time.
//!
//! Dates keep the offset the client wrote them in, so the calendar-date
//! rules see the same day the applicant did. They are converted to UTC only
//! for storage.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::shared::error::SharedError;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a date as sent by clients
///
/// Accepts `YYYY-MM-DD` (midnight UTC), RFC 3339 with an offset or `Z`, and
/// a naive date-time which is taken as UTC.
pub fn parse_leave_date(value: &str) -> Result<DateTime<FixedOffset>, SharedError> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc().fixed_offset());
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime);
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| SharedError::validation("date", format!("Invalid date format: {}", value)))
}

/// Check the calendar-date rules of a leave period
///
/// Only the dates are compared, each in its own offset: a start later today
/// is still "today", and `00:30+08:00` on the 2nd is after `20:00-05:00` on
/// the 1st even though it is the earlier instant.
pub fn validate_dates(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    today: NaiveDate,
) -> Result<(), SharedError> {
    if start.date_naive() < today {
        return Err(SharedError::validation(
            "start_date",
            "Start date cannot be earlier than today",
        ));
    }

    if end.date_naive() < start.date_naive() {
        return Err(SharedError::validation(
            "end_date",
            "End date cannot be earlier than start date",
        ));
    }

    Ok(())
}
