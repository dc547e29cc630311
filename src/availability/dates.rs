//! Calendar-date ranges and the persisted booked-range wire shape.
//!
//! Everything here works at calendar-day granularity. Date-times are
//! truncated to their date before they become part of a range, so two
//! instants on the same day always compare equal.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Date format used by reservation records (`2026-01-05`)
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Error raised for a date string that cannot be read as a calendar date
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Invalid date {value:?}: expected YYYY-MM-DD")]
    Malformed { value: String },
}

/// Inclusive calendar-date range.
///
/// `from <= to` is not enforced. An inverted range is vacuous and never
/// conflicts with anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub const fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Build a range from two wall-clock instants, discarding time of day
    pub fn from_datetimes(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self::new(from.date(), to.date())
    }

    /// Parse both ends from ISO date strings
    pub fn parse(from: &str, to: &str) -> Result<Self, DateError> {
        Ok(Self::new(parse_iso_date(from)?, parse_iso_date(to)?))
    }

    /// True when the end precedes the start
    pub fn is_inverted(&self) -> bool {
        self.to < self.from
    }

    /// Inclusive interval intersection: both endpoints count as occupied.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.from <= other.to && other.from <= self.to
    }

    /// Number of calendar days covered, counting both ends. Zero if inverted.
    pub fn days_inclusive(&self) -> i64 {
        if self.is_inverted() {
            0
        } else {
            (self.to - self.from).num_days() + 1
        }
    }
}

/// Persisted reservation span for one property, inclusive on both ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedRange {
    pub from: String,
    pub to: String,
}

impl BookedRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Parse into a calendar-date range
    pub fn to_range(&self) -> Result<DateRange, DateError> {
        DateRange::parse(&self.from, &self.to)
    }
}

impl From<DateRange> for BookedRange {
    fn from(range: DateRange) -> Self {
        Self {
            from: range.from.format(ISO_DATE_FORMAT).to_string(),
            to: range.to.format(ISO_DATE_FORMAT).to_string(),
        }
    }
}

/// Date-time layouts accepted next to RFC 3339
const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse an ISO calendar date.
///
/// Accepts `YYYY-MM-DD`, or a complete timestamp in one of the layouts
/// [`parse_wall_clock`] reads (backend rows such as `2026-01-05T00:00:00Z`),
/// in which case only its date is kept. Anything else is malformed.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, DateError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        return Ok(date);
    }
    parse_date_time(trimmed)
        .map(|dt| dt.date())
        .ok_or_else(|| DateError::Malformed {
            value: value.to_string(),
        })
}

/// Parse a wall-clock instant as the console sends it.
///
/// Accepts a bare date (midnight), a naive date-time, or an RFC 3339
/// timestamp. An offset is not converted: the instant keeps the wall clock
/// it was written in, so the console sends local dates (or its own offset),
/// never timestamps normalized to UTC.
pub fn parse_wall_clock(value: &str) -> Result<NaiveDateTime, DateError> {
    let trimmed = value.trim();
    parse_date_time(trimmed)
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| DateError::Malformed {
            value: value.to_string(),
        })
}

/// Optional wall-clock field: missing or blank means not selected yet
pub fn parse_optional_wall_clock(value: Option<&str>) -> Result<Option<NaiveDateTime>, DateError> {
    match value.map(str::trim) {
        Some(raw) if !raw.is_empty() => parse_wall_clock(raw).map(Some),
        _ => Ok(None),
    }
}

fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_iso_date("2026-01-05").unwrap(), d(2026, 1, 5));
    }

    #[test]
    fn test_parse_discards_time_part() {
        assert_eq!(parse_iso_date("2026-01-05T23:59:00Z").unwrap(), d(2026, 1, 5));
        assert_eq!(parse_iso_date("2026-01-05 08:00:00").unwrap(), d(2026, 1, 5));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in [
            "",
            "tomorrow",
            "2026-13-01",
            "2026-02-30",
            "05/01/2026",
            "2026-01-05Tgarbage",
            "2026-01-05 junk",
            "2026-01-08 not a time",
            "2026-01-05T25:00:00",
        ] {
            let err = parse_iso_date(bad).unwrap_err();
            assert_eq!(err, DateError::Malformed { value: bad.to_string() });
        }
    }

    #[test]
    fn test_parse_wall_clock_forms() {
        let midnight = d(2026, 3, 1).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(parse_wall_clock("2026-03-01").unwrap(), midnight);
        assert_eq!(parse_wall_clock("2026-03-01T00:00:00").unwrap(), midnight);
        assert_eq!(parse_wall_clock("2026-03-01T00:00").unwrap(), midnight);
        assert_eq!(
            parse_wall_clock("2026-03-01T14:30:00.000+02:00").unwrap(),
            d(2026, 3, 1).and_hms_opt(14, 30, 0).unwrap()
        );
        assert_eq!(parse_wall_clock("2026-03-01T23:00:00Z").unwrap().date(), d(2026, 3, 1));
        assert!(parse_wall_clock("yesterday").is_err());
        assert!(parse_wall_clock("2026-03-01Tnoon").is_err());
    }

    #[test]
    fn test_wall_clock_keeps_the_senders_offset() {
        // local midnight east of UTC stays on the picked day
        let local = parse_wall_clock("2026-03-01T00:00:00+01:00").unwrap();
        assert_eq!(local.date(), d(2026, 3, 1));

        // the same instant in UTC is read as the previous evening
        let utc = parse_wall_clock("2026-02-28T23:00:00Z").unwrap();
        assert_eq!(utc.date(), d(2026, 2, 28));
    }

    #[test]
    fn test_optional_wall_clock() {
        assert_eq!(parse_optional_wall_clock(None), Ok(None));
        assert_eq!(parse_optional_wall_clock(Some("  ")), Ok(None));
        assert_eq!(
            parse_optional_wall_clock(Some("2026-03-01")).unwrap().map(|dt| dt.date()),
            Some(d(2026, 3, 1))
        );
        assert!(parse_optional_wall_clock(Some("2026-13-45")).is_err());
    }

    #[test]
    fn test_from_datetimes_truncates_time_of_day() {
        let late = d(2026, 1, 8).and_hms_opt(23, 30, 0).unwrap();
        let early = d(2026, 1, 8).and_hms_opt(0, 5, 0).unwrap();
        let range = DateRange::from_datetimes(late, early);

        // same calendar day, so not inverted despite late > early
        assert!(!range.is_inverted());
        assert_eq!(range.days_inclusive(), 1);
    }

    #[test]
    fn test_overlaps_touching_endpoints() {
        let a = DateRange::new(d(2026, 1, 5), d(2026, 1, 8));
        let b = DateRange::new(d(2026, 1, 8), d(2026, 1, 10));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlaps_disjoint() {
        let a = DateRange::new(d(2026, 1, 5), d(2026, 1, 7));
        let b = DateRange::new(d(2026, 1, 8), d(2026, 1, 10));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_booked_range_from_date_range() {
        let booked = BookedRange::from(DateRange::new(d(2026, 1, 2), d(2026, 1, 6)));
        assert_eq!(booked, BookedRange::new("2026-01-02", "2026-01-06"));
    }
}
