//! Inclusive date range to generate events for.

use chrono::{Datelike, NaiveDate};

use crate::error::{SunCalError, SunCalResult};

/// Inclusive range of calendar dates. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> SunCalResult<Self> {
        if start > end {
            return Err(SunCalError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// A range covering a single day.
    pub fn single(date: NaiveDate) -> Self {
        DateRange {
            start: date,
            end: date,
        }
    }

    /// Parse two YYYY-MM-DD strings into a range.
    pub fn from_args(start: &str, end: &str) -> SunCalResult<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range, counting both ends.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Every date from start to end inclusive, one day apart.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Every year touched by the range.
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start.year()..=self.end.year()
    }

    /// `YYYYMMDD_to_YYYYMMDD`, used to tag output file names.
    pub fn file_suffix(&self) -> String {
        format!(
            "{}_to_{}",
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d")
        )
    }
}

/// Parse YYYY-MM-DD
fn parse_date(s: &str) -> SunCalResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| SunCalError::InvalidDate(s.to_string()))
}
