//! Daylight-saving-time transition dates.
//!
//! Uses the US rule: clocks spring forward on the second Sunday of March and
//! fall back on the first Sunday of November.

use chrono::{Datelike, Duration, NaiveDate};

use crate::date_range::DateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DstKind {
    Begins,
    Ends,
}

/// A DST clock change falling on `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstTransition {
    pub kind: DstKind,
    pub date: NaiveDate,
}

impl DstTransition {
    pub fn summary(&self) -> &'static str {
        match self.kind {
            DstKind::Begins => "Daylight Saving Time Begins",
            DstKind::Ends => "Daylight Saving Time Ends",
        }
    }

    pub fn description(&self) -> &'static str {
        match self.kind {
            DstKind::Begins => "Clocks spring forward one hour at 2:00 AM.",
            DstKind::Ends => "Clocks fall back one hour at 2:00 AM.",
        }
    }

    /// Short tag used in event UIDs
    pub fn slug(&self) -> &'static str {
        match self.kind {
            DstKind::Begins => "dst-begins",
            DstKind::Ends => "dst-ends",
        }
    }
}

/// Days from `date` to the next Sunday, 0 if `date` is a Sunday.
fn days_until_sunday(date: NaiveDate) -> i64 {
    let weekday = date.weekday().num_days_from_monday() as i64;
    (6 - weekday) % 7
}

pub fn second_sunday_of_march(year: i32) -> Option<NaiveDate> {
    let march_first = NaiveDate::from_ymd_opt(year, 3, 1)?;
    Some(march_first + Duration::days(days_until_sunday(march_first) + 7))
}

pub fn first_sunday_of_november(year: i32) -> Option<NaiveDate> {
    let november_first = NaiveDate::from_ymd_opt(year, 11, 1)?;
    Some(november_first + Duration::days(days_until_sunday(november_first)))
}

/// Transitions falling inside `range`, in year order with `Begins` before `Ends`.
pub fn transitions_in(range: &DateRange) -> Vec<DstTransition> {
    let mut transitions = Vec::new();

    for year in range.years() {
        let candidates = [
            (DstKind::Begins, second_sunday_of_march(year)),
            (DstKind::Ends, first_sunday_of_november(year)),
        ];

        for (kind, date) in candidates {
            if let Some(date) = date.filter(|d| range.contains(*d)) {
                transitions.push(DstTransition { kind, date });
            }
        }
    }

    transitions
}
