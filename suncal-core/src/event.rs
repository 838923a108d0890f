//! Calendar event types.
//!
//! These are the records handed to the ICS serializer. Solar windows carry
//! zoned instants; DST markers carry plain dates.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

/// A calendar event ready for serialization
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    /// Stable identifier, derived from the event kind, date and location
    pub uid: String,
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
    /// Generation time (DTSTAMP)
    pub stamp: DateTime<Tz>,
    pub location: String,
    /// Busy/free status; omitted from the output when `None`
    pub transparency: Option<Transparency>,
    pub description: Option<String>,
}

impl CalendarEvent {
    /// All-day events carry calendar dates rather than instants.
    pub fn is_all_day(&self) -> bool {
        matches!(
            (&self.start, &self.end),
            (EventTime::Date(_), EventTime::Date(_))
        )
    }
}

/// Event transparency (busy/free status)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transparency {
    /// Event blocks time on calendar
    Opaque,
    /// Event does not block time (shows as free)
    Transparent,
}

impl Transparency {
    pub fn as_ics_str(&self) -> &'static str {
        match self {
            Transparency::Opaque => "OPAQUE",
            Transparency::Transparent => "TRANSPARENT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventTime {
    /// Date-only value (all-day events)
    Date(NaiveDate),
    /// Instant qualified by an IANA timezone
    DateTime(DateTime<Tz>),
}

impl EventTime {
    pub fn date(&self) -> NaiveDate {
        match self {
            EventTime::Date(d) => *d,
            EventTime::DateTime(dt) => dt.date_naive(),
        }
    }
}
