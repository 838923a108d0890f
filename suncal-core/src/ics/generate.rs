//! ICS file generation.

use chrono::Utc;
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::error::{SunCalError, SunCalResult};
use crate::event::{CalendarEvent, EventTime};

const PRODID: &str = "-//suncal//Dawn to Dusk//EN";

/// Serialize `events`, in order, into one calendar document.
pub fn generate_calendar(events: &[CalendarEvent], calendar_name: &str) -> SunCalResult<String> {
    let mut cal = Calendar::new();
    cal.name(calendar_name);

    for event in events {
        check_bounds(event)?;
        cal.push(build_event(event));
    }

    let cal = cal.done();
    Ok(strip_ics_bloat(&cal.to_string()))
}

/// DTSTART and DTEND must share a value type and DTEND must come later (RFC 5545 3.6.1).
fn check_bounds(event: &CalendarEvent) -> SunCalResult<()> {
    let ordered = match (&event.start, &event.end) {
        (EventTime::Date(start), EventTime::Date(end)) => start < end,
        (EventTime::DateTime(start), EventTime::DateTime(end)) => start < end,
        _ => {
            return Err(SunCalError::IcsGenerate(format!(
                "{}: DTSTART and DTEND mix a date with a date-time",
                event.uid
            )));
        }
    };

    if !ordered {
        return Err(SunCalError::IcsGenerate(format!(
            "{}: DTEND is not after DTSTART",
            event.uid
        )));
    }
    Ok(())
}

fn build_event(event: &CalendarEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);

    // DTSTAMP is always UTC per RFC 5545
    let dtstamp = event
        .stamp
        .with_timezone(&Utc)
        .format("%Y%m%dT%H%M%SZ")
        .to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    ics_event.summary(&event.summary);

    add_datetime_property(&mut ics_event, "DTSTART", &event.start);
    add_datetime_property(&mut ics_event, "DTEND", &event.end);

    ics_event.location(&event.location);

    if let Some(ref desc) = event.description {
        ics_event.description(desc);
    }

    if let Some(transparency) = event.transparency {
        ics_event.add_property("TRANSP", transparency.as_ics_str());
    }

    ics_event.done()
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with ours
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add a date or zoned datetime property
fn add_datetime_property(ics_event: &mut icalendar::Event, name: &str, time: &EventTime) {
    match time {
        EventTime::Date(d) => {
            let mut prop = Property::new(name, d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            ics_event.append_property(prop);
        }
        EventTime::DateTime(dt) => {
            let mut prop = Property::new(name, dt.format("%Y%m%dT%H%M%S").to_string());
            prop.add_parameter("TZID", dt.timezone().name());
            ics_event.append_property(prop);
        }
    }
}
