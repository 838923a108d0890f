//! Sun calendar generation.
//!
//! Walks the requested date range, asks the ephemeris for each day's solar
//! times and turns them into a sunrise window and a sunset window. DST
//! markers are appended after the daily events when requested.

use std::path::PathBuf;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::date_range::DateRange;
use crate::dst::{self, DstTransition};
use crate::ephemeris::{DaySolarTimes, SolarEphemeris};
use crate::error::{SunCalError, SunCalResult};
use crate::event::{CalendarEvent, EventTime, Transparency};
use crate::ics::generate_calendar;
use crate::location::Location;
use crate::output::write_calendar;
use crate::utils::slugify;

/// How the sunrise and sunset windows are sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    /// `[dawn, sunrise]` and `[sunset, dusk]`
    #[default]
    TwilightSpan,
    /// `[sunrise, sunrise + minutes]` and `[sunset, sunset + minutes]`
    FixedOffset { minutes: u32 },
}

/// Everything needed for one run. Fully determines the output apart from DTSTAMP.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub location: Location,
    pub range: DateRange,
    pub include_dst_markers: bool,
    pub window_mode: WindowMode,
    pub output_path: PathBuf,
}

/// A date the ephemeris could not produce usable times for.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDay {
    pub date: NaiveDate,
    pub reason: String,
}

/// Events computed for a request, plus the days that were left out.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    pub events: Vec<CalendarEvent>,
    pub skipped: Vec<SkippedDay>,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub path: PathBuf,
    pub payload: Vec<u8>,
    pub event_count: usize,
    pub skipped: Vec<SkippedDay>,
}

pub struct Generator<E> {
    ephemeris: E,
}

impl<E: SolarEphemeris> Generator<E> {
    pub fn new(ephemeris: E) -> Self {
        Generator { ephemeris }
    }

    /// Build every event for `request`, stamping each with `stamp`.
    ///
    /// Days the ephemeris fails on are logged and recorded in
    /// [`Generation::skipped`]; they never abort the run.
    pub fn events(&self, request: &GenerationRequest, stamp: DateTime<Tz>) -> Generation {
        let mut generation = Generation::default();
        let location = &request.location;

        for date in request.range.days() {
            let day_events = self
                .ephemeris
                .solar_times(location, date)
                .and_then(|times| solar_events(request, date, &times, stamp));

            match day_events {
                Ok([sunrise, sunset]) => {
                    debug!(%date, sunrise = %sunrise.summary, sunset = %sunset.summary, "computed solar window");
                    generation.events.push(sunrise);
                    generation.events.push(sunset);
                }
                Err(e) => {
                    warn!(%date, location = location.name(), "skipping day: {e}");
                    let reason = match e {
                        SunCalError::Ephemeris { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    generation.skipped.push(SkippedDay { date, reason });
                }
            }
        }

        if request.include_dst_markers {
            for transition in dst::transitions_in(&request.range) {
                debug!(date = %transition.date, "adding DST marker");
                generation
                    .events
                    .push(dst_event(&transition, location, stamp));
            }
        }

        generation
    }

    /// Build the events and serialize them into an ICS payload.
    pub fn render(
        &self,
        request: &GenerationRequest,
        stamp: DateTime<Tz>,
    ) -> SunCalResult<(Generation, Vec<u8>)> {
        let generation = self.events(request, stamp);
        let ics = generate_calendar(&generation.events, &calendar_name(&request.location))?;
        Ok((generation, ics.into_bytes()))
    }

    /// Render the calendar as of now and write it to `request.output_path`.
    pub fn generate(&self, request: &GenerationRequest) -> SunCalResult<GenerationOutput> {
        let stamp = Utc::now().with_timezone(&request.location.timezone());
        let (generation, payload) = self.render(request, stamp)?;

        write_calendar(&request.output_path, &payload)?;
        info!(
            path = %request.output_path.display(),
            events = generation.events.len(),
            skipped = generation.skipped.len(),
            "wrote calendar"
        );

        Ok(GenerationOutput {
            path: request.output_path.clone(),
            payload,
            event_count: generation.events.len(),
            skipped: generation.skipped,
        })
    }
}

/// Calendar display name (X-WR-CALNAME)
pub fn calendar_name(location: &Location) -> String {
    format!("Dawn to Dusk: {}", location.name())
}

/// Sunrise and sunset windows for one day.
fn solar_events(
    request: &GenerationRequest,
    date: NaiveDate,
    times: &DaySolarTimes,
    stamp: DateTime<Tz>,
) -> SunCalResult<[CalendarEvent; 2]> {
    let location = &request.location;

    let (sunrise_window, sunset_window, sunrise_desc, sunset_desc) = match request.window_mode {
        WindowMode::TwilightSpan => {
            let (Some(dawn), Some(dusk)) = (times.dawn, times.dusk) else {
                return Err(SunCalError::ephemeris(
                    date,
                    "civil twilight lasts all night, no dawn or dusk",
                ));
            };
            (
                (dawn, times.sunrise),
                (times.sunset, dusk),
                Some(format!("Dawn {}, sunrise {}", hhmm(dawn), hhmm(times.sunrise))),
                Some(format!("Sunset {}, dusk {}", hhmm(times.sunset), hhmm(dusk))),
            )
        }
        WindowMode::FixedOffset { minutes } => {
            let offset = Duration::minutes(i64::from(minutes));
            (
                (times.sunrise, times.sunrise + offset),
                (times.sunset, times.sunset + offset),
                None,
                None,
            )
        }
    };

    for (label, (start, end)) in [("sunrise", sunrise_window), ("sunset", sunset_window)] {
        if start >= end {
            return Err(SunCalError::ephemeris(
                date,
                format!("{label} window is empty ({start} to {end})"),
            ));
        }
    }

    let (sunrise_summary, sunset_summary) = match request.window_mode {
        WindowMode::TwilightSpan => (
            format!("☀️ Sunrise {}", hhmm(times.sunrise)),
            format!("🌙 Sunset {}", hhmm(times.sunset)),
        ),
        WindowMode::FixedOffset { .. } => ("☀️ Sunrise".to_string(), "🌙 Sunset".to_string()),
    };

    let slug = slugify(location.name());
    let day = date.format("%Y%m%d");

    let sunrise = CalendarEvent {
        uid: format!("sunrise-{day}-{slug}@suncal"),
        summary: sunrise_summary,
        start: EventTime::DateTime(sunrise_window.0),
        end: EventTime::DateTime(sunrise_window.1),
        stamp,
        location: location.name().to_string(),
        transparency: None,
        description: sunrise_desc,
    };

    let sunset = CalendarEvent {
        uid: format!("sunset-{day}-{slug}@suncal"),
        summary: sunset_summary,
        start: EventTime::DateTime(sunset_window.0),
        end: EventTime::DateTime(sunset_window.1),
        stamp,
        location: location.name().to_string(),
        transparency: None,
        description: sunset_desc,
    };

    Ok([sunrise, sunset])
}

/// All-day, non-blocking marker for a DST clock change.
fn dst_event(
    transition: &DstTransition,
    location: &Location,
    stamp: DateTime<Tz>,
) -> CalendarEvent {
    CalendarEvent {
        uid: format!(
            "{}-{}-{}@suncal",
            transition.slug(),
            transition.date.format("%Y%m%d"),
            slugify(location.name())
        ),
        summary: transition.summary().to_string(),
        start: EventTime::Date(transition.date),
        end: EventTime::Date(transition.date + Duration::days(1)),
        stamp,
        location: location.name().to_string(),
        transparency: Some(Transparency::Transparent),
        description: Some(transition.description().to_string()),
    }
}

fn hhmm(time: DateTime<Tz>) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Fixed local times every day: dawn 05:30, sunrise 06:00, sunset 20:00, dusk 20:30.
    struct FakeEphemeris {
        fail_on: Vec<NaiveDate>,
        sunrise_equals_dawn: bool,
        white_nights: bool,
    }

    impl FakeEphemeris {
        fn new() -> Self {
            FakeEphemeris {
                fail_on: vec![],
                sunrise_equals_dawn: false,
                white_nights: false,
            }
        }
    }

    impl SolarEphemeris for FakeEphemeris {
        fn solar_times(&self, location: &Location, date: NaiveDate) -> SunCalResult<DaySolarTimes> {
            if self.fail_on.contains(&date) {
                return Err(SunCalError::ephemeris(date, "sun never rises"));
            }
            let at = |h, m| local(location, date, h, m);
            let twilight = |t| (!self.white_nights).then_some(t);
            Ok(DaySolarTimes {
                dawn: twilight(at(5, 30)),
                sunrise: if self.sunrise_equals_dawn { at(5, 30) } else { at(6, 0) },
                sunset: at(20, 0),
                dusk: twilight(at(20, 30)),
            })
        }
    }

    fn local(location: &Location, date: NaiveDate, h: u32, m: u32) -> DateTime<Tz> {
        location
            .timezone()
            .from_local_datetime(&date.and_hms_opt(h, m, 0).unwrap())
            .single()
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn san_francisco() -> Location {
        Location::new("San Francisco", "USA", 37.7749, -122.4194, "America/Los_Angeles").unwrap()
    }

    fn request(start: NaiveDate, end: NaiveDate) -> GenerationRequest {
        GenerationRequest {
            location: san_francisco(),
            range: DateRange::new(start, end).unwrap(),
            include_dst_markers: false,
            window_mode: WindowMode::TwilightSpan,
            output_path: PathBuf::from("unused.ics"),
        }
    }

    fn stamp() -> DateTime<Tz> {
        chrono_tz::America::Los_Angeles
            .with_ymd_and_hms(2025, 6, 15, 9, 0, 0)
            .single()
            .unwrap()
    }

    #[test]
    fn emits_two_events_per_day_in_date_order() {
        let req = request(date(2025, 7, 1), date(2025, 7, 10));
        let generation = Generator::new(FakeEphemeris::new()).events(&req, stamp());

        assert_eq!(generation.events.len() as i64, 2 * req.range.num_days());
        assert!(generation.skipped.is_empty());

        for (i, pair) in generation.events.chunks(2).enumerate() {
            let day = date(2025, 7, 1) + Duration::days(i as i64);
            assert!(pair[0].summary.contains("Sunrise"));
            assert!(pair[1].summary.contains("Sunset"));
            assert_eq!(pair[0].start.date(), day);
            assert_eq!(pair[1].start.date(), day);
        }
    }

    #[test]
    fn twilight_span_windows() {
        let req = request(date(2025, 7, 1), date(2025, 7, 1));
        let loc = san_francisco();
        let events = Generator::new(FakeEphemeris::new()).events(&req, stamp()).events;

        let sunrise = &events[0];
        assert_eq!(sunrise.summary, "☀️ Sunrise 06:00");
        assert_eq!(sunrise.start, EventTime::DateTime(local(&loc, date(2025, 7, 1), 5, 30)));
        assert_eq!(sunrise.end, EventTime::DateTime(local(&loc, date(2025, 7, 1), 6, 0)));
        assert_eq!(sunrise.description.as_deref(), Some("Dawn 05:30, sunrise 06:00"));

        let sunset = &events[1];
        assert_eq!(sunset.summary, "🌙 Sunset 20:00");
        assert_eq!(sunset.start, EventTime::DateTime(local(&loc, date(2025, 7, 1), 20, 0)));
        assert_eq!(sunset.end, EventTime::DateTime(local(&loc, date(2025, 7, 1), 20, 30)));
    }

    #[test]
    fn fixed_offset_windows() {
        let mut req = request(date(2025, 7, 1), date(2025, 7, 1));
        req.window_mode = WindowMode::FixedOffset { minutes: 15 };
        let loc = san_francisco();
        let events = Generator::new(FakeEphemeris::new()).events(&req, stamp()).events;

        assert_eq!(events[0].summary, "☀️ Sunrise");
        assert_eq!(events[0].start, EventTime::DateTime(local(&loc, date(2025, 7, 1), 6, 0)));
        assert_eq!(events[0].end, EventTime::DateTime(local(&loc, date(2025, 7, 1), 6, 15)));
        assert_eq!(events[1].summary, "🌙 Sunset");
        assert_eq!(events[1].end, EventTime::DateTime(local(&loc, date(2025, 7, 1), 20, 15)));
        assert!(events.iter().all(|e| e.description.is_none()));
    }

    #[test]
    fn every_event_shares_stamp_and_location() {
        let req = request(date(2025, 7, 1), date(2025, 7, 3));
        let events = Generator::new(FakeEphemeris::new()).events(&req, stamp()).events;

        assert!(events.iter().all(|e| e.stamp == stamp()));
        assert!(events.iter().all(|e| e.location == "San Francisco"));
        assert!(events.iter().all(|e| !e.is_all_day()));
        assert!(events.iter().all(|e| e.transparency.is_none()));
    }

    #[test]
    fn uids_are_unique_and_stable() {
        let req = request(date(2025, 7, 1), date(2025, 7, 3));
        let generator = Generator::new(FakeEphemeris::new());
        let first = generator.events(&req, stamp()).events;
        let second = generator.events(&req, stamp() + Duration::hours(5)).events;

        let uids: Vec<_> = first.iter().map(|e| e.uid.clone()).collect();
        let mut deduped = uids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), uids.len());
        assert_eq!(uids[0], "sunrise-20250701-san-francisco@suncal");
        assert_eq!(
            uids,
            second.iter().map(|e| e.uid.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn failed_day_is_skipped_and_run_continues() {
        let req = request(date(2025, 7, 1), date(2025, 7, 3));
        let ephemeris = FakeEphemeris {
            fail_on: vec![date(2025, 7, 2)],
            ..FakeEphemeris::new()
        };
        let generation = Generator::new(ephemeris).events(&req, stamp());

        assert_eq!(generation.events.len(), 4);
        assert_eq!(
            generation.skipped,
            vec![SkippedDay {
                date: date(2025, 7, 2),
                reason: "sun never rises".to_string(),
            }]
        );
        assert!(generation.events.iter().all(|e| e.start.date() != date(2025, 7, 2)));
    }

    #[test]
    fn empty_window_is_rejected() {
        let req = request(date(2025, 7, 1), date(2025, 7, 1));
        let ephemeris = FakeEphemeris {
            sunrise_equals_dawn: true,
            ..FakeEphemeris::new()
        };
        let generation = Generator::new(ephemeris).events(&req, stamp());

        assert!(generation.events.is_empty());
        assert_eq!(generation.skipped.len(), 1);
        assert!(generation.skipped[0].reason.contains("sunrise window is empty"));
    }

    #[test]
    fn missing_twilight_only_matters_for_twilight_span() {
        let white_nights = || FakeEphemeris {
            white_nights: true,
            ..FakeEphemeris::new()
        };

        let mut req = request(date(2025, 6, 20), date(2025, 6, 22));
        let generation = Generator::new(white_nights()).events(&req, stamp());
        assert!(generation.events.is_empty());
        assert_eq!(generation.skipped.len(), 3);
        assert!(generation.skipped[0].reason.contains("civil twilight"));

        req.window_mode = WindowMode::FixedOffset { minutes: 15 };
        let generation = Generator::new(white_nights()).events(&req, stamp());
        assert_eq!(generation.events.len(), 6);
        assert!(generation.skipped.is_empty());
    }

    #[test]
    fn dst_markers_follow_daily_events() {
        let mut req = request(date(2025, 1, 1), date(2025, 12, 31));
        req.include_dst_markers = true;
        let events = Generator::new(FakeEphemeris::new()).events(&req, stamp()).events;

        assert_eq!(events.len(), 2 * 365 + 2);

        let begins = &events[events.len() - 2];
        assert_eq!(begins.summary, "Daylight Saving Time Begins");
        assert_eq!(begins.start, EventTime::Date(date(2025, 3, 9)));
        assert_eq!(begins.end, EventTime::Date(date(2025, 3, 10)));
        assert!(begins.is_all_day());
        assert_eq!(begins.transparency, Some(Transparency::Transparent));
        assert!(begins.description.is_some());

        let ends = &events[events.len() - 1];
        assert_eq!(ends.summary, "Daylight Saving Time Ends");
        assert_eq!(ends.start, EventTime::Date(date(2025, 11, 2)));
        assert_eq!(ends.end, EventTime::Date(date(2025, 11, 3)));
        assert!(ends.is_all_day());
    }

    #[test]
    fn dst_markers_off_by_default() {
        let req = request(date(2025, 3, 1), date(2025, 3, 31));
        let events = Generator::new(FakeEphemeris::new()).events(&req, stamp()).events;
        assert!(events.iter().all(|e| !e.summary.contains("Daylight")));
    }

    #[test]
    fn dst_markers_outside_range_are_omitted() {
        let mut req = request(date(2025, 4, 1), date(2025, 10, 31));
        req.include_dst_markers = true;
        let events = Generator::new(FakeEphemeris::new()).events(&req, stamp()).events;
        assert_eq!(events.len() as i64, 2 * req.range.num_days());
    }

    #[test]
    fn render_differs_only_in_dtstamp() {
        let mut req = request(date(2025, 3, 1), date(2025, 3, 15));
        req.include_dst_markers = true;
        let generator = Generator::new(FakeEphemeris::new());

        let (_, first) = generator.render(&req, stamp()).unwrap();
        let (_, second) = generator.render(&req, stamp() + Duration::days(3)).unwrap();
        assert_ne!(first, second);

        let without_stamp = |bytes: &[u8]| {
            String::from_utf8(bytes.to_vec())
                .unwrap()
                .lines()
                .filter(|l| !l.starts_with("DTSTAMP"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        assert_eq!(without_stamp(&first), without_stamp(&second));
    }
}
