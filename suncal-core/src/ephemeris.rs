//! Solar event lookup.
//!
//! The generator only depends on [`SolarEphemeris`]; [`SpaEphemeris`] is the
//! production implementation backed by the NREL Solar Position Algorithm.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use solar_positioning::time::DeltaT;
use solar_positioning::{Horizon, SunriseResult, spa};

use crate::error::{SunCalError, SunCalResult};
use crate::location::Location;

/// Dawn, sunrise, sunset and dusk for one calendar date, in the location's timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySolarTimes {
    /// Start of morning civil twilight. `None` when twilight lasts all night.
    pub dawn: Option<DateTime<Tz>>,
    pub sunrise: DateTime<Tz>,
    pub sunset: DateTime<Tz>,
    /// End of evening civil twilight. `None` when twilight lasts all night.
    pub dusk: Option<DateTime<Tz>>,
}

/// Source of per-day solar times.
pub trait SolarEphemeris {
    /// Fails with [`SunCalError::Ephemeris`] when the sun does not rise or set
    /// on `date` (polar day or night) or the computation itself fails.
    fn solar_times(&self, location: &Location, date: NaiveDate) -> SunCalResult<DaySolarTimes>;
}

/// SPA-based ephemeris from the `solar-positioning` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaEphemeris;

impl SolarEphemeris for SpaEphemeris {
    fn solar_times(&self, location: &Location, date: NaiveDate) -> SunCalResult<DaySolarTimes> {
        let delta_t = DeltaT::estimate_from_date(date.year(), date.month())
            .map_err(|e| SunCalError::ephemeris(date, e.to_string()))?;
        let day_start = local_day_start(date, location.timezone())?;

        let (sunrise, sunset) =
            match rise_and_set(location, date, day_start, delta_t, Horizon::SunriseSunset)? {
                SunriseResult::RegularDay {
                    sunrise, sunset, ..
                } => (sunrise, sunset),
                SunriseResult::AllDay { .. } => {
                    return Err(SunCalError::ephemeris(date, "sun never sets (polar day)"));
                }
                SunriseResult::AllNight { .. } => {
                    return Err(SunCalError::ephemeris(date, "sun never rises (polar night)"));
                }
            };

        // Civil twilight can last all night while the sun still rises and sets.
        let (dawn, dusk) =
            match rise_and_set(location, date, day_start, delta_t, Horizon::CivilTwilight)? {
                SunriseResult::RegularDay {
                    sunrise, sunset, ..
                } => (Some(sunrise), Some(sunset)),
                _ => (None, None),
            };

        Ok(DaySolarTimes {
            dawn,
            sunrise,
            sunset,
            dusk,
        })
    }
}

fn rise_and_set(
    location: &Location,
    date: NaiveDate,
    day_start: DateTime<Tz>,
    delta_t: f64,
    horizon: Horizon,
) -> SunCalResult<SunriseResult<DateTime<Tz>>> {
    spa::sunrise_sunset_for_horizon(
        day_start,
        location.latitude(),
        location.longitude(),
        delta_t,
        horizon,
    )
    .map_err(|e| SunCalError::ephemeris(date, e.to_string()))
}

/// First instant of `date` in `tz`.
///
/// Zones that change clocks at midnight skip 00:00 on the transition day, so
/// the first valid hour is used instead.
fn local_day_start(date: NaiveDate, tz: Tz) -> SunCalResult<DateTime<Tz>> {
    (0..3)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .find_map(|time| tz.from_local_datetime(&date.and_time(time)).earliest())
        .ok_or_else(|| SunCalError::ephemeris(date, format!("no local midnight in {}", tz.name())))
}
