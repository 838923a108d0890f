//! Observer location.

use chrono_tz::Tz;

use crate::error::{SunCalError, SunCalResult};

/// A fixed observer on the ground (elevation 0).
///
/// Built once per run through [`Location::new`], which rejects coordinates
/// outside the valid ranges and timezone ids unknown to the tz database.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    name: String,
    region: String,
    latitude: f64,
    longitude: f64,
    timezone: Tz,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        region: impl Into<String>,
        latitude: f64,
        longitude: f64,
        timezone_id: &str,
    ) -> SunCalResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SunCalError::InvalidLocation(
                "location name must not be empty".into(),
            ));
        }

        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(SunCalError::InvalidLocation(format!(
                "latitude {latitude} is outside -90..=90"
            )));
        }

        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(SunCalError::InvalidLocation(format!(
                "longitude {longitude} is outside -180..=180"
            )));
        }

        let timezone: Tz = timezone_id.parse().map_err(|_| {
            SunCalError::InvalidLocation(format!("unknown timezone '{timezone_id}'"))
        })?;

        Ok(Location {
            name,
            region: region.into(),
            latitude,
            longitude,
            timezone,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// IANA identifier of the location's timezone (e.g. "America/Los_Angeles").
    pub fn timezone_id(&self) -> &'static str {
        self.timezone.name()
    }
}
