//! Core types for suncal.
//!
//! This crate turns a location and a date range into a calendar of sunrise and
//! sunset windows:
//! - `location` and `date_range` describe what to compute
//! - `ephemeris` looks up dawn, sunrise, sunset and dusk for a single day
//! - `generator` builds the events and `ics` serializes them
//! - `output` derives the destination path and writes the file

pub mod date_range;
pub mod dst;
pub mod ephemeris;
pub mod error;
pub mod event;
pub mod generator;
pub mod ics;
pub mod location;
pub mod output;
mod utils;

pub use date_range::DateRange;
pub use ephemeris::{DaySolarTimes, SolarEphemeris, SpaEphemeris};
pub use error::{SunCalError, SunCalResult};
pub use event::{CalendarEvent, EventTime, Transparency};
pub use generator::{GenerationOutput, GenerationRequest, Generator, WindowMode};
pub use location::Location;
