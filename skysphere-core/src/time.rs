//! Civil time and Julian Dates.
//!
//! [`Instant`] is a thin newtype over a UTC wall-clock moment with second
//! resolution — the form observers and catalogs speak. Everything the engine
//! computes internally runs on the [`JulianDate`] derived from it.
//!
//! The calendar conversion is the standard Gregorian algorithm: January and
//! February are counted as months 13 and 14 of the previous year, and the
//! Gregorian reform correction is `b = 2 − ⌊y/100⌋ + ⌊y/400⌋`. Valid for
//! all dates after the 1582 reform, which comfortably covers every catalog
//! epoch in scope.

use crate::constants::{DAYS_PER_JULIAN_CENTURY, J2000_JD, SECONDS_PER_DAY};
use crate::errors::{AstroError, AstroResult};
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use std::fmt;

/// A continuous Julian Date (days since 4713 BC January 1.5).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDate(f64);

impl JulianDate {
    #[inline]
    pub fn new(jd: f64) -> Self {
        Self(jd)
    }

    pub fn j2000() -> Self {
        Self(J2000_JD)
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Days elapsed since the J2000.0 epoch (negative before it).
    #[inline]
    pub fn days_since_j2000(&self) -> f64 {
        self.0 - J2000_JD
    }

    /// Julian centuries elapsed since J2000.0.
    #[inline]
    pub fn julian_centuries(&self) -> f64 {
        self.days_since_j2000() / DAYS_PER_JULIAN_CENTURY
    }

    #[inline]
    pub fn add_days(&self, days: f64) -> Self {
        Self(self.0 + days)
    }

    #[inline]
    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self(self.0 + seconds / SECONDS_PER_DAY)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.6}", self.0)
    }
}

impl From<f64> for JulianDate {
    fn from(jd: f64) -> Self {
        Self(jd)
    }
}

/// A civil UTC moment with second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instant(DateTime<Utc>);

impl Instant {
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Builds an instant from calendar components.
    ///
    /// # Errors
    /// Returns [`AstroError::InvalidDate`] when the components do not name a
    /// real UTC moment (month 13, February 30, second 61, ...).
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> AstroResult<Self> {
        match Utc.with_ymd_and_hms(year, month, day, hour, minute, second) {
            chrono::LocalResult::Single(dt) => Ok(Self(dt)),
            _ => Err(AstroError::invalid_date(
                year,
                month,
                day,
                "components do not form a valid UTC moment",
            )),
        }
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Calendar (month, day) pair, used by the meteor-shower activity check.
    pub fn month_day(&self) -> (u32, u32) {
        (self.0.month(), self.0.day())
    }

    /// Converts to a Julian Date with the standard Gregorian algorithm.
    pub fn julian_date(&self) -> JulianDate {
        let mut y = self.0.year() as f64;
        let mut m = self.0.month() as f64;
        if m <= 2.0 {
            y -= 1.0;
            m += 12.0;
        }
        let a = libm::floor(y / 100.0);
        let b = 2.0 - a + libm::floor(a / 4.0);

        let day_fraction = (self.0.hour() as f64
            + self.0.minute() as f64 / 60.0
            + self.0.second() as f64 / 3600.0)
            / 24.0;

        let jd = libm::floor(365.25 * (y + 4716.0))
            + libm::floor(30.6001 * (m + 1.0))
            + self.0.day() as f64
            + day_fraction
            + b
            - 1524.5;
        JulianDate::new(jd)
    }

    #[inline]
    pub fn add_days(&self, days: f64) -> Self {
        self.add_seconds(days * SECONDS_PER_DAY)
    }

    #[inline]
    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self(self.0 + chrono::Duration::milliseconds((seconds * 1000.0) as i64))
    }

    /// Signed seconds from `self` to `other`.
    pub fn seconds_until(&self, other: &Instant) -> f64 {
        (other.0 - self.0).num_milliseconds() as f64 / 1000.0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_epoch_round_trips() {
        // 2000-01-01 12:00:00 UTC is JD 2451545.0 by definition.
        let instant = Instant::from_ymd_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((instant.julian_date().value() - 2451545.0).abs() < 1e-9);
    }

    #[test]
    fn known_julian_dates() {
        // Meeus, Astronomical Algorithms, example 7.a: 1957-10-04.81 UT.
        let sputnik = Instant::from_ymd_hms(1957, 10, 4, 19, 26, 24).unwrap();
        assert!((sputnik.julian_date().value() - 2436116.31).abs() < 1e-4);

        // Unix epoch.
        let unix = Instant::from_ymd_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert!((unix.julian_date().value() - 2440587.5).abs() < 1e-9);
    }

    #[test]
    fn january_reduces_to_previous_year() {
        // A January date exercises the (year-1, month+12) branch.
        let instant = Instant::from_ymd_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert!((instant.julian_date().value() - 2460324.5).abs() < 1e-9);
    }

    #[test]
    fn day_fraction_from_time_of_day() {
        let midnight = Instant::from_ymd_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let noon = Instant::from_ymd_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let diff = noon.julian_date().value() - midnight.julian_date().value();
        assert!((diff - 0.5).abs() < 1e-9);
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(Instant::from_ymd_hms(2024, 2, 30, 0, 0, 0).is_err());
        assert!(Instant::from_ymd_hms(2024, 13, 1, 0, 0, 0).is_err());
        assert!(Instant::from_ymd_hms(2024, 1, 1, 24, 0, 0).is_err());
    }

    #[test]
    fn julian_centuries_at_one_century() {
        let jd = JulianDate::new(J2000_JD + 36525.0);
        assert!((jd.julian_centuries() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn instant_arithmetic() {
        let t0 = Instant::from_ymd_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let t1 = t0.add_days(1.5);
        assert!((t0.seconds_until(&t1) - 1.5 * 86_400.0).abs() < 1e-3);
        let jd_diff = t1.julian_date().value() - t0.julian_date().value();
        assert!((jd_diff - 1.5).abs() < 1e-9);
    }
}
