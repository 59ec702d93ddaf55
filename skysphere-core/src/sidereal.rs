//! Greenwich and local mean sidereal time.
//!
//! Uses the IAU 1982 expression in its hours form: GMST at the previous UT
//! midnight from the polynomial in Julian centuries, advanced through the
//! day at the sidereal rate 1.00273790935. Good to a few milliseconds of
//! time over the catalog epochs in scope, which is far below the engine's
//! arcminute-level ephemeris accuracy.

use crate::angle::wrap_hours;
use crate::constants::{DAYS_PER_JULIAN_CENTURY, DEGREES_PER_HOUR, HOURS_PER_DAY, SIDEREAL_RATE};
use crate::time::JulianDate;

/// Greenwich Mean Sidereal Time in hours, `[0, 24)`.
pub fn gmst_hours(jd: JulianDate) -> f64 {
    let jd_value = jd.value();

    // Split into the preceding UT midnight and the elapsed UT hours.
    let jd0 = libm::floor(jd_value - 0.5) + 0.5;
    let ut_hours = (jd_value - jd0) * HOURS_PER_DAY;

    let d0 = jd0 - 2451545.0;
    let t = d0 / DAYS_PER_JULIAN_CENTURY;

    let gmst = 6.697374558 + 0.06570982441908 * d0 + SIDEREAL_RATE * ut_hours + 0.000026 * t * t;

    wrap_hours(gmst)
}

/// Local Mean Sidereal Time in hours, `[0, 24)`.
///
/// East longitudes advance the local clock: 15° of longitude is one hour.
pub fn lst_hours(gmst: f64, longitude_deg: f64) -> f64 {
    wrap_hours(gmst + longitude_deg / DEGREES_PER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Instant;

    #[test]
    fn gmst_at_j2000_noon() {
        // GMST at 2000-01-01 12:00 UT is 18h 41m 50.548s ≈ 18.697h.
        let jd = Instant::from_ymd_hms(2000, 1, 1, 12, 0, 0)
            .unwrap()
            .julian_date();
        let gmst = gmst_hours(jd);
        assert!(
            (gmst - 18.697374558).abs() < 1e-3,
            "GMST at J2000 should be ~18.6974h, got {}",
            gmst
        );
    }

    #[test]
    fn gmst_meeus_example() {
        // Meeus example 12.b: 1987-04-10 19:21:00 UT -> GMST 8h 34m 57.0896s.
        let jd = Instant::from_ymd_hms(1987, 4, 10, 19, 21, 0)
            .unwrap()
            .julian_date();
        let gmst = gmst_hours(jd);
        let expected = 8.0 + 34.0 / 60.0 + 57.0896 / 3600.0;
        assert!(
            (gmst - expected).abs() < 1e-3,
            "expected {}, got {}",
            expected,
            gmst
        );
    }

    #[test]
    fn one_ut_day_advances_by_sidereal_offset() {
        // A UT day is ~3m 56.6s longer than a sidereal day, so GMST gains
        // ~0.0657 hours per day.
        let jd = Instant::from_ymd_hms(2024, 6, 1, 0, 0, 0)
            .unwrap()
            .julian_date();
        let g0 = gmst_hours(jd);
        let g1 = gmst_hours(jd.add_days(1.0));
        let gain = wrap_hours(g1 - g0);
        assert!(
            (gain - 0.0657098).abs() < 1e-4,
            "daily GMST gain should be ~0.06571h, got {}",
            gain
        );
    }

    #[test]
    fn gmst_always_in_range() {
        for offset in [-40000.0, -1.25, 0.0, 0.33, 17.9, 36525.0, 100_000.0] {
            let g = gmst_hours(JulianDate::new(2451545.0 + offset));
            assert!((0.0..24.0).contains(&g), "GMST out of range: {}", g);
        }
    }

    #[test]
    fn lst_wraps_longitude() {
        assert!((lst_hours(12.0, 0.0) - 12.0).abs() < 1e-12);
        assert!((lst_hours(12.0, 90.0) - 18.0).abs() < 1e-12);
        assert!((lst_hours(23.0, 30.0) - 1.0).abs() < 1e-12);
        assert!((lst_hours(1.0, -30.0) - 23.0).abs() < 1e-12);
    }
}
