//! Sexagesimal formatting for the coordinate types.
//!
//! Right ascension prints as `HHh MMm SS.Ss`, declination and altitude as
//! `±DD° MM′ SS″`. Rounding is done at the smallest displayed unit and
//! carries correctly (59.95″ does not print as 60″).

/// Splits a non-negative value into sexagesimal parts, rounding the
/// smallest unit to `decimals` places and carrying overflow upward.
fn sexagesimal(value: f64, decimals: u32) -> (u32, u32, f64) {
    let scale = 10f64.powi(decimals as i32);
    let total_seconds = (value.abs() * 3600.0 * scale).round() / scale;

    let mut degrees = (total_seconds / 3600.0) as u32;
    let mut minutes = ((total_seconds - degrees as f64 * 3600.0) / 60.0) as u32;
    let mut seconds = total_seconds - degrees as f64 * 3600.0 - minutes as f64 * 60.0;

    if seconds >= 60.0 {
        seconds -= 60.0;
        minutes += 1;
    }
    if minutes >= 60 {
        minutes -= 60;
        degrees += 1;
    }
    (degrees, minutes, seconds)
}

/// Formats right ascension in hours as `HHh MMm SS.Ss`.
pub fn format_ra_hms(ra_hours: f64) -> String {
    let ra = crate::angle::wrap_hours(ra_hours);
    let (h, m, s) = sexagesimal(ra, 1);
    // Rounding 23h 59m 59.99s carries all the way around the clock.
    format!("{:02}h {:02}m {:04.1}s", h % 24, m, s)
}

/// Formats a signed angle in degrees as `±DD° MM′ SS″`.
pub fn format_deg_dms(angle_deg: f64) -> String {
    let sign = if angle_deg < 0.0 { '-' } else { '+' };
    let (d, m, s) = sexagesimal(angle_deg, 0);
    format!("{}{:02}° {:02}′ {:02.0}″", sign, d, m, s)
}

impl std::fmt::Display for crate::transforms::Equatorial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RA {} Dec {}",
            format_ra_hms(self.ra_hours),
            format_deg_dms(self.dec_deg)
        )
    }
}

impl std::fmt::Display for crate::transforms::Horizontal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Alt {} Az {}",
            format_deg_dms(self.altitude_deg),
            format_deg_dms(self.azimuth_deg)
        )
    }
}
