//! Satellite records and their life cycle.

use crate::topocentric::{teme_to_horizontal, Km3};
use skysphere_core::constants::SATELLITE_SPHERE_RADIUS;
use skysphere_core::transforms::horizontal_to_cartesian;
use skysphere_core::{GeoLocation, Horizontal, Instant, Vector3};
use std::sync::atomic::{AtomicBool, Ordering};

/// An initialized satellite: parsed elements plus SGP4 constants.
///
/// Propagation failures are terminal. The `dead` flag only ever goes from
/// false to true, so sharing a satellite across scenes stays deterministic:
/// a dead satellite reports the sentinel forever after.
pub struct Satellite {
    name: String,
    norad_id: u64,
    inclination_deg: f64,
    mean_motion_rev_day: f64,
    epoch_minutes: f64,
    constants: sgp4::Constants,
    dead: AtomicBool,
}

/// One satellite evaluated at one instant for one observer.
#[derive(Debug, Clone, PartialEq)]
pub struct TopocentricSatellite {
    pub name: String,
    pub norad_id: u64,
    pub horizontal: Horizontal,
    /// Position on the 90-unit satellite sphere. The sentinel
    /// `(0, −90, 0)` when the satellite is dead.
    pub position: Vector3,
    /// Slant range to the observer, km; zero when dead.
    pub range_km: f64,
    pub is_visible: bool,
}

/// Minutes since the Unix epoch for a TLE epoch timestamp.
fn datetime_to_minutes(dt: &chrono::NaiveDateTime) -> f64 {
    dt.and_utc().timestamp() as f64 / 60.0
}

impl Satellite {
    /// Initializes a satellite from parsed elements.
    ///
    /// Returns `None` when the SGP4 constants cannot be derived (malformed
    /// or physically meaningless elements); the caller skips the entry.
    pub fn from_elements(elements: sgp4::Elements) -> Option<Self> {
        let constants = match sgp4::Constants::from_elements(&elements) {
            Ok(constants) => constants,
            Err(err) => {
                log::debug!(
                    "skipping satellite {:?}: SGP4 init failed: {}",
                    elements.object_name,
                    err
                );
                return None;
            }
        };
        Some(Self {
            name: elements
                .object_name
                .clone()
                .unwrap_or_else(|| format!("NORAD {}", elements.norad_id)),
            norad_id: elements.norad_id,
            inclination_deg: elements.inclination,
            mean_motion_rev_day: elements.mean_motion,
            epoch_minutes: datetime_to_minutes(&elements.datetime),
            constants,
            dead: AtomicBool::new(false),
        })
    }

    /// Initializes from the two canonical 69-column TLE lines.
    pub fn from_tle(name: Option<&str>, line1: &str, line2: &str) -> Option<Self> {
        let elements = sgp4::Elements::from_tle(
            name.map(|n| n.to_string()),
            line1.as_bytes(),
            line2.as_bytes(),
        )
        .ok()?;
        Self::from_elements(elements)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn norad_id(&self) -> u64 {
        self.norad_id
    }

    pub fn inclination_deg(&self) -> f64 {
        self.inclination_deg
    }

    /// Mean motion in revolutions per day, straight from the TLE.
    pub fn mean_motion_rev_day(&self) -> f64 {
        self.mean_motion_rev_day
    }

    /// True once a propagation has failed; terminal.
    pub fn is_dead(&self) -> bool {
        self.dead.load(Ordering::Relaxed)
    }

    fn sentinel(&self) -> TopocentricSatellite {
        TopocentricSatellite {
            name: self.name.clone(),
            norad_id: self.norad_id,
            horizontal: Horizontal::new(-90.0, 0.0),
            position: Vector3::sentinel(SATELLITE_SPHERE_RADIUS),
            range_km: 0.0,
            is_visible: false,
        }
    }

    /// Propagates to `instant` and projects onto the observer's sky.
    ///
    /// Dead satellites (and any propagation that fails or produces a
    /// non-finite vector, which also kills the satellite) return the
    /// sentinel: `is_visible = false`, position `(0, −90, 0)`.
    pub fn topocentric(
        &self,
        observer: &GeoLocation,
        instant: &Instant,
        gmst_hours: f64,
    ) -> TopocentricSatellite {
        if self.is_dead() {
            return self.sentinel();
        }

        let minutes =
            instant.datetime().timestamp() as f64 / 60.0 - self.epoch_minutes;

        let teme = match self.constants.propagate(sgp4::MinutesSinceEpoch(minutes)) {
            Ok(prediction) => Km3::new(
                prediction.position[0],
                prediction.position[1],
                prediction.position[2],
            ),
            Err(err) => {
                log::debug!("satellite {} propagation failed: {}", self.name, err);
                self.dead.store(true, Ordering::Relaxed);
                return self.sentinel();
            }
        };

        if !teme.is_finite() {
            log::debug!("satellite {} produced a non-finite state vector", self.name);
            self.dead.store(true, Ordering::Relaxed);
            return self.sentinel();
        }

        let (horizontal, range_km) = teme_to_horizontal(&teme, observer, gmst_hours);
        let position = horizontal_to_cartesian(&horizontal, SATELLITE_SPHERE_RADIUS);
        if !position.is_finite() {
            self.dead.store(true, Ordering::Relaxed);
            return self.sentinel();
        }

        TopocentricSatellite {
            name: self.name.clone(),
            norad_id: self.norad_id,
            horizontal,
            position,
            range_km,
            is_visible: horizontal.is_above_horizon(),
        }
    }
}

impl std::fmt::Debug for Satellite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Satellite")
            .field("name", &self.name)
            .field("norad_id", &self.norad_id)
            .field("inclination_deg", &self.inclination_deg)
            .field("dead", &self.is_dead())
            .finish()
    }
}

/// Parses a block of TLE text into initialized satellites.
///
/// Accepts both the 3-line form (name line followed by lines 1 and 2) and
/// the bare 2-line form. Malformed entries are skipped, not fatal.
pub fn parse_tle_text(text: &str) -> Vec<Satellite> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let mut satellites = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() {
            i += 1;
            continue;
        }

        let (name, line1_idx) = if line.starts_with('1') && line.len() >= 69 {
            (None, i)
        } else {
            (Some(line), i + 1)
        };

        let Some(line1) = lines.get(line1_idx).map(|l| l.trim()) else {
            break;
        };
        let Some(line2) = lines.get(line1_idx + 1).map(|l| l.trim()) else {
            break;
        };

        if line1.starts_with('1') && line2.starts_with('2') {
            if let Some(sat) = Satellite::from_tle(name, line1, line2) {
                satellites.push(sat);
            }
            i = line1_idx + 2;
        } else {
            i += 1;
        }
    }

    satellites
}

#[cfg(test)]
mod tests {
    use super::*;
    use skysphere_core::sidereal::gmst_hours;

    // ISS (ZARYA), September 2008 — the canonical SGP4 test TLE.
    const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    fn iss() -> Satellite {
        Satellite::from_tle(Some("ISS (ZARYA)"), ISS_LINE1, ISS_LINE2).expect("valid TLE")
    }

    fn san_francisco() -> GeoLocation {
        GeoLocation::new(37.77, -122.42).unwrap()
    }

    #[test]
    fn parses_the_iss_tle() {
        let sat = iss();
        assert_eq!(sat.name(), "ISS (ZARYA)");
        assert_eq!(sat.norad_id(), 25544);
        assert!((sat.inclination_deg() - 51.6416).abs() < 1e-4);
        assert!((sat.mean_motion_rev_day() - 15.72125391).abs() < 1e-6);
        assert!(!sat.is_dead());
    }

    #[test]
    fn rejects_garbage_lines() {
        assert!(Satellite::from_tle(Some("JUNK"), "not a tle", "also not a tle").is_none());
    }

    #[test]
    fn topocentric_near_epoch_is_physical() {
        let sat = iss();
        let epoch = Instant::from_ymd_hms(2008, 9, 20, 12, 25, 40).unwrap();
        let observer = san_francisco();
        let gmst = gmst_hours(epoch.julian_date());

        let topo = sat.topocentric(&observer, &epoch, gmst);
        assert!(topo.position.is_finite());
        assert!((topo.position.length() - SATELLITE_SPHERE_RADIUS).abs() < 1e-6);
        assert!((-90.0..=90.0).contains(&topo.horizontal.altitude_deg));
        assert!((0.0..360.0).contains(&topo.horizontal.azimuth_deg));
        // LEO slant range from the ground is bounded by the horizon geometry.
        assert!(
            topo.range_km > 300.0 && topo.range_km < 3500.0,
            "range {} km",
            topo.range_km
        );
    }

    #[test]
    fn visibility_sweep_crosses_the_horizon() {
        // Over 24 hours the ISS must rise and set at least twice for a
        // mid-latitude observer, and stay bounded throughout.
        let sat = iss();
        let observer = san_francisco();
        let start = Instant::from_ymd_hms(2008, 9, 20, 12, 25, 40).unwrap();

        let mut crossings = 0;
        let mut previous_above = None;
        for minute in 0..(24 * 60) {
            let t = start.add_seconds(minute as f64 * 60.0);
            let gmst = gmst_hours(t.julian_date());
            let topo = sat.topocentric(&observer, &t, gmst);
            let alt = topo.horizontal.altitude_deg;
            assert!((-90.0..=90.0).contains(&alt), "minute {}: alt {}", minute, alt);

            let above = alt > 0.0;
            if let Some(prev) = previous_above {
                if prev != above {
                    crossings += 1;
                }
            }
            previous_above = Some(above);
        }
        assert!(
            crossings >= 2,
            "expected at least two horizon crossings in 24h, got {}",
            crossings
        );
        assert!(!sat.is_dead(), "a healthy TLE must not die during a sweep");
    }

    #[test]
    fn decayed_propagation_is_terminally_dead() {
        let sat = iss();
        let observer = san_francisco();
        // Decades past epoch: SGP4 reports orbital decay for the ISS.
        let far_future = Instant::from_ymd_hms(2060, 1, 1, 0, 0, 0).unwrap();
        let gmst = gmst_hours(far_future.julian_date());

        let first = sat.topocentric(&observer, &far_future, gmst);
        if sat.is_dead() {
            assert!(!first.is_visible);
            assert_eq!(first.position, Vector3::sentinel(SATELLITE_SPHERE_RADIUS));

            // Dead is terminal: even a healthy epoch now returns the sentinel.
            let epoch = Instant::from_ymd_hms(2008, 9, 20, 12, 25, 40).unwrap();
            let again = sat.topocentric(&observer, &epoch, gmst_hours(epoch.julian_date()));
            assert!(!again.is_visible);
            assert_eq!(again.position, Vector3::sentinel(SATELLITE_SPHERE_RADIUS));
        } else {
            // Propagator survived the long arc; output must still be finite.
            assert!(first.position.is_finite());
        }
    }

    #[test]
    fn parse_three_line_blocks() {
        let text = format!("ISS (ZARYA)\n{}\n{}\n", ISS_LINE1, ISS_LINE2);
        let sats = parse_tle_text(&text);
        assert_eq!(sats.len(), 1);
        assert_eq!(sats[0].name(), "ISS (ZARYA)");
    }

    #[test]
    fn parse_two_line_blocks() {
        let text = format!("{}\n{}\n", ISS_LINE1, ISS_LINE2);
        let sats = parse_tle_text(&text);
        assert_eq!(sats.len(), 1);
        assert_eq!(sats[0].norad_id(), 25544);
    }

    #[test]
    fn parse_skips_malformed_entries() {
        let text = format!(
            "GOOD\n{}\n{}\nBROKEN\n1 garbage\n2 garbage\n",
            ISS_LINE1, ISS_LINE2
        );
        let sats = parse_tle_text(&text);
        assert_eq!(sats.len(), 1);
    }

    #[test]
    fn parse_empty_text() {
        assert!(parse_tle_text("").is_empty());
        assert!(parse_tle_text("\n\n").is_empty());
    }
}
