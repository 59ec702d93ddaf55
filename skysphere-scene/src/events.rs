//! Meteor-shower activity, radiant projection, and the upcoming-events
//! feed.
//!
//! Event times come from iterative refinement on the relevant angle: lunar
//! phase events solve `phase(t) = target` and Sun season events solve
//! `longitude(t) = target`, both by stepping the signed angular difference
//! divided by the mean rate. The rates vary slowly (a few percent), so the
//! iteration lands within a second or two in a handful of rounds.

use crate::object::ShowerView;
use skysphere_catalog::showers::MeteorShower;
use skysphere_core::angle::wrap_signed_degrees;
use skysphere_core::constants::SCENE_RADIUS;
use skysphere_core::sidereal::{gmst_hours, lst_hours};
use skysphere_core::transforms::{equatorial_to_horizontal, horizontal_to_cartesian, Equatorial};
use skysphere_core::{GeoLocation, Instant};
use skysphere_ephemeris::{moon, sun};

/// Mean lunar elongation rate, degrees per day (360° per synodic month).
const MOON_PHASE_RATE_DEG_DAY: f64 = 12.1907;
/// Mean solar longitude rate, degrees per day.
const SUN_LONGITUDE_RATE_DEG_DAY: f64 = 0.98565;
const REFINE_ITERATIONS: u32 = 10;

/// Kinds of upcoming events, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventKind {
    MoonPhase,
    MeteorPeak,
    Solstice,
    Equinox,
}

/// One upcoming astronomical event.
#[derive(Debug, Clone, PartialEq)]
pub struct AstronomicalEvent {
    pub kind: EventKind,
    pub name: String,
    pub instant: Instant,
}

/// Showers whose activity window contains the instant's calendar date.
pub fn active_showers<'a>(
    showers: &'a [MeteorShower],
    instant: &Instant,
) -> Vec<&'a MeteorShower> {
    let (month, day) = instant.month_day();
    showers
        .iter()
        .filter(|s| s.is_active_on(month, day))
        .collect()
}

/// Projects a shower's radiant onto the observer's sky.
pub fn project_radiant(
    shower: &MeteorShower,
    observer: &GeoLocation,
    instant: &Instant,
) -> ShowerView {
    let lst = lst_hours(
        gmst_hours(instant.julian_date()),
        observer.longitude_deg(),
    );
    let eq = Equatorial::new(shower.radiant_ra_hours, shower.radiant_dec_deg);
    let altaz = equatorial_to_horizontal(&eq, observer.latitude_deg(), lst);
    let (month, day) = instant.month_day();

    ShowerView {
        id: shower.id,
        name: shower.name,
        altaz,
        position: horizontal_to_cartesian(&altaz, SCENE_RADIUS),
        is_active: shower.is_active_on(month, day),
        zhr: shower.zhr,
        speed_km_s: shower.speed_km_s,
        parent_body: shower.parent_body,
    }
}

/// Refines the next instant where `angle(t)` reaches `target_deg`.
///
/// `angle` must be cyclic increasing at roughly `rate_deg_day`. Starting
/// from `from`, steps forward by the remaining signed difference over the
/// rate until converged. Returns days-from-`from` (always ≥ 0).
fn refine_crossing<F>(angle: F, from: &Instant, target_deg: f64, rate_deg_day: f64) -> f64
where
    F: Fn(&Instant) -> f64,
{
    // First guess: remaining positive angular distance at the mean rate.
    let start_diff = (target_deg - angle(from)).rem_euclid(360.0);
    let mut days = start_diff / rate_deg_day;

    for _ in 0..REFINE_ITERATIONS {
        let t = from.add_days(days);
        let diff = wrap_signed_degrees(target_deg - angle(&t));
        let step = diff / rate_deg_day;
        days += step;
        if libm::fabs(step) < 1e-7 {
            break;
        }
    }
    days.max(0.0)
}

fn moon_phase_events(from: &Instant, days_ahead: f64, events: &mut Vec<AstronomicalEvent>) {
    let phases = [
        (0.0, "New Moon"),
        (90.0, "First Quarter"),
        (180.0, "Full Moon"),
        (270.0, "Last Quarter"),
    ];
    let phase_at = |t: &Instant| moon::phase_angle_deg(t.julian_date());

    for (target, name) in phases {
        let mut offset = 0.0;
        // A long window can contain the same phase more than once.
        loop {
            let base = from.add_days(offset);
            let days = refine_crossing(phase_at, &base, target, MOON_PHASE_RATE_DEG_DAY);
            let total = offset + days;
            if total > days_ahead {
                break;
            }
            events.push(AstronomicalEvent {
                kind: EventKind::MoonPhase,
                name: name.to_string(),
                instant: from.add_days(total),
            });
            offset = total + 25.0;
        }
    }
}

fn season_events(from: &Instant, days_ahead: f64, events: &mut Vec<AstronomicalEvent>) {
    let seasons = [
        (0.0, "March Equinox", EventKind::Equinox),
        (90.0, "June Solstice", EventKind::Solstice),
        (180.0, "September Equinox", EventKind::Equinox),
        (270.0, "December Solstice", EventKind::Solstice),
    ];
    let longitude_at = |t: &Instant| sun::solar_position(t.julian_date()).ecliptic_longitude_deg;

    for (target, name, kind) in seasons {
        let mut offset = 0.0;
        loop {
            let base = from.add_days(offset);
            let days = refine_crossing(longitude_at, &base, target, SUN_LONGITUDE_RATE_DEG_DAY);
            let total = offset + days;
            if total > days_ahead {
                break;
            }
            events.push(AstronomicalEvent {
                kind,
                name: name.to_string(),
                instant: from.add_days(total),
            });
            offset = total + 300.0;
        }
    }
}

fn shower_peak_events(
    showers: &[MeteorShower],
    from: &Instant,
    days_ahead: f64,
    events: &mut Vec<AstronomicalEvent>,
) {
    for shower in showers {
        // The peak may fall this calendar year or next.
        for year in [from.year(), from.year() + 1] {
            let Ok(peak) =
                Instant::from_ymd_hms(year, shower.peak.month, shower.peak.day, 0, 0, 0)
            else {
                continue;
            };
            let days = from.seconds_until(&peak) / 86_400.0;
            if (0.0..=days_ahead).contains(&days) {
                events.push(AstronomicalEvent {
                    kind: EventKind::MeteorPeak,
                    name: format!("{} peak", shower.name),
                    instant: peak,
                });
            }
        }
    }
}

/// Enumerates the events in `[from, from + days_ahead]`, sorted by time
/// with ties broken by kind then name.
pub fn upcoming_events(
    showers: &[MeteorShower],
    from: &Instant,
    days_ahead: f64,
) -> Vec<AstronomicalEvent> {
    let mut events = Vec::new();
    moon_phase_events(from, days_ahead, &mut events);
    shower_peak_events(showers, from, days_ahead, &mut events);
    season_events(from, days_ahead, &mut events);

    events.sort_by(|a, b| {
        a.instant
            .cmp(&b.instant)
            .then(a.kind.cmp(&b.kind))
            .then(a.name.cmp(&b.name))
    });
    events
}
